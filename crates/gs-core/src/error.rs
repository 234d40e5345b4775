use core::fmt;

use crate::param::ValueKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    AmbiguousSequenceForSingleImage {
        param: String,
    },
    SequenceLengthMismatch {
        param: String,
        expected: usize,
        got: usize,
    },
    InvalidElementType {
        param: String,
        allowed: &'static [ValueKind],
        got: ValueKind,
    },
    InvalidElementValue {
        param: String,
        allowed: &'static [&'static str],
        got: String,
    },
    InvalidType {
        param: String,
        allowed: &'static [ValueKind],
        got: ValueKind,
    },
    UnsupportedMode {
        mode: String,
    },
    NullImage {
        index: Option<usize>,
    },
    TooManyPaddingArgs {
        got: usize,
    },
    InvalidPadding {
        position: usize,
    },
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    InvalidShape,
    GridTooLarge {
        rows: usize,
        columns: usize,
    },
    Renderer(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousSequenceForSingleImage { param } => {
                write!(f, "cannot process a list of {param} for a single image")
            }
            Self::SequenceLengthMismatch {
                param,
                expected,
                got,
            } => write!(
                f,
                "given {got} {param} values for {expected} images, expected {expected}"
            ),
            Self::InvalidElementType {
                param,
                allowed,
                got,
            } => write!(
                f,
                "{param} list elements should be one of {}, got {got}",
                kind_list(allowed)
            ),
            Self::InvalidElementValue {
                param,
                allowed,
                got,
            } => write!(
                f,
                "{param} list strings should be one of [{}], got '{got}'",
                allowed.join(", ")
            ),
            Self::InvalidType {
                param,
                allowed,
                got,
            } => write!(
                f,
                "{param} should either be one of {} or a list of the same, got {got}",
                kind_list(allowed)
            ),
            Self::UnsupportedMode { mode } => write!(
                f,
                "mode {mode} not supported, use one of [{}]",
                crate::SUPPORTED_MODES.join(", ")
            ),
            Self::NullImage { index: Some(i) } => write!(f, "image {i} is missing"),
            Self::NullImage { index: None } => write!(f, "image is missing"),
            Self::TooManyPaddingArgs { got } => {
                write!(f, "padding accepts at most 4 values, got {got}")
            }
            Self::InvalidPadding { position } => {
                write!(f, "padding value at position {position} has the wrong form")
            }
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::InvalidShape => write!(f, "invalid image shape"),
            Self::GridTooLarge { rows, columns } => {
                write!(f, "a {rows}x{columns} grid has too many cells")
            }
            Self::Renderer(msg) => write!(f, "renderer error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

fn kind_list(kinds: &[ValueKind]) -> String {
    let names: Vec<&str> = kinds.iter().map(|k| k.name()).collect();
    format!("[{}]", names.join(", "))
}

/// Advisory conditions. Never abort a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    NoImagesProvided,
    /// BGR was requested on an image that has neither 3 nor 4 channels.
    ChannelCount {
        index: Option<usize>,
        channels: usize,
    },
    InvalidReturnEncoding {
        given: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoImagesProvided => {
                write!(f, "please provide at least one image to display")
            }
            Self::ChannelCount {
                index: Some(i),
                channels,
            } => write!(
                f,
                "image {i} has {channels} channels, but BGR mode expects 3 or 4"
            ),
            Self::ChannelCount {
                index: None,
                channels,
            } => write!(
                f,
                "image has {channels} channels, but BGR mode expects 3 or 4"
            ),
            Self::InvalidReturnEncoding { given } => write!(
                f,
                "return encoding {given} not recognized, falling back to RGB"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Warning};
    use crate::ValueKind;

    #[test]
    fn messages_name_the_parameter() {
        let err = Error::SequenceLengthMismatch {
            param: "mode".to_string(),
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "given 2 mode values for 3 images, expected 3");

        let err = Error::InvalidType {
            param: "title".to_string(),
            allowed: &[ValueKind::Str, ValueKind::Null],
            got: ValueKind::Int,
        };
        assert!(err.to_string().contains("[str, null]"));
    }

    #[test]
    fn warning_mentions_index() {
        let w = Warning::ChannelCount {
            index: Some(4),
            channels: 2,
        };
        assert_eq!(
            w.to_string(),
            "image 4 has 2 channels, but BGR mode expects 3 or 4"
        );
    }
}
