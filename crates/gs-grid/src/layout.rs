use gs_core::Error;
use serde::{Deserialize, Serialize};

/// Spacing used by a tight layout when none is given.
pub const DEFAULT_PAD: f32 = 1.08;

/// Top margin reserved for a figure title without tight layout.
pub const TITLE_TOP: f32 = 0.9;

/// Upper edge of the tight-layout rectangle when a figure title is present.
pub const TITLE_RECT_TOP: f32 = 0.95;

/// Padding as given by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Padding {
    Auto(bool),
    Uniform(f32),
    /// `(pad, h_pad, w_pad, rect)`, any prefix of it.
    Positional(Vec<PaddingArg>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaddingArg {
    Value(f32),
    Rect([f32; 4]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TightLayout {
    pub pad: f32,
    pub h_pad: Option<f32>,
    pub w_pad: Option<f32>,
    /// `[left, bottom, right, top]` in figure fractions.
    pub rect: Option<[f32; 4]>,
}

impl Default for TightLayout {
    fn default() -> Self {
        Self {
            pad: DEFAULT_PAD,
            h_pad: None,
            w_pad: None,
            rect: None,
        }
    }
}

impl Padding {
    /// `Ok(None)` means no layout adjustment.
    pub fn resolve(&self) -> Result<Option<TightLayout>, Error> {
        match self {
            Self::Auto(false) => Ok(None),
            Self::Auto(true) => Ok(Some(TightLayout::default())),
            Self::Uniform(pad) => Ok(Some(TightLayout {
                pad: *pad,
                ..TightLayout::default()
            })),
            Self::Positional(args) => {
                if args.len() > 4 {
                    return Err(Error::TooManyPaddingArgs { got: args.len() });
                }
                let mut tight = TightLayout::default();
                for (position, arg) in args.iter().enumerate() {
                    match (position, arg) {
                        (0, PaddingArg::Value(v)) => tight.pad = *v,
                        (1, PaddingArg::Value(v)) => tight.h_pad = Some(*v),
                        (2, PaddingArg::Value(v)) => tight.w_pad = Some(*v),
                        (3, PaddingArg::Rect(r)) => tight.rect = Some(*r),
                        _ => return Err(Error::InvalidPadding { position }),
                    }
                }
                Ok(Some(tight))
            }
        }
    }
}

/// Figure-level spacing handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub tight: Option<TightLayout>,
    /// Top edge of the subplot area, as a figure fraction.
    pub top: Option<f32>,
}

impl Layout {
    pub fn new(tight: Option<TightLayout>, has_figure_title: bool) -> Self {
        match (tight, has_figure_title) {
            (Some(mut tight), true) => {
                let rect = tight.rect.get_or_insert([0.0, 0.0, 1.0, 1.0]);
                rect[3] = rect[3].min(TITLE_RECT_TOP);
                Self {
                    tight: Some(tight),
                    top: None,
                }
            }
            (None, true) => Self {
                tight: None,
                top: Some(TITLE_TOP),
            },
            (tight, false) => Self { tight, top: None },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tight.is_none() && self.top.is_none()
    }
}

#[cfg(test)]
mod tests {
    use gs_core::Error;

    use super::{DEFAULT_PAD, Layout, Padding, PaddingArg, TightLayout};

    #[test]
    fn boolean_and_uniform_padding() {
        assert_eq!(Padding::Auto(false).resolve(), Ok(None));
        assert_eq!(
            Padding::Auto(true).resolve(),
            Ok(Some(TightLayout::default()))
        );
        let tight = Padding::Uniform(0.5).resolve().expect("valid").expect("tight");
        assert_eq!(tight.pad, 0.5);
        assert_eq!(tight.h_pad, None);
    }

    #[test]
    fn positional_padding_fills_in_order() {
        let padding = Padding::Positional(vec![
            PaddingArg::Value(0.2),
            PaddingArg::Value(0.3),
            PaddingArg::Value(0.4),
            PaddingArg::Rect([0.0, 0.0, 1.0, 0.9]),
        ]);
        assert_eq!(
            padding.resolve(),
            Ok(Some(TightLayout {
                pad: 0.2,
                h_pad: Some(0.3),
                w_pad: Some(0.4),
                rect: Some([0.0, 0.0, 1.0, 0.9]),
            }))
        );

        let short = Padding::Positional(vec![PaddingArg::Value(2.0)]);
        let tight = short.resolve().expect("valid").expect("tight");
        assert_eq!(tight.pad, 2.0);
        assert_eq!(tight.w_pad, None);

        let empty = Padding::Positional(Vec::new()).resolve().expect("valid");
        assert_eq!(empty.map(|t| t.pad), Some(DEFAULT_PAD));
    }

    #[test]
    fn five_positional_values_are_rejected() {
        let padding = Padding::Positional(vec![PaddingArg::Value(1.0); 5]);
        assert_eq!(padding.resolve(), Err(Error::TooManyPaddingArgs { got: 5 }));
    }

    #[test]
    fn misplaced_rect_is_rejected() {
        let padding = Padding::Positional(vec![PaddingArg::Rect([0.0, 0.0, 1.0, 1.0])]);
        assert_eq!(padding.resolve(), Err(Error::InvalidPadding { position: 0 }));
    }

    #[test]
    fn padding_deserializes_from_json() {
        let p: Padding = serde_json::from_str("true").expect("json");
        assert_eq!(p, Padding::Auto(true));
        let p: Padding = serde_json::from_str("0.5").expect("json");
        assert_eq!(p, Padding::Uniform(0.5));
        let p: Padding = serde_json::from_str("[1.0, 2, [0, 0, 1, 0.9]]").expect("json");
        assert_eq!(
            p,
            Padding::Positional(vec![
                PaddingArg::Value(1.0),
                PaddingArg::Value(2.0),
                PaddingArg::Rect([0.0, 0.0, 1.0, 0.9]),
            ])
        );
    }

    #[test]
    fn figure_title_reserves_top_margin() {
        assert_eq!(
            Layout::new(None, true),
            Layout {
                tight: None,
                top: Some(0.9)
            }
        );
        let layout = Layout::new(Some(TightLayout::default()), true);
        assert_eq!(
            layout.tight.and_then(|t| t.rect),
            Some([0.0, 0.0, 1.0, 0.95])
        );
        assert!(Layout::new(None, false).is_empty());
    }
}
