use core::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Loosely typed parameter as handed in by a caller or a manifest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ParamValue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    List,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::List => "list",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ParamValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::Str,
            Self::List(_) => ValueKind::List,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<crate::ChannelMode> for ParamValue {
    fn from(mode: crate::ChannelMode) -> Self {
        Self::Str(mode.as_str().to_string())
    }
}

impl From<crate::ReturnEncoding> for ParamValue {
    fn from(enc: crate::ReturnEncoding) -> Self {
        Self::Str(enc.as_str().to_string())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>, const N: usize> From<[T; N]> for ParamValue {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Checks a scalar-or-list parameter against the image count.
///
/// List elements must have a kind in `allowed_kinds`; string elements must
/// also appear in `allowed_values` when given (ASCII case-insensitive).
/// Scalar strings are not checked against `allowed_values`.
pub fn validate(
    value: &ParamValue,
    allowed_kinds: &'static [ValueKind],
    num_images: usize,
    name: &str,
    allowed_values: Option<&'static [&'static str]>,
) -> Result<(), Error> {
    if let ParamValue::List(items) = value {
        if num_images == 1 {
            return Err(Error::AmbiguousSequenceForSingleImage {
                param: name.to_string(),
            });
        }
        if num_images > 1 {
            if items.len() != num_images {
                return Err(Error::SequenceLengthMismatch {
                    param: name.to_string(),
                    expected: num_images,
                    got: items.len(),
                });
            }
            for item in items {
                let kind = item.kind();
                if !allowed_kinds.contains(&kind) {
                    return Err(Error::InvalidElementType {
                        param: name.to_string(),
                        allowed: allowed_kinds,
                        got: kind,
                    });
                }
                if let (ParamValue::Str(s), Some(allowed)) = (item, allowed_values)
                    && !allowed.iter().any(|a| a.eq_ignore_ascii_case(s))
                {
                    return Err(Error::InvalidElementValue {
                        param: name.to_string(),
                        allowed,
                        got: s.clone(),
                    });
                }
            }
            return Ok(());
        }
    }

    let kind = value.kind();
    if allowed_kinds.contains(&kind) {
        return Ok(());
    }
    Err(Error::InvalidType {
        param: name.to_string(),
        allowed: allowed_kinds,
        got: kind,
    })
}

/// A parameter resolved once for the whole call.
#[derive(Debug, Clone, PartialEq)]
pub enum Param<T> {
    Scalar(T),
    PerImage(Vec<T>),
}

impl<T> Param<T> {
    /// The value applying to image `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::PerImage(values) => values.get(index),
        }
    }
}

impl<T> Param<Option<T>> {
    pub fn get_opt(&self, index: usize) -> Option<&T> {
        self.get(index).and_then(Option::as_ref)
    }
}

const TEXT_KINDS: &[ValueKind] = &[ValueKind::Str, ValueKind::Null];
const STRING_KINDS: &[ValueKind] = &[ValueKind::Str];

/// Validates a string-or-absent parameter and resolves it.
///
/// List elements may be absent individually.
pub fn resolve_text_param(
    value: &ParamValue,
    num_images: usize,
    name: &str,
    allowed_values: Option<&'static [&'static str]>,
) -> Result<Param<Option<String>>, Error> {
    validate(value, TEXT_KINDS, num_images, name, allowed_values)?;
    Ok(resolve_text(value))
}

/// Like [`resolve_text_param`], but a list must hold a string for every
/// image. Only the scalar form may be absent.
pub fn resolve_string_list_param(
    value: &ParamValue,
    num_images: usize,
    name: &str,
) -> Result<Param<Option<String>>, Error> {
    let kinds = match value {
        ParamValue::List(_) => STRING_KINDS,
        _ => TEXT_KINDS,
    };
    validate(value, kinds, num_images, name, None)?;
    Ok(resolve_text(value))
}

fn resolve_text(value: &ParamValue) -> Param<Option<String>> {
    match value {
        ParamValue::List(items) => {
            Param::PerImage(items.iter().map(|v| v.as_str().map(str::to_string)).collect())
        }
        other => Param::Scalar(other.as_str().map(str::to_string)),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Param, ParamValue, ValueKind, resolve_string_list_param, resolve_text_param, validate,
    };
    use crate::{ChannelMode, Error, SUPPORTED_MODES};

    const KINDS: &[ValueKind] = &[ValueKind::Str, ValueKind::Null];

    #[test]
    fn list_for_single_image_is_ambiguous() {
        let value = ParamValue::from(vec!["BGR"]);
        assert_eq!(
            validate(&value, KINDS, 1, "mode", None),
            Err(Error::AmbiguousSequenceForSingleImage {
                param: "mode".to_string()
            })
        );
    }

    #[test]
    fn list_length_must_match_regardless_of_content() {
        for len in [1usize, 2, 4, 7] {
            let value = ParamValue::List(vec![ParamValue::Int(9); len]);
            assert_eq!(
                validate(&value, KINDS, 3, "mode", Some(SUPPORTED_MODES)),
                Err(Error::SequenceLengthMismatch {
                    param: "mode".to_string(),
                    expected: 3,
                    got: len
                })
            );
        }
    }

    #[test]
    fn list_elements_are_checked() {
        let value = ParamValue::List(vec!["RGB".into(), ParamValue::Int(1)]);
        assert!(matches!(
            validate(&value, KINDS, 2, "mode", None),
            Err(Error::InvalidElementType {
                got: ValueKind::Int,
                ..
            })
        ));

        let value = ParamValue::from(["bgr", "HSV"]);
        assert_eq!(
            validate(&value, KINDS, 2, "mode", Some(SUPPORTED_MODES)),
            Err(Error::InvalidElementValue {
                param: "mode".to_string(),
                allowed: SUPPORTED_MODES,
                got: "HSV".to_string()
            })
        );

        let value = ParamValue::List(vec![ChannelMode::Bgr.into(), ParamValue::Null]);
        assert_eq!(validate(&value, KINDS, 2, "mode", Some(SUPPORTED_MODES)), Ok(()));
    }

    #[test]
    fn scalars_check_kind_only() {
        assert_eq!(
            validate(&"HSV".into(), KINDS, 3, "mode", Some(SUPPORTED_MODES)),
            Ok(())
        );
        assert_eq!(validate(&ParamValue::Null, KINDS, 3, "mode", None), Ok(()));
        assert!(matches!(
            validate(&ParamValue::Float(1.5), KINDS, 3, "title", None),
            Err(Error::InvalidType {
                got: ValueKind::Float,
                ..
            })
        ));
    }

    #[test]
    fn empty_image_list_accepts_scalars_only() {
        assert!(matches!(
            validate(&ParamValue::List(Vec::new()), KINDS, 0, "title", None),
            Err(Error::InvalidType {
                got: ValueKind::List,
                ..
            })
        ));
    }

    #[test]
    fn resolved_param_broadcasts_or_indexes() {
        let scalar = resolve_text_param(&"gray".into(), 3, "cmap", None).expect("valid");
        assert_eq!(scalar.get_opt(2).map(String::as_str), Some("gray"));

        let value = ParamValue::from(vec![Some("a"), None, Some("c")]);
        let per_image = resolve_text_param(&value, 3, "title", None).expect("valid");
        assert_eq!(
            per_image,
            Param::PerImage(vec![Some("a".to_string()), None, Some("c".to_string())])
        );
        assert_eq!(per_image.get_opt(1), None);
        assert_eq!(per_image.get(5), None);
    }

    #[test]
    fn string_lists_reject_absent_elements() {
        let value = ParamValue::from(vec![Some("a"), None]);
        assert_eq!(
            resolve_string_list_param(&value, 2, "title"),
            Err(Error::InvalidElementType {
                param: "title".to_string(),
                allowed: &[ValueKind::Str],
                got: ValueKind::Null
            })
        );

        let absent = resolve_string_list_param(&ParamValue::Null, 2, "title").expect("valid");
        assert_eq!(absent, Param::Scalar(None));

        let value = ParamValue::from(["a", "b"]);
        let per_image = resolve_string_list_param(&value, 2, "title").expect("valid");
        assert_eq!(per_image.get_opt(1).map(String::as_str), Some("b"));
    }

    #[test]
    fn deserializes_from_json() {
        let value: ParamValue = serde_json::from_str(r#"["RGB", null, "bgr"]"#).expect("json");
        assert_eq!(
            value,
            ParamValue::List(vec!["RGB".into(), ParamValue::Null, "bgr".into()])
        );
        let value: ParamValue = serde_json::from_str("3").expect("json");
        assert_eq!(value, ParamValue::Int(3));
        let value: ParamValue = serde_json::from_str("true").expect("json");
        assert_eq!(value, ParamValue::Bool(true));
    }
}
