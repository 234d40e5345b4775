use gs_core::ParamValue;
use serde::{Deserialize, Serialize};

use crate::layout::Padding;

/// Per-call display configuration.
///
/// `mode`, `cmap` and `title` are either absent, one value for every image,
/// or a list with one value per image. `return_image` is absent/`false` to
/// display, `true` for RGB, or the name of a [`gs_core::ReturnEncoding`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayParams {
    pub mode: ParamValue,
    pub cmap: ParamValue,
    pub title: ParamValue,
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub window_title: Option<String>,
    pub plot_title: Option<String>,
    pub size: Option<(f32, f32)>,
    pub padding: Option<Padding>,
    pub return_image: ParamValue,
}

impl DisplayParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: impl Into<ParamValue>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn with_cmap(mut self, cmap: impl Into<ParamValue>) -> Self {
        self.cmap = cmap.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<ParamValue>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = Some(title.into());
        self
    }

    pub fn with_plot_title(mut self, title: impl Into<String>) -> Self {
        self.plot_title = Some(title.into());
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_return_image(mut self, value: impl Into<ParamValue>) -> Self {
        self.return_image = value.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use gs_core::{ChannelMode, ParamValue, ReturnEncoding};

    use super::DisplayParams;
    use crate::layout::{Padding, PaddingArg};

    #[test]
    fn builder_sets_fields() {
        let params = DisplayParams::new()
            .with_mode([ChannelMode::Bgr, ChannelMode::Rgb])
            .with_title("lenna")
            .with_rows(2)
            .with_return_image(ReturnEncoding::Bgra);

        assert_eq!(params.mode, ParamValue::from(["BGR", "RGB"]));
        assert_eq!(params.title, ParamValue::from("lenna"));
        assert_eq!(params.rows, Some(2));
        assert_eq!(params.columns, None);
        assert_eq!(params.return_image, ParamValue::from("BGRA"));
    }

    #[test]
    fn manifest_fields_are_optional() {
        let params: DisplayParams = serde_json::from_str(
            r#"{
                "mode": ["BGR", null],
                "cmap": "gray",
                "columns": 3,
                "size": [800, 600],
                "padding": [0.5, 1.0],
                "return_image": true
            }"#,
        )
        .expect("json");

        assert_eq!(params.mode, ParamValue::List(vec!["BGR".into(), ParamValue::Null]));
        assert_eq!(params.cmap, ParamValue::from("gray"));
        assert_eq!(params.title, ParamValue::Null);
        assert_eq!(params.columns, Some(3));
        assert_eq!(params.size, Some((800.0, 600.0)));
        assert_eq!(
            params.padding,
            Some(Padding::Positional(vec![
                PaddingArg::Value(0.5),
                PaddingArg::Value(1.0)
            ]))
        );
        assert_eq!(params.return_image, ParamValue::Bool(true));
    }
}
