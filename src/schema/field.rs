//! Field placement on a page of a template.

use serde::{Deserialize, Serialize};

/// Default label size in reference pixels.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Font stack used when a field doesn't name one.
pub const DEFAULT_FONT_FAMILY: &str = "'Malgun Gothic', 'Nanum Gothic', sans-serif";

/// Handwriting stack for fields that should look filled in by hand.
pub const HANDWRITING_FONT_FAMILY: &str = "'Caveat', 'Nanum Pen Script', cursive";

/// Horizontal text alignment inside a field box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// CSS `text-align` keyword.
    pub fn css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font style of a field label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    /// CSS `font-style` keyword.
    pub fn css(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

/// Where a named field sits on one page of a template.
///
/// All lengths are reference-frame pixels (see [`crate::units`]). Scale is
/// applied by the renderers, never stored here.
///
/// ```
/// use overprint::schema::FieldPosition;
///
/// let field = FieldPosition::new("name", 1, 128.0, 225.0)
///     .size(218.0, 36.0)
///     .font_size(14.0);
/// assert_eq!(field.effective_font_size(), 14.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPosition {
    pub id: String,
    /// 1-based page number
    pub page: u32,
    pub top: f64,
    pub left: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl FieldPosition {
    /// A field with only its anchor set.
    pub fn new(id: impl Into<String>, page: u32, top: f64, left: f64) -> Self {
        Self {
            id: id.into(),
            page,
            top,
            left,
            width: None,
            height: None,
            font_size: None,
            letter_spacing: None,
            text_align: None,
            font_family: None,
            font_style: None,
            opacity: None,
        }
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn letter_spacing(mut self, spacing: f64) -> Self {
        self.letter_spacing = Some(spacing);
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn italic(mut self) -> Self {
        self.font_style = Some(FontStyle::Italic);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn effective_font_size(&self) -> f64 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn effective_align(&self) -> TextAlign {
        self.text_align.unwrap_or_default()
    }

    pub fn effective_font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    pub fn effective_font_style(&self) -> FontStyle {
        self.font_style.unwrap_or_default()
    }

    /// Opacity clamped to `0..=1`, default 1.
    pub fn effective_opacity(&self) -> f64 {
        self.opacity.map(|o| o.clamp(0.0, 1.0)).unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let field = FieldPosition::new("signDate", 1, 1035.0, 575.0);
        assert_eq!(field.effective_font_size(), 12.0);
        assert_eq!(field.effective_align(), TextAlign::Left);
        assert_eq!(field.effective_font_style(), FontStyle::Normal);
        assert_eq!(field.effective_font_family(), DEFAULT_FONT_FAMILY);
        assert_eq!(field.effective_opacity(), 1.0);
    }

    #[test]
    fn test_opacity_clamped() {
        let field = FieldPosition::new("a", 1, 0.0, 0.0).opacity(1.7);
        assert_eq!(field.effective_opacity(), 1.0);
        let field = FieldPosition::new("a", 1, 0.0, 0.0).opacity(-0.2);
        assert_eq!(field.effective_opacity(), 0.0);
    }

    #[test]
    fn test_json_uses_camel_case_and_skips_unset() {
        let field = FieldPosition::new("address", 1, 194.0, 450.0)
            .font_size(17.0)
            .italic();
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["fontSize"], 17.0);
        assert_eq!(json["fontStyle"], "italic");
        assert!(json.get("width").is_none());
    }

    #[test]
    fn test_deserialize_original_shape() {
        let json = r#"{"id":"name","page":1,"top":128,"left":225,"width":218,"height":36,"fontSize":14,"textAlign":"center"}"#;
        let field: FieldPosition = serde_json::from_str(json).unwrap();
        assert_eq!(field.width, Some(218.0));
        assert_eq!(field.effective_align(), TextAlign::Center);
    }
}
