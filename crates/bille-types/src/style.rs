use crate::Color;
use facet::Facet;

/// Text styling forwarded to the external renderer.
///
/// Only the properties the pipeline actually produces are modeled; anything
/// else is the renderer's business.
#[derive(Facet, Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub white_space: Option<String>,
}

impl TextStyle {
    pub fn monospace_pre() -> Self {
        Self {
            font_family: Some("monospace".to_string()),
            font_size: None,
            white_space: Some("pre".to_string()),
        }
    }

    /// Overlays `self` on `base`: properties set here win, the rest fall
    /// through to the base style.
    pub fn merged_over(&self, base: &TextStyle) -> TextStyle {
        TextStyle {
            font_family: self.font_family.clone().or_else(|| base.font_family.clone()),
            font_size: self.font_size.or(base.font_size),
            white_space: self.white_space.clone().or_else(|| base.white_space.clone()),
        }
    }
}

/// Tooltip declaration carried by a value or error.
#[derive(Facet, Debug, Clone, PartialEq, Default)]
pub struct TooltipSpec {
    pub text: String,
    pub text_style: Option<TextStyle>,
    pub background_color: Option<Color>,
    pub persistent: bool,
}

impl TooltipSpec {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}
