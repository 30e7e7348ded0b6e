use bille_types::{Color, ErrorText, Scalar, TextStyle, TooltipSpec};

/// What the builder knows about a value when asking for its presentation.
pub struct RenderInput<'a> {
    pub is_observable: bool,
    pub is_error: bool,
    pub value: Option<&'a Scalar>,
    pub error: Option<&'a ErrorText>,
    pub observable_index: usize,
    pub value_index: usize,
}

/// Presentation returned by a renderer; `None` fields fall through to the
/// builder's defaults (error items get no default color).
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub text: Option<String>,
    pub text_style: Option<TextStyle>,
    pub tooltip: Option<TooltipSpec>,
    pub color: Option<Color>,
}

/// Pluggable value-rendering policy.
pub trait ValueRenderer {
    fn render(&self, input: RenderInput<'_>) -> Rendered;
}

/// Stock presentation policy.
///
/// Nested-observable markers get nothing (their shape is the marker).
/// Errors surface their text as a tooltip. Structured values collapse to an
/// ellipsis with a monospace, whitespace-preserving tooltip. Other scalars
/// are shown inline when they fit in three characters, otherwise as an
/// ellipsis with the full text in a tooltip.
pub struct DefaultRenderer;

impl ValueRenderer for DefaultRenderer {
    fn render(&self, input: RenderInput<'_>) -> Rendered {
        if input.is_observable {
            return Rendered::default();
        }

        if input.is_error {
            let text = input
                .error
                .map(ErrorText::to_string)
                .unwrap_or_default();
            return Rendered {
                tooltip: Some(TooltipSpec::text(text)),
                ..Rendered::default()
            };
        }

        let Some(value) = input.value else {
            return Rendered::default();
        };

        if let Scalar::Structured(body) = value {
            return Rendered {
                text: Some("...".to_string()),
                tooltip: Some(TooltipSpec {
                    text: body.clone(),
                    text_style: Some(TextStyle::monospace_pre()),
                    ..TooltipSpec::default()
                }),
                ..Rendered::default()
            };
        }

        let text = value.to_string();
        if text.chars().count() <= 3 {
            return Rendered {
                text: Some(text),
                ..Rendered::default()
            };
        }

        Rendered {
            text: Some("...".to_string()),
            tooltip: Some(TooltipSpec::text(text)),
            ..Rendered::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(value: &Scalar) -> Rendered {
        DefaultRenderer.render(RenderInput {
            is_observable: false,
            is_error: false,
            value: Some(value),
            error: None,
            observable_index: 0,
            value_index: 0,
        })
    }

    #[test]
    fn short_values_stay_inline() {
        let rendered = render(&Scalar::Int(-42));
        assert_eq!(rendered.text.as_deref(), Some("-42"));
        assert!(rendered.tooltip.is_none());
    }

    #[test]
    fn long_values_collapse_to_ellipsis_with_tooltip() {
        let rendered = render(&Scalar::from("hello"));
        assert_eq!(rendered.text.as_deref(), Some("..."));
        assert_eq!(rendered.tooltip.map(|t| t.text).as_deref(), Some("hello"));
    }

    #[test]
    fn structured_values_get_monospace_pre_tooltips() {
        let rendered = render(&Scalar::Structured("{\n  \"a\": 1\n}".into()));
        assert_eq!(rendered.text.as_deref(), Some("..."));
        let tooltip = rendered.tooltip.expect("structured values carry a tooltip");
        assert_eq!(tooltip.text, "{\n  \"a\": 1\n}");
        let style = tooltip.text_style.expect("tooltip should be monospace");
        assert_eq!(style.font_family.as_deref(), Some("monospace"));
        assert_eq!(style.white_space.as_deref(), Some("pre"));
    }

    #[test]
    fn observables_and_errors() {
        let marker = DefaultRenderer.render(RenderInput {
            is_observable: true,
            is_error: false,
            value: None,
            error: None,
            observable_index: 0,
            value_index: 0,
        });
        assert!(marker.text.is_none() && marker.tooltip.is_none());

        let error = DefaultRenderer.render(RenderInput {
            is_observable: false,
            is_error: true,
            value: None,
            error: Some(&ErrorText::message("boom")),
            observable_index: 0,
            value_index: 0,
        });
        assert_eq!(error.tooltip.map(|t| t.text).as_deref(), Some("boom"));
    }
}
