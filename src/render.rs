use serde_json::Value;
use crate::error::SampleError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    /// Two-space indentation.
    #[default]
    Pretty,
    Compact,
}

/// JSON text for a resolved sample; an absent sample renders as `null`.
pub fn render(value: Option<&Value>, style: Style) -> Result<String, SampleError> {
    let value = value.unwrap_or(&Value::Null);
    let text = match style {
        Style::Pretty => serde_json::to_string_pretty(value)?,
        Style::Compact => serde_json::to_string(value)?,
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pretty_keeps_insertion_order() {
        let value = json!({ "zeta": 0, "alpha": [""] });
        let text = render(Some(&value), Style::Pretty).unwrap();
        assert_eq!(text, "{\n  \"zeta\": 0,\n  \"alpha\": [\n    \"\"\n  ]\n}");
    }

    #[test]
    fn compact_and_absent() {
        assert_eq!(render(Some(&json!({ " ": 0.0 })), Style::Compact).unwrap(), r#"{" ":0.0}"#);
        assert_eq!(render(None, Style::Pretty).unwrap(), "null");
    }
}
