//! Rendering of failure messages.

use crate::value::Value;

/// Prefix of the line describing the expectation.
pub const EXPECTED_PREFIX: &str = "  Expected: ";

/// Prefix of the line showing the observed value.
pub const ACTUAL_PREFIX: &str = "  But was:  ";

/// Limits applied when values are rendered into messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Strings longer than this are clipped with `...`. Zero disables clipping.
    pub max_string_length: usize,
    /// Lists show at most this many items. Zero shows all of them.
    pub max_items: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_string_length: 0,
            max_items: 10,
        }
    }
}

/// Accumulates the text of a failure message.
#[derive(Debug, Clone)]
pub struct MessageWriter {
    options: RenderOptions,
    text: String,
}

impl MessageWriter {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            text: String::new(),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Writes the user-supplied message on its own line. Empty messages
    /// write nothing.
    pub fn write_message_line(&mut self, message: &str) {
        if message.is_empty() {
            return;
        }
        self.text.push_str("  ");
        self.text.push_str(message);
        self.text.push('\n');
    }

    pub fn start_expected_line(&mut self) {
        self.text.push_str(EXPECTED_PREFIX);
    }

    pub fn start_actual_line(&mut self) {
        self.text.push_str(ACTUAL_PREFIX);
    }

    pub fn end_line(&mut self) {
        self.text.push('\n');
    }

    pub fn write_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Writes a predicate word followed by a space, e.g. `greater than `.
    pub fn write_predicate(&mut self, predicate: &str) {
        self.text.push_str(predicate);
        self.text.push(' ');
    }

    /// Writes a connective between two descriptions, e.g. ` and `.
    pub fn write_connector(&mut self, connector: &str) {
        self.text.push(' ');
        self.text.push_str(connector);
        self.text.push(' ');
    }

    pub fn write_value(&mut self, value: &Value) {
        let rendered = self.format_value(value);
        self.text.push_str(&rendered);
    }

    /// Renders a value the way it appears in failure messages: strings
    /// quoted and clipped, lists as `< a, b >`.
    pub fn format_value(&self, value: &Value) -> String {
        match value {
            Value::Null => String::from("null"),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format!("{f:?}"),
            Value::Str(s) => format!("\"{}\"", self.clip(s)),
            Value::List(items) if items.is_empty() => String::from("<empty>"),
            Value::List(items) => {
                let limit = match self.options.max_items {
                    0 => items.len(),
                    n => n.min(items.len()),
                };
                let mut parts: Vec<String> =
                    items[..limit].iter().map(|v| self.format_value(v)).collect();
                if limit < items.len() {
                    parts.push(String::from("..."));
                }
                format!("< {} >", parts.join(", "))
            }
            Value::Object(o) => o.render(),
            Value::Code(_) => String::from("<code>"),
        }
    }

    fn clip(&self, s: &str) -> String {
        let max = self.options.max_string_length;
        if max == 0 || s.chars().count() <= max {
            return s.to_string();
        }
        let mut clipped: String = s.chars().take(max.saturating_sub(3)).collect();
        clipped.push_str("...");
        clipped
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl Default for MessageWriter {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_scalars() {
        let w = MessageWriter::default();
        assert_eq!(w.format_value(&Value::Null), "null");
        assert_eq!(w.format_value(&Value::from(1.5)), "1.5");
        assert_eq!(w.format_value(&Value::from(f64::NAN)), "NaN");
        assert_eq!(w.format_value(&Value::from("x")), "\"x\"");
    }

    #[test]
    fn test_format_list_limits_items() {
        let w = MessageWriter::new(RenderOptions {
            max_string_length: 0,
            max_items: 2,
        });
        assert_eq!(w.format_value(&Value::from(vec![1, 2, 3])), "< 1, 2, ... >");
        assert_eq!(w.format_value(&Value::List(Vec::new())), "<empty>");
    }

    #[test]
    fn test_clip_long_strings() {
        let w = MessageWriter::new(RenderOptions {
            max_string_length: 8,
            max_items: 0,
        });
        assert_eq!(w.format_value(&Value::from("abcdefghijkl")), "\"abcde...\"");
        assert_eq!(w.format_value(&Value::from("abc")), "\"abc\"");
    }

    #[test]
    fn test_message_line_skips_empty() {
        let mut w = MessageWriter::default();
        w.write_message_line("");
        assert_eq!(w.as_str(), "");
        w.write_message_line("count mismatch");
        assert_eq!(w.as_str(), "  count mismatch\n");
    }
}
