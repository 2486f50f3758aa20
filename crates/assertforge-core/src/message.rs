//! User-supplied failure messages.
//!
//! A message is a template with positional `{0}`, `{1}`, ... placeholders.
//! `{{` and `}}` stand for literal braces. The template is only formatted
//! when arguments were supplied; otherwise it is used verbatim.

use crate::error::FormatError;
use crate::value::Value;

/// Message template plus its arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    template: Option<String>,
    args: Vec<Value>,
}

impl Message {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: Some(template.into()),
            args: Vec::new(),
        }
    }

    /// No message. Failure text starts with the `Expected:` line.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Produces the final text.
    pub fn render(&self) -> Result<String, FormatError> {
        match &self.template {
            None => Ok(String::new()),
            Some(template) if self.args.is_empty() => Ok(template.clone()),
            Some(template) => format_template(template, &self.args),
        }
    }
}

impl From<&str> for Message {
    fn from(template: &str) -> Self {
        Message::new(template)
    }
}

impl From<String> for Message {
    fn from(template: String) -> Self {
        Message::new(template)
    }
}

impl From<Option<&str>> for Message {
    fn from(template: Option<&str>) -> Self {
        template.map(Message::new).unwrap_or_default()
    }
}

/// Substitutes positional placeholders in `template`.
pub fn format_template(template: &str, args: &[Value]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '{' if chars.peek().is_some_and(|&(_, n)| n == '{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let start = offset + 1;
                let end = loop {
                    match chars.next() {
                        Some((i, '}')) => break i,
                        Some(_) => {}
                        None => return Err(FormatError::UnmatchedBrace { brace: '{', offset }),
                    }
                };
                let placeholder = &template[start..end];
                let index: usize = placeholder.parse().map_err(|_| FormatError::InvalidPlaceholder {
                    placeholder: placeholder.to_string(),
                    offset,
                })?;
                let arg = args.get(index).ok_or(FormatError::MissingArgument {
                    index,
                    available: args.len(),
                })?;
                out.push_str(&arg.to_string());
            }
            '}' if chars.peek().is_some_and(|&(_, n)| n == '}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(FormatError::UnmatchedBrace { brace: '}', offset }),
            _ => out.push(c),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_without_args() {
        let msg = Message::new("value {0} was {wrong}");
        assert_eq!(msg.render().unwrap(), "value {0} was {wrong}");
        assert_eq!(Message::empty().render().unwrap(), "");
    }

    #[test]
    fn test_positional_substitution() {
        let msg = Message::new("{1} of {0}, {{literal}}").with_args(["total", "part"]);
        assert_eq!(msg.render().unwrap(), "part of total, {literal}");

        let msg = Message::new("count={0} ratio={1}").with_arg(3).with_arg(0.5);
        assert_eq!(msg.render().unwrap(), "count=3 ratio=0.5");
    }

    #[test]
    fn test_format_errors() {
        assert_eq!(
            format_template("{2}", &[Value::Int(1)]),
            Err(FormatError::MissingArgument { index: 2, available: 1 })
        );
        assert_eq!(
            format_template("a {x} b", &[Value::Null]),
            Err(FormatError::InvalidPlaceholder {
                placeholder: "x".to_string(),
                offset: 2
            })
        );
        assert_eq!(
            format_template("open {0", &[Value::Null]),
            Err(FormatError::UnmatchedBrace { brace: '{', offset: 5 })
        );
        assert_eq!(
            format_template("close }", &[Value::Null]),
            Err(FormatError::UnmatchedBrace { brace: '}', offset: 6 })
        );
    }
}
