//! Default values for unconnected inputs and string literal quoting

use serde::{Deserialize, Serialize};

/// Semantic type of an input slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotType {
    String,
    Number,
    Boolean,
    Any,
}

impl SlotType {
    /// Literal substituted when nothing is connected to a slot of this type
    #[must_use]
    pub fn default_literal(self) -> &'static str {
        match self {
            Self::String => "\"\"",
            Self::Number => "0",
            Self::Boolean => "false",
            Self::Any => "null",
        }
    }
}

/// How string literals are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quoting {
    /// Wrap in double quotes as-is. Text containing `"` or a line break
    /// yields invalid code.
    #[default]
    Verbatim,
    /// Backslash-escape `\` and `"`; line breaks become `\n` and `\r` so a
    /// literal never spans lines
    Escaped,
}

impl Quoting {
    /// Quote `text` as a string literal
    #[must_use]
    pub fn quote(self, text: &str) -> String {
        match self {
            Self::Verbatim => format!("\"{text}\""),
            Self::Escaped => {
                let mut out = String::with_capacity(text.len() + 2);
                out.push('"');
                for c in text.chars() {
                    match c {
                        '"' | '\\' => {
                            out.push('\\');
                            out.push(c);
                        }
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        _ => out.push(c),
                    }
                }
                out.push('"');
                out
            }
        }
    }
}

/// Shortest decimal form of a number; non-finite values fall back to the
/// Number default
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        SlotType::Number.default_literal().to_string()
    }
}
