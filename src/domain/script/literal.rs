//! Script literals and the single encoder that renders them.
//!
//! Every value that originates outside the crate (queries, engine ids from
//! project configuration, asset paths) reaches script text only through
//! [`ScriptEncoder::literal`].

use std::fmt::Write;

/// A value passed into the scripting session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLiteral {
    Str(String),
    Int(i64),
    Bool(bool),
    None,
}

impl From<&str> for ScriptLiteral {
    fn from(value: &str) -> Self {
        ScriptLiteral::Str(value.to_string())
    }
}

impl From<String> for ScriptLiteral {
    fn from(value: String) -> Self {
        ScriptLiteral::Str(value)
    }
}

impl From<i64> for ScriptLiteral {
    fn from(value: i64) -> Self {
        ScriptLiteral::Int(value)
    }
}

impl From<bool> for ScriptLiteral {
    fn from(value: bool) -> Self {
        ScriptLiteral::Bool(value)
    }
}

/// Renders literals as script source.
///
/// String output is single-quoted and pure ASCII: quotes and backslashes are
/// escaped, control characters become `\xNN`, and anything outside ASCII
/// becomes `\uNNNN` or `\UNNNNNNNN`.
pub struct ScriptEncoder;

impl ScriptEncoder {
    /// Renders any literal.
    pub fn literal(value: &ScriptLiteral) -> String {
        match value {
            ScriptLiteral::Str(s) => Self::string(s),
            ScriptLiteral::Int(i) => i.to_string(),
            ScriptLiteral::Bool(true) => "True".to_string(),
            ScriptLiteral::Bool(false) => "False".to_string(),
            ScriptLiteral::None => "None".to_string(),
        }
    }

    /// Renders a string literal.
    pub fn string(value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for c in value.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                    let _ = write!(out, "\\x{:02x}", c as u32);
                }
                c if c.is_ascii() => out.push(c),
                c if (c as u32) <= 0xffff => {
                    let _ = write!(out, "\\u{:04x}", c as u32);
                }
                c => {
                    let _ = write!(out, "\\U{:08x}", c as u32);
                }
            }
        }
        out.push('\'');
        out
    }
}
