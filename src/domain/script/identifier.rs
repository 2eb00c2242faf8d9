//! Validated identifiers for names that appear verbatim in script text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

const RESERVED_WORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// A name that is safe to splice into script text unquoted.
///
/// Variable, module, class, method and keyword-argument names are the only
/// values rendered outside a string literal, so they are restricted to
/// ASCII identifiers that are not reserved words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScriptIdentifier(String);

impl ScriptIdentifier {
    /// Validates and wraps an identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let mut chars = name.chars();
        let first = chars
            .next()
            .ok_or_else(|| ValidationError::empty_field("identifier"))?;

        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(ValidationError::invalid_format(
                "identifier",
                format!("'{}' must start with a letter or underscore", name),
            ));
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::invalid_format(
                "identifier",
                format!("'{}' may only contain letters, digits and underscores", name),
            ));
        }
        if RESERVED_WORDS.contains(&name.as_str()) {
            return Err(ValidationError::invalid_format(
                "identifier",
                format!("'{}' is a reserved word", name),
            ));
        }
        Ok(Self(name))
    }

    /// Wraps a built-in name known to be valid.
    pub(crate) fn from_static(name: &'static str) -> Self {
        debug_assert!(Self::new(name).is_ok(), "invalid built-in identifier {name}");
        Self(name.to_string())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScriptIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ScriptIdentifier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ScriptIdentifier {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScriptIdentifier> for String {
    fn from(value: ScriptIdentifier) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        for name in ["my_bot", "_private", "ModelBot", "engine2"] {
            assert!(ScriptIdentifier::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            ScriptIdentifier::new(""),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn rejects_leading_digit() {
        assert!(ScriptIdentifier::new("2bot").is_err());
    }

    #[test]
    fn rejects_injection_attempts() {
        assert!(ScriptIdentifier::new("my_bot; import os").is_err());
        assert!(ScriptIdentifier::new("a.b").is_err());
        assert!(ScriptIdentifier::new("x'").is_err());
    }

    #[test]
    fn rejects_reserved_words() {
        assert!(ScriptIdentifier::new("import").is_err());
        assert!(ScriptIdentifier::new("None").is_err());
    }

    #[test]
    fn rejects_non_ascii() {
        assert!(ScriptIdentifier::new("bötchen").is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: ScriptIdentifier = serde_json::from_str("\"my_bot\"").unwrap();
        assert_eq!(ok.as_str(), "my_bot");
        assert!(serde_json::from_str::<ScriptIdentifier>("\"not valid\"").is_err());
    }
}
