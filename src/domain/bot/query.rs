//! User queries and the bot's answers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::BotError;

/// A sanitised user question: percent-decoded and trimmed.
///
/// No further validation happens here; an empty question is passed to the
/// bot unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Decodes `%XX` escapes (a `+` stays a `+`) and trims surrounding whitespace.
    ///
    /// # Errors
    ///
    /// `BotError::Decoding` if a `%` is not followed by two hex digits, or the
    /// decoded bytes are not UTF-8.
    pub fn from_encoded(raw: &str) -> Result<Self, BotError> {
        let bytes = raw.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' {
                let escape = bytes.get(i + 1..i + 3);
                if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                    return Err(BotError::decoding(format!(
                        "malformed escape sequence at byte {}",
                        i
                    )));
                }
                i += 3;
            } else {
                i += 1;
            }
        }

        let decoded = urlencoding::decode(raw).map_err(|e| BotError::decoding(e.to_string()))?;
        Ok(Self(decoded.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whatever the bot returned, untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryResult(String);

impl QueryResult {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Parses the answer shape the stock model bot produces.
    ///
    /// Callers opt into this; the dispatcher itself never interprets results.
    pub fn parse_answer(&self) -> Result<BotAnswer, serde_json::Error> {
        serde_json::from_str(&self.0)
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured answer: a short conclusion plus the supporting detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotAnswer {
    pub conclusion: String,
    pub detailed_answer: String,
}
