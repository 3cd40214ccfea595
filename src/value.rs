//! Dynamically-typed value carried by the compact text and JSON trie forms.

use std::fmt;

use indexmap::IndexMap;

use crate::rle::Token;

/// Object member key, held as UTF-16 code units.
///
/// Trie edges may split a surrogate pair between a parent and a child key, so
/// a key on its own is not always valid text. Names are only turned into
/// strings once every edge on their path has been joined.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Key(Vec<u16>);

impl Key {
    pub fn from_units(units: Vec<u16>) -> Self {
        Self(units)
    }

    #[inline]
    pub fn units(&self) -> &[u16] {
        &self.0
    }

    /// Append `tail` to this key
    pub fn extend(&mut self, tail: &Key) {
        self.0.extend_from_slice(&tail.0);
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf16_lossy(&self.0))
    }
}

/// A JSON-like value.
///
/// Objects keep their members in insertion order; a repeated key replaces the
/// earlier value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(IndexMap<Key, Value>),
}

impl Value {
    /// Text of a scalar leaf as the expander consumes it.
    ///
    /// Strings come back as-is and numbers in their shortest decimal form
    /// (integral values without a fraction). Other variants have no text.
    pub fn leaf_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Number(n) => Some(format_number(*n)),
            _ => None,
        }
    }
}

/// Decimal form of a number, integral values without a trailing `.0`
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

impl From<&Token> for Value {
    fn from(token: &Token) -> Self {
        match token {
            Token::Number(n) => Self::Number(*n as f64),
            Token::Text(s) => Self::String(s.clone()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(members) => {
                Self::Object(members.into_iter().map(|(k, v)| (Key::from(k), Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}
