//! Vertex payload values.

use serde::Serialize;

/// The value carried by a vertex.
///
/// Values loaded from text are type-sniffed with [`Value::parse`]; values
/// entered programmatically may be any variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// `true` or `false`.
    Bool(bool),
    /// A signed 64-bit integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// Anything else.
    Text(String),
}

impl Value {
    /// Sniff a token: bool, then integer, then float, then text.
    pub fn parse(token: &str) -> Self {
        match token {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(i) = token.parse::<i64>() {
            return Self::Int(i);
        }
        if let Ok(f) = token.parse::<f64>() {
            return Self::Float(f);
        }
        Self::Text(token.to_string())
    }

    /// Return a short name for the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }

    /// Whether the rendered value is a single whitespace-free token that
    /// [`Value::parse`] reads back as the same value.
    ///
    /// Text that looks like a bool or a number (`"1"`, `"true"`, `"2.5"`)
    /// is not a token: it would reload as a different variant.
    pub fn is_token(&self) -> bool {
        match self {
            Self::Text(s) => {
                !s.is_empty()
                    && !s.chars().any(char::is_whitespace)
                    && matches!(Self::parse(s), Self::Text(ref parsed) if parsed == s)
            }
            _ => true,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            // Keep a decimal point so the value re-parses as a float.
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
