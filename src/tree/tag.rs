//! Tag registry for nodes.
//!
//! Typed nodes get their tag from this closed set instead of from a type
//! name. `Custom` covers anything else (including the transient empty tag).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Dict,
    Array,
    String,
    Integer,
    /// Rendered self-closing: `<true/>` / `<false/>`.
    Boolean,
    Custom(String),
}

impl Tag {
    pub fn as_str(&self) -> &str {
        match self {
            Tag::Dict => "dict",
            Tag::Array => "array",
            Tag::String => "string",
            Tag::Integer => "integer",
            Tag::Boolean => "boolean",
            Tag::Custom(name) => name,
        }
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        match name {
            "dict" => Tag::Dict,
            "array" => Tag::Array,
            "string" => Tag::String,
            "integer" => Tag::Integer,
            "boolean" => Tag::Boolean,
            other => Tag::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
