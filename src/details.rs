//! Structured step metadata.
//!
//! Step details are a string-keyed map of [`DetailValue`]s. Values are
//! restricted to what every renderer can print without inspecting types at
//! runtime: text, numbers, booleans and nested maps.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Insertion-ordered metadata attached to a step.
pub type Details = IndexMap<String, DetailValue>;

/// A single renderable metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    /// A boolean flag.
    Bool(bool),
    /// An integer or floating point number.
    Number(serde_json::Number),
    /// Free text.
    Text(String),
    /// A nested map of values.
    Map(Details),
}

impl fmt::Display for DetailValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailValue::Bool(b) => write!(f, "{b}"),
            DetailValue::Number(n) => write!(f, "{n}"),
            DetailValue::Text(s) => f.write_str(s),
            DetailValue::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for DetailValue {
    fn from(s: &str) -> Self {
        DetailValue::Text(s.to_string())
    }
}

impl From<String> for DetailValue {
    fn from(s: String) -> Self {
        DetailValue::Text(s)
    }
}

impl From<bool> for DetailValue {
    fn from(b: bool) -> Self {
        DetailValue::Bool(b)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for DetailValue {
                fn from(n: $t) -> Self {
                    DetailValue::Number(serde_json::Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl From<f64> for DetailValue {
    /// Non-finite floats have no JSON number form and are kept as text.
    fn from(n: f64) -> Self {
        match serde_json::Number::from_f64(n) {
            Some(num) => DetailValue::Number(num),
            None => DetailValue::Text(n.to_string()),
        }
    }
}

impl From<Details> for DetailValue {
    fn from(map: Details) -> Self {
        DetailValue::Map(map)
    }
}
