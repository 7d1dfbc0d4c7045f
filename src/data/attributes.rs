//! Free-form attribute metadata.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Ordered attribute bag attached to datasets, dimensions and variables.
pub type Attributes = IndexMap<String, AttrValue>;

/// A single attribute value.
///
/// The set of shapes is closed so the metadata side file can always be
/// written without loss.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating point scalar.
    Float(f64),
    /// Text.
    Str(String),
    /// Integer sequence.
    Ints(Vec<i64>),
    /// Floating point sequence.
    Floats(Vec<f64>),
    /// Text sequence.
    Strs(Vec<String>),
}

impl AttrValue {
    /// Borrow the value as text, if it is a single string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret the value as a single number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Ints(v) if v.len() == 1 => Some(v[0] as f64),
            Self::Floats(v) if v.len() == 1 => Some(v[0]),
            Self::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Str(v) => f.write_str(v),
            Self::Ints(v) => write!(f, "{:?}", v),
            Self::Floats(v) => write!(f, "{:?}", v),
            Self::Strs(v) => f.write_str(&v.join(", ")),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_views() {
        assert_eq!(AttrValue::Int(-9999).as_f64(), Some(-9999.0));
        assert_eq!(AttrValue::Floats(vec![1.5]).as_f64(), Some(1.5));
        assert_eq!(AttrValue::Floats(vec![1.5, 2.0]).as_f64(), None);
        assert_eq!(AttrValue::from("m").as_str(), Some("m"));
        assert_eq!(AttrValue::Bool(true).as_str(), None);
    }

    #[test]
    fn serializes_untagged() {
        let mut attrs = Attributes::new();
        attrs.insert("units".to_string(), "degF".into());
        attrs.insert("_FillValue".to_string(), AttrValue::Float(-9999.0));
        attrs.insert("flags".to_string(), AttrValue::Ints(vec![1, 2]));

        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"units":"degF","_FillValue":-9999.0,"flags":[1,2]}"#);
    }
}
