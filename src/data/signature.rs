//! Dimension signatures.

use serde::Serialize;
use std::fmt;

/// The ordered dimension names a variable depends on.
///
/// Order is significant: `(time, height)` and `(height, time)` describe
/// different storage layouts and never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Signature(Vec<String>);

impl Signature {
    /// Create a signature from dimension names.
    pub fn new<I, S>(dims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(dims.into_iter().map(Into::into).collect())
    }

    /// The signature of a scalar variable.
    pub fn scalar() -> Self {
        Self(Vec::new())
    }

    /// Number of dimensions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the scalar signature.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dimension names in declared order.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Iterate over dimension names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Position of a dimension within the signature.
    pub fn position(&self, dim: &str) -> Option<usize> {
        self.0.iter().position(|d| d == dim)
    }

    /// Whether the signature mentions `dim`.
    pub fn contains(&self, dim: &str) -> bool {
        self.position(dim).is_some()
    }

    /// Dot-joined dimension names, used to suffix output keys.
    pub fn key_suffix(&self) -> String {
        self.0.join(".")
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

impl<S: Into<String>> FromIterator<S> for Signature {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}
