use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a borrower.
///
/// Identifiers are opaque strings. Synthetic records get theirs from an
/// [`IdGenerator`](crate::simulation::synthetic::IdGenerator); records
/// entered by hand may use any non-empty string.
///
/// # Examples
///
/// ```
/// use loan_matcher::core::party::BorrowerId;
///
/// let a = BorrowerId::new("b-0001");
/// let b = BorrowerId::new("b-0002");
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BorrowerId(String);

impl BorrowerId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BorrowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BorrowerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Unique identifier for a lender.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LenderId(String);

impl LenderId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LenderId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
