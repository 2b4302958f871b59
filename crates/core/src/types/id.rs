//! Inquiry identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for an inquiry.
///
/// Ids are derived from the Unix-millisecond timestamp at creation, which
/// makes them naturally sortable newest-first and unique enough for a
/// single-store lifetime. The store is responsible for disambiguating two
/// inquiries created within the same millisecond; this type carries the
/// value without interpreting it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InquiryId(String);

impl InquiryId {
    /// Create an id from a raw string value.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Create an id from a Unix-millisecond timestamp.
    #[must_use]
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id and return its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for InquiryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InquiryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for InquiryId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for InquiryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
