//! Inquiry records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Email, InquiryId, InquiryStatus};

/// Errors produced when validating inquiry input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required free-text field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// A customer inquiry, the primary business record.
///
/// `id` and `date` are assigned by the store at creation and never change.
/// `status` is the only mutable field; it is changed exclusively through an
/// admin status update. Records are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: InquiryId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub product: String,
    pub message: String,
    pub date: DateTime<Utc>,
    pub status: InquiryStatus,
}

/// Validated input for a new inquiry.
///
/// The email is structurally validated by the [`Email`] type at parse time;
/// the remaining required fields are checked by [`NewInquiry::validate`],
/// which the store calls before assigning an id.
#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub product: String,
    pub message: String,
}

impl NewInquiry {
    /// Check that all required free-text fields are non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` naming the first empty field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.product.trim().is_empty() {
            return Err(ValidationError::MissingField("product"));
        }
        if self.message.trim().is_empty() {
            return Err(ValidationError::MissingField("message"));
        }
        Ok(())
    }
}
