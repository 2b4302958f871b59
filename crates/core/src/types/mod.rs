//! Shared domain types.

mod credential;
mod email;
mod id;
mod inquiry;
mod status;

pub use credential::AdminCredential;
pub use email::{Email, EmailError};
pub use id::InquiryId;
pub use inquiry::{Inquiry, NewInquiry, ValidationError};
pub use status::InquiryStatus;
