//! Flat-file JSON document stores.
//!
//! The backend persists two documents under the configured data directory:
//!
//! - `inquiries.json` - `{"inquiries": [...]}`, owned by [`InquiryStore`]
//! - `admin.json` - the single admin credential, owned by [`CredentialStore`]
//!
//! Every mutation reads the current document, applies the change in memory,
//! and writes the whole document back. Within the process all inquiry-store
//! access is serialized behind one async mutex, so read-modify-write cycles
//! never interleave. Concurrent writers in *other* processes can still race;
//! running a single instance per data directory is assumed.

pub mod admin;
pub mod inquiries;

pub use admin::CredentialStore;
pub use inquiries::{InquiryFilter, InquiryPage, InquiryStore};

use thiserror::Error;

use amberleaf_core::ValidationError;

/// Errors produced by the document stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but does not parse as the expected document.
    #[error("corrupt store document: {0}")]
    DataCorruption(#[from] serde_json::Error),

    /// No record with the requested id exists.
    #[error("not found: {0}")]
    NotFound(String),

    /// The input failed field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Hashing the default admin password failed.
    #[error("password hashing failed")]
    PasswordHash,
}
