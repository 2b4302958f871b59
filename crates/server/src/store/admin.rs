//! Credential store backed by `admin.json`.
//!
//! Holds exactly one admin identity. The record is seeded with a default
//! identity on first boot and has no update path; rotating the password
//! means editing or deleting the file while the server is stopped.

use std::path::{Path, PathBuf};

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use amberleaf_core::{AdminCredential, Email};

use super::StoreError;

/// File name of the persisted credential document.
const ADMIN_FILE: &str = "admin.json";

/// Login id of the seeded default admin.
pub const DEFAULT_ADMIN_ID: &str = "admin";

/// Password of the seeded default admin. Only ever stored hashed; meant to
/// be changed immediately after first boot.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Store for the single admin credential record.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store over `<data_dir>/admin.json`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(ADMIN_FILE),
        }
    }

    /// Seed the default credential if no record exists. Idempotent.
    ///
    /// The default identity is id `admin` with an argon2 hash of the default
    /// password, routed to `contact_email`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be created or
    /// `StoreError::PasswordHash` if hashing fails.
    pub async fn ensure_initialized(&self, contact_email: &Email) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(());
        }

        let credential = AdminCredential {
            id: DEFAULT_ADMIN_ID.to_owned(),
            password_hash: hash_password(DEFAULT_ADMIN_PASSWORD)?,
            email: contact_email.clone(),
        };

        let bytes = serde_json::to_vec_pretty(&credential)?;
        tokio::fs::write(&self.path, bytes).await?;

        tracing::warn!(
            id = DEFAULT_ADMIN_ID,
            "Default admin credential created with the default password. \
             Change it before exposing this instance."
        );
        Ok(())
    }

    /// Return the current credential record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if initialization never ran.
    pub async fn get(&self) -> Result<AdminCredential, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound("admin credential".to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| StoreError::PasswordHash)
}
