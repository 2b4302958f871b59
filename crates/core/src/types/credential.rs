//! Admin credential record.

use serde::{Deserialize, Serialize};

use super::Email;

/// The single admin identity, as persisted to disk.
///
/// Exactly one credential record exists; it is created on first boot if
/// absent and has no update path. The password is stored only as a one-way
/// hash (argon2 PHC string), never as plaintext. Field names serialize in
/// camelCase so the persisted document reads `{id, passwordHash, email}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredential {
    pub id: String,
    pub password_hash: String,
    pub email: Email,
}
