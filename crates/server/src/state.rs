//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::{AuthService, EmailService};
use crate::store::{CredentialStore, InquiryStore, StoreError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the document stores, and the optional email service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    inquiries: InquiryStore,
    credentials: CredentialStore,
    email: Option<EmailService>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// When SMTP is not configured (or the relay cannot be set up), the
    /// email service is absent and inquiry notifications are disabled; the
    /// rest of the service is unaffected.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let inquiries = InquiryStore::new(&config.data_dir);
        let credentials = CredentialStore::new(&config.data_dir);

        let email = match config.email.as_ref() {
            Some(email_config) => {
                match EmailService::new(email_config, config.notify_email.as_str()) {
                    Ok(service) => Some(service),
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "SMTP relay setup failed - inquiry notifications disabled"
                        );
                        None
                    }
                }
            }
            None => {
                tracing::warn!("SMTP not configured - inquiry notifications disabled");
                None
            }
        };

        Self {
            inner: Arc::new(AppStateInner {
                config,
                inquiries,
                credentials,
                email,
            }),
        }
    }

    /// Initialize the persisted documents: seed the default admin credential
    /// and create an empty inquiry collection if absent. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data directory or documents cannot be
    /// created.
    pub async fn init_stores(&self) -> Result<(), StoreError> {
        self.inner
            .credentials
            .ensure_initialized(&self.inner.config.notify_email)
            .await?;
        self.inner.inquiries.ensure_initialized().await
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the inquiry store.
    #[must_use]
    pub fn inquiries(&self) -> &InquiryStore {
        &self.inner.inquiries
    }

    /// Get a reference to the credential store.
    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        &self.inner.credentials
    }

    /// Get a reference to the email service, if configured.
    #[must_use]
    pub fn email(&self) -> Option<&EmailService> {
        self.inner.email.as_ref()
    }

    /// Build an authentication service over this state's credential store
    /// and signing secret.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.inner.credentials, &self.inner.config.token_secret)
    }
}
