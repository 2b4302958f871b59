//! End-to-end tests for the Amberleaf Exports backend.
//!
//! Each test spawns the real router on an ephemeral port with a scratch
//! data directory, then drives it over HTTP with `reqwest`. The file-backed
//! stores need nothing beyond a temp directory, so these tests run
//! self-contained - no external services required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p amberleaf-integration-tests
//! ```

use std::net::Ipv4Addr;
use std::path::PathBuf;

use secrecy::SecretString;
use uuid::Uuid;

use amberleaf_core::Email;
use amberleaf_server::config::ServerConfig;
use amberleaf_server::routes;
use amberleaf_server::state::AppState;

/// Signing secret used by test servers. Irrelevant for security; only has
/// to be consistent within one server instance.
const TEST_TOKEN_SECRET: &str = "e2e-signing-k3y-9f8e7d6c5b4a39281706f5e4d3c2b1a0";

/// A running test instance of the inquiry service.
pub struct TestServer {
    /// Base URL of the spawned server, e.g. `http://127.0.0.1:49321`.
    pub base_url: String,
    data_dir: PathBuf,
}

impl TestServer {
    /// Spawn the service on an ephemeral port with a fresh data directory.
    ///
    /// The default admin credential is seeded exactly as on a production
    /// first boot. SMTP is left unconfigured, so no notification emails are
    /// attempted.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be bootstrapped; tests cannot proceed
    /// without it.
    pub async fn spawn() -> Self {
        let data_dir = std::env::temp_dir().join(format!("amberleaf-e2e-{}", Uuid::new_v4()));

        let config = ServerConfig {
            host: Ipv4Addr::LOCALHOST.into(),
            port: 0,
            data_dir: data_dir.clone(),
            token_secret: SecretString::from(TEST_TOKEN_SECRET),
            notify_email: Email::parse("admin@amberleafexports.com").expect("valid test email"),
            email: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };

        let state = AppState::new(config);
        state
            .init_stores()
            .await
            .expect("Failed to initialize document stores");

        let app = routes::routes().with_state(state);

        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has a local address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            data_dir,
        }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Best-effort scratch cleanup; the OS owns the temp dir anyway
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}
