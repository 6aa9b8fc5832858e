use std::env;
use std::path::PathBuf;
use anyhow::{Context, Result};

/// Default request timeout in seconds. The collaborator specifies no
/// timeout, so this is the chosen bound.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The application's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// The base URL of the CRM REST API, e.g. `http://localhost:5000/api`.
    pub api_base_url: String,
    /// The per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Where the persisted session record lives.
    pub session_file: PathBuf,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let api_base_url = env::var("CRM_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000/api".to_string());

        let request_timeout_secs = env::var("CRM_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .context("Invalid CRM_REQUEST_TIMEOUT_SECS")?;

        let session_file = env::var("CRM_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".crmdesk_session.json"));

        if api_base_url.trim_end_matches('/').is_empty() {
            anyhow::bail!("CRM_API_URL must not be empty");
        }

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout_secs,
            session_file,
        })
    }
}
