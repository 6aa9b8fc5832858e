use std::sync::Arc;
use std::time::Duration;

use crate::api::auth::AuthApi;
use crate::api::client::ApiClient;
use crate::api::customers::CustomerApi;
use crate::api::users::UserApi;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::customers::CustomerQueryService;
use crate::services::guard::SessionGuard;
use crate::services::users::UserDirectory;
use crate::store::session::SessionStore;

/// The application's state: the session guard plus the services built on
/// top of it, sharing one HTTP client.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Config,
    /// The session guard. Single owner of the session.
    pub guard: Arc<SessionGuard>,
    /// The customer query service.
    pub customers: CustomerQueryService,
    /// Admin user management.
    pub users: UserDirectory,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Network(format!("HTTP client build failed: {}", e)))?;
        tracing::info!(
            "✅ HTTP client initialized ({}s timeout)",
            config.request_timeout_secs
        );

        let store = SessionStore::new(config.session_file.clone());
        let auth = AuthApi::new(http.clone(), config.api_base_url.clone());
        let guard = Arc::new(SessionGuard::new(auth, store));
        tracing::info!("✅ Session guard initialized");

        let client = ApiClient::new(http, config.api_base_url.clone(), guard.clone());
        let customers = CustomerQueryService::new(CustomerApi::new(client.clone()));
        let users = UserDirectory::new(UserApi::new(client), guard.clone());
        tracing::info!("✅ API services initialized: {}", config.api_base_url);

        Ok(AppState {
            config: config.clone(),
            guard,
            customers,
            users,
        })
    }
}
