use thiserror::Error;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A locally detectable bad input (malformed query, empty field, bad email).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An authentication error (invalid credentials, expired/invalid token).
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// An authorization error.
    #[error("Authorization failed")]
    Forbidden,

    /// A resource not found error.
    #[error("Resource not found")]
    NotFound,

    /// A network error: collaborator unreachable, or a non-2xx response
    /// not otherwise classified.
    #[error("Network error: {0}")]
    Network(String),

    /// A JSON serialization or parse error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error (session store reads/writes).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            AppError::Network(format!("Connection failed: {}", err))
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl AppError {
    /// Returns a message safe to show in the UI. Transport and parser
    /// details are logged here and collapsed to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => {
                tracing::debug!("Validation error: {}", msg);
                msg.clone()
            }
            AppError::Auth(msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                msg.clone()
            }
            AppError::Forbidden => {
                tracing::warn!("Authorization failed");
                "You do not have permission to do that".to_string()
            }
            AppError::NotFound => {
                tracing::debug!("Resource not found");
                "The requested record was not found".to_string()
            }
            AppError::Network(msg) => {
                tracing::error!("Network error: {}", msg);
                "The server could not be reached. Please try again".to_string()
            }
            AppError::Serialization(msg) => {
                tracing::error!("Serialization error: {}", msg);
                "The server returned an unexpected response".to_string()
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {}", e);
                "A local storage error occurred".to_string()
            }
        }
    }

    /// True for errors that should send the user back to the login screen.
    pub fn requires_login(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }
}
