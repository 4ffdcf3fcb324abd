use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response from federation endpoint: {0}")]
    Protocol(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("MFA code must be numeric")]
    InvalidMfaCode,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Browser launch failed: {0}")]
    BrowserLaunchFailed(String),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
