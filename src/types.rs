use thiserror::Error;

/// Error surface for the status monitor.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Syncthing API error: {0}")]
    Syncthing(String),

    #[error("no API key found in any Syncthing config file")]
    MissingApiKey,
}
