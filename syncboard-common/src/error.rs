// ================================================================
// File: syncboard-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Timeout error: {0}")]
    Timeout(#[from] tokio::time::error::Elapsed),

    /// The server bounced us to its login page, i.e. no valid `userid` cookie.
    #[error("Not logged in: server redirected to {0}")]
    NotLoggedIn(String),

    #[error("Integration '{0}' does not support linking yet")]
    NotLinkable(String),

    #[error("A link request for '{0}' is already in flight")]
    LinkInProgress(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("View was torn down before the request completed")]
    Cancelled,
}

impl Error {
    /// True for the failures the view should surface as an `Error` label:
    /// transport, status, body and schema problems.
    pub fn is_request_failure(&self) -> bool {
        !matches!(
            self,
            Error::NotLinkable(_)
                | Error::LinkInProgress(_)
                | Error::Navigation(_)
                | Error::Cancelled
        )
    }
}
