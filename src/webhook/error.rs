use reqwest::StatusCode;
use std::fmt;

/// Sum type representing every way a single delivery attempt can fail.
#[derive(Debug)]
pub enum WebhookError {
    RequestFailed(reqwest::Error),
    UnexpectedStatus(StatusCode),
}

impl From<reqwest::Error> for WebhookError {
    fn from(e: reqwest::Error) -> Self {
        WebhookError::RequestFailed(e)
    }
}

impl fmt::Display for WebhookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            WebhookError::RequestFailed(e) => format!("Webhook request failed: {:?}", e),
            WebhookError::UnexpectedStatus(s) => format!("Webhook returned status: {}", s),
        };

        write!(f, "{}", x)
    }
}
