use std::{fmt, io};

/// Everything that can prevent the notifier from being set up. All of these
/// indicate a setup mistake and should abort loudly.
#[derive(Debug)]
pub enum ConfigError {
    Read(io::Error),
    Parse(serde_json::Error),
    MissingConfiguration,
    MissingWebhookURL,
    InvalidWebhookURL(url::ParseError),
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Read(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(e: url::ParseError) -> Self {
        ConfigError::InvalidWebhookURL(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            ConfigError::Read(e) => format!("Could not read service definition: {}", e),
            ConfigError::Parse(e) => format!("Could not parse service definition: {}", e),
            ConfigError::MissingConfiguration => "No Slack options set in config".into(),
            ConfigError::MissingWebhookURL => "No Slack webhook url set in config".into(),
            ConfigError::InvalidWebhookURL(e) => format!("Invalid Slack webhook url: {}", e),
        };

        write!(f, "{}", x)
    }
}
