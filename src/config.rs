//! Locate and validate our settings within the deployment tool's service
//! definition.
//!
//! Validation happens exactly once, when the [Notifier][crate::notifier::Notifier]
//! is constructed. The resulting [SlackConfig] is immutable thereafter.

pub mod definition;
pub mod error;

use self::{
    definition::{RawSlackConfig, ServiceDefinition},
    error::ConfigError,
};
use std::{fs, path::Path};
use url::Url;

/// Validated webhook settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SlackConfig {
    pub webhook_url: Url,
    pub user: Option<String>,
    pub emoji: Option<String>,
    pub channel: Option<String>,
    pub function_deploy_message: Option<String>,
    pub service_deploy_message: Option<String>,
    /// `None` means every stage is reportable.
    pub reportable_stages: Option<Vec<String>>,
}

impl SlackConfig {
    /// Whether notifications should be sent for deployments to `stage`.
    pub fn is_reportable(&self, stage: &str) -> bool {
        match &self.reportable_stages {
            Some(stages) => stages.iter().any(|s| s == stage),
            None => true,
        }
    }
}

/// Read a JSON service definition from disk.
pub fn load<P: AsRef<Path>>(path: P) -> Result<ServiceDefinition, ConfigError> {
    let raw = fs::read_to_string(path)?;

    Ok(serde_json::from_str(&raw)?)
}

/// Find our settings in the service definition, failing if they're absent or
/// lack a usable webhook URL.
pub fn validate(def: &ServiceDefinition) -> Result<SlackConfig, ConfigError> {
    let raw = def
        .custom
        .slack
        .as_ref()
        .ok_or(ConfigError::MissingConfiguration)?;

    // Parsing normalises the URL, e.g. `https://example.com` gains a trailing
    // slash. Slack hook URLs always have a path, so they're unaffected.
    let webhook_url = raw
        .webhook_url
        .as_deref()
        .ok_or(ConfigError::MissingWebhookURL)
        .and_then(|x| Url::parse(x).map_err(ConfigError::from))?;

    let RawSlackConfig {
        user,
        emoji,
        channel,
        function_deploy_message,
        service_deploy_message,
        reportable,
        ..
    } = raw;

    Ok(SlackConfig {
        webhook_url,
        user: user.clone(),
        emoji: emoji.clone(),
        channel: channel.clone(),
        function_deploy_message: function_deploy_message.clone(),
        service_deploy_message: service_deploy_message.clone(),
        reportable_stages: reportable.as_ref().and_then(|r| r.stages.clone()),
    })
}
