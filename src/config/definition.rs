//! The subset of the deployment tool's service definition that we read.
//!
//! Only a handful of keys matter to us; everything else in the document is
//! ignored. An abridged example:
//!
//! ```json
//! {
//!     "service": "foobar",
//!     "provider": { "name": "aws", "region": "us-east-2" },
//!     "custom": {
//!         "slack": {
//!             "webhook_url": "https://hooks.slack.com/services/T000/B000/XXXX",
//!             "emoji": ":rocket:",
//!             "reportable": { "stages": ["staging", "production"] }
//!         }
//!     }
//! }
//! ```

use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};

/// The root of the service definition.
#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct ServiceDefinition {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub provider: Provider,
    #[serde(default)]
    pub custom: Custom,
}

#[serde_as]
#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct Provider {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub region: Option<String>,
}

/// The tool's free-form custom settings area. Other plugins keep their own
/// keys alongside ours.
#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct Custom {
    pub slack: Option<RawSlackConfig>,
}

/// Our settings as written by the user, prior to validation. Empty strings
/// are read as absent.
#[serde_as]
#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct RawSlackConfig {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub user: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub channel: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub function_deploy_message: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub service_deploy_message: Option<String>,
    pub reportable: Option<Reportable>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct Reportable {
    pub stages: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_definition() {
        let raw = r#"{
            "service": "foobar",
            "frameworkVersion": "3",
            "provider": {
                "name": "aws",
                "region": "us-east-2",
                "runtime": "nodejs18.x"
            },
            "custom": {
                "webpack": { "includeModules": true },
                "slack": {
                    "webhook_url": "https://example.com",
                    "user": "jd",
                    "emoji": ":cloud:",
                    "channel": "@user",
                    "function_deploy_message": "fn {{name}}",
                    "service_deploy_message": "svc {{service}}",
                    "reportable": { "stages": ["staging"] }
                }
            }
        }"#;

        let expected = ServiceDefinition {
            service: "foobar".to_string(),
            provider: Provider {
                region: Some("us-east-2".to_string()),
            },
            custom: Custom {
                slack: Some(RawSlackConfig {
                    webhook_url: Some("https://example.com".to_string()),
                    user: Some("jd".to_string()),
                    emoji: Some(":cloud:".to_string()),
                    channel: Some("@user".to_string()),
                    function_deploy_message: Some("fn {{name}}".to_string()),
                    service_deploy_message: Some("svc {{service}}".to_string()),
                    reportable: Some(Reportable {
                        stages: Some(vec!["staging".to_string()]),
                    }),
                }),
            },
        };

        assert_eq!(serde_json::from_str::<ServiceDefinition>(raw).unwrap(), expected);
    }

    #[test]
    fn test_sparse_definition() {
        let def: ServiceDefinition = serde_json::from_str(r#"{"custom": {"slack": {}}}"#).unwrap();

        assert_eq!(def.service, "");
        assert_eq!(def.provider.region, None);
        assert_eq!(def.custom.slack, Some(RawSlackConfig::default()));

        let def: ServiceDefinition = serde_json::from_str("{}").unwrap();
        assert_eq!(def.custom.slack, None);
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let def: ServiceDefinition = serde_json::from_str(
            r#"{"custom": {"slack": {"webhook_url": "", "user": "", "channel": ""}}}"#,
        )
        .unwrap();

        let slack = def.custom.slack.unwrap();
        assert_eq!(slack.webhook_url, None);
        assert_eq!(slack.user, None);
        assert_eq!(slack.channel, None);
    }
}
