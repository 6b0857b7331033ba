//! Assemble the request sent to a Slack incoming webhook.
//!
//! <https://api.slack.com/messaging/webhooks>

use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Method,
};
use serde::Serialize;
use url::Url;

/// Everything needed to make the request, kept around whole so that it can
/// be logged in full should delivery fail.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub url: Url,
    pub method: Method,
    pub headers: HeaderMap,
    /// JSON-encoded [Payload].
    pub body: String,
}

/// Optional overrides of the webhook's defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extras {
    pub icon_emoji: Option<String>,
    /// A channel, or a user as `@name`, to post to instead of the webhook's
    /// own.
    pub channel: Option<String>,
}

/// The legacy incoming webhook payload. `username`, `icon_emoji` and
/// `channel` are only honoured by legacy webhooks, but are harmless
/// elsewhere.
// Field order is the serialised key order.
#[derive(Serialize)]
struct Payload<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_emoji: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<&'a str>,
}

/// Build a POST of `text` on behalf of `username`. Empty extras are dropped
/// entirely rather than sent blank.
pub fn build(
    url: &Url,
    text: &str,
    username: Option<&str>,
    extras: &Extras,
) -> Result<RequestDescriptor, serde_json::Error> {
    let body = serde_json::to_string(&Payload {
        text,
        username,
        icon_emoji: non_empty(&extras.icon_emoji),
        channel: non_empty(&extras.channel),
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(RequestDescriptor {
        url: url.clone(),
        method: Method::POST,
        headers,
        body,
    })
}

fn non_empty(x: &Option<String>) -> Option<&str> {
    x.as_deref().filter(|x| !x.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn test_minimal() {
        let req = build(&url(), "hello", Some("jd"), &Extras::default()).unwrap();

        assert_eq!(req.url, url());
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.headers[CONTENT_TYPE], "application/json");
        assert_eq!(req.body, r#"{"text":"hello","username":"jd"}"#);
    }

    #[test]
    fn test_extras() {
        let extras = Extras {
            icon_emoji: Some(":cloud:".to_string()),
            channel: Some("@user".to_string()),
        };
        let req = build(&url(), "hello", Some("jd"), &extras).unwrap();

        assert_eq!(
            req.body,
            r#"{"text":"hello","username":"jd","icon_emoji":":cloud:","channel":"@user"}"#
        );
    }

    #[test]
    fn test_empty_extras_are_omitted() {
        let extras = Extras {
            icon_emoji: Some(String::new()),
            channel: None,
        };
        let req = build(&url(), "hello", None, &extras).unwrap();

        assert_eq!(req.body, r#"{"text":"hello"}"#);
    }

    #[test]
    fn test_text_is_escaped() {
        let req = build(&url(), "say \"hi\"\n", Some("jd"), &Extras::default()).unwrap();

        assert_eq!(req.body, r#"{"text":"say \"hi\"\n","username":"jd"}"#);
    }
}
