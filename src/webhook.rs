//! Post plain text messages to a Slack incoming webhook.
//!
//! Building a request ([request]) is kept apart from sending it ([client]) so
//! that what would be sent can be inspected without any network activity.

pub mod client;
pub mod error;
pub mod request;
