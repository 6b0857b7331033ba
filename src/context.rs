//! Resolve who deployed what, where, and the variables that templates may
//! reference as a result.
//!
//! Nothing here touches the process environment directly. Callers capture an
//! [Environment] snapshot per invocation and pass it in, so that nothing
//! leaks between invocations in a long-lived process.

use crate::config::SlackConfig;
use std::collections::BTreeMap;

/// The stage assumed when none is given.
pub const DEFAULT_STAGE: &str = "dev";

/// Environment variables consulted, in order, for the deployer's identity
/// when none is configured.
const DEPLOYER_VARS: [&str; 2] = ["DEPLOYER", "USER"];

/// Options supplied by the deployment tool for this run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub stage: Option<String>,
    /// The function being deployed, if this is a single function deployment.
    pub function: Option<String>,
}

/// An immutable snapshot of environment variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment(BTreeMap<String, String>);

impl Environment {
    /// Snapshot the current process environment. Variables which aren't
    /// valid unicode are skipped.
    pub fn capture() -> Self {
        let xs = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();

        Environment(xs)
    }

    /// Look up a variable, treating empty values as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|x| !x.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Environment(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Facts about a single deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentContext {
    pub deployer: Option<String>,
    pub stage: String,
    pub service: String,
    pub function: Option<String>,
    pub region: Option<String>,
}

/// Variables available to message templates, by name.
pub type Bindings = BTreeMap<String, String>;

/// Work out the deployment context for this invocation.
pub fn resolve(
    cfg: &SlackConfig,
    service: &str,
    region: Option<&str>,
    opts: &Options,
    env: &Environment,
) -> DeploymentContext {
    DeploymentContext {
        deployer: resolve_deployer(cfg.user.as_deref(), env),
        stage: opts
            .stage
            .clone()
            .filter(|x| !x.is_empty())
            .unwrap_or_else(|| DEFAULT_STAGE.to_owned()),
        service: service.to_owned(),
        function: opts.function.clone().filter(|x| !x.is_empty()),
        region: region.map(str::to_owned),
    }
}

/// The configured user wins, then `$DEPLOYER`, then `$USER`.
fn resolve_deployer(configured: Option<&str>, env: &Environment) -> Option<String> {
    configured
        .filter(|x| !x.is_empty())
        .or_else(|| DEPLOYER_VARS.iter().find_map(|k| env.get(k)))
        .map(str::to_owned)
}

/// Merge the environment with the deployment context. Context fields shadow
/// environment variables of the same name, and absent fields aren't bound.
pub fn bindings(ctx: &DeploymentContext, env: &Environment) -> Bindings {
    let mut xs = env.0.clone();

    let fields = [
        ("user", ctx.deployer.as_ref()),
        ("name", ctx.function.as_ref()),
        ("service", Some(&ctx.service)),
        ("stage", Some(&ctx.stage)),
        ("region", ctx.region.as_ref()),
    ];

    for (k, v) in fields {
        match v {
            Some(v) => {
                xs.insert(k.to_owned(), v.to_owned());
            }
            // Don't let a same-named environment variable stand in for a
            // field we couldn't resolve.
            None => {
                xs.remove(k);
            }
        }
    }

    xs
}
