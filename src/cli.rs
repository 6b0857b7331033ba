//! Command line interface, through which the deployment tool runs our hooks.
//!
//! ```sh
//! herald --config serverless.json --stage production service
//! herald -f resize-image after:deploy:function:deploy
//! ```

use crate::{context::Options, notifier::Event};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "herald", about = "Notify Slack of deployments")]
pub struct Cli {
    /// JSON service definition containing `custom.slack` settings
    #[arg(short, long, default_value = "serverless.json")]
    pub config: PathBuf,

    /// Stage being deployed to (defaults to "dev")
    #[arg(short, long, env = "HERALD_STAGE")]
    pub stage: Option<String>,

    /// Function being deployed, for single function deployments
    #[arg(short = 'f', long = "function", env = "HERALD_FUNCTION")]
    pub function: Option<String>,

    /// Seconds to wait for Slack before giving up on the notification
    #[arg(long, default_value_t = 10, env = "HERALD_TIMEOUT")]
    pub timeout: u64,

    #[command(subcommand)]
    pub hook: Hook,
}

/// The lifecycle hook to run. Also accepts the deployment tool's own hook
/// names.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    /// A single function was deployed
    #[command(alias = "after:deploy:function:deploy")]
    Function,

    /// The whole service was deployed
    #[command(alias = "after:deploy:deploy")]
    Service,
}

impl From<Hook> for Event {
    fn from(h: Hook) -> Self {
        match h {
            Hook::Function => Event::FunctionDeploy,
            Hook::Service => Event::ServiceDeploy,
        }
    }
}

impl Cli {
    pub fn options(&self) -> Options {
        Options {
            stage: self.stage.clone(),
            function: self.function.clone(),
        }
    }
}
