//! Tell Slack whenever something is deployed.
//!
//! Intended to be run by a deployment tool after its deploy lifecycle events,
//! reading the same service definition. See [cli] for usage and
//! [config::definition] for the settings.
//!
//! Failing to notify never fails the deployment: delivery problems are only
//! logged, and the process exits successfully regardless. Misconfiguration on
//! the other hand is fatal.

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

use clap::Parser;
use cli::Cli;
use config::error::ConfigError;
use dotenvy::dotenv;
use notifier::{Event, Notifier};
use std::{process, time::Duration};
use tracing::{error, info, warn};

mod cli;
mod config;
mod context;
mod notifier;
mod template;
mod webhook;

/// Application entrypoint. Initialises tracing, loads any `.env`, and runs
/// the requested hook.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    // Loaded before the environment is snapshotted so that its variables are
    // available to templates.
    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        error!("{}", e);
        process::exit(1);
    }
}

/// Run the hook selected by `cli`, waiting for any send to finish before
/// returning.
async fn run(cli: &Cli) -> Result<(), ConfigError> {
    let def = config::load(&cli.config)?;
    let notifier =
        Notifier::new(&def, cli.options())?.with_timeout(Duration::from_secs(cli.timeout));

    let event = Event::from(cli.hook);
    info!("Running {} hook", event.hook_name());

    let handle = match event {
        Event::FunctionDeploy => notifier.after_deploy_function(),
        Event::ServiceDeploy => notifier.after_deploy_service(),
    };

    // The send is detached, but would be dropped along with the runtime were
    // we to return straight away. It's bounded by `--timeout`, so this wait
    // is too.
    if let Some(h) = handle {
        if let Err(e) = h.await {
            warn!("Notification task did not complete: {}", e);
        }
    }

    Ok(())
}
