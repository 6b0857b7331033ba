//! The deployment tool's view of us: a notifier constructed once per run,
//! exposing one entry point per lifecycle hook.

use crate::{
    config::{self, definition::ServiceDefinition, error::ConfigError, SlackConfig},
    context::{self, Environment, Options},
    template::{self, DEFAULT_FUNCTION_TEMPLATE, DEFAULT_SERVICE_TEMPLATE},
    webhook::{
        client::WebhookClient,
        request::{self, Extras, RequestDescriptor},
    },
};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Lifecycle events we notify about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A single function was deployed on its own.
    FunctionDeploy,
    /// The whole service was deployed.
    ServiceDeploy,
}

impl Event {
    /// The name under which the deployment tool raises this event.
    pub fn hook_name(self) -> &'static str {
        match self {
            Event::FunctionDeploy => "after:deploy:function:deploy",
            Event::ServiceDeploy => "after:deploy:deploy",
        }
    }
}

pub struct Notifier {
    slack: SlackConfig,
    service: String,
    region: Option<String>,
    options: Options,
    client: WebhookClient,
}

impl Notifier {
    /// Validate our settings within `def`. Fails if they're missing
    /// altogether or have no webhook URL.
    pub fn new(def: &ServiceDefinition, options: Options) -> Result<Self, ConfigError> {
        let slack = config::validate(def)?;

        Ok(Notifier {
            slack,
            service: def.service.clone(),
            region: def.provider.region.clone(),
            options,
            client: WebhookClient::new(),
        })
    }

    /// Bound each delivery attempt by `timeout` rather than the default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = WebhookClient::with_timeout(timeout);
        self
    }

    pub fn after_deploy_function(&self) -> Option<JoinHandle<()>> {
        self.notify(Event::FunctionDeploy, &Environment::capture())
    }

    pub fn after_deploy_service(&self) -> Option<JoinHandle<()>> {
        self.notify(Event::ServiceDeploy, &Environment::capture())
    }

    /// Send a notification for `event` in the background. Returns `None` if
    /// there was nothing to send, otherwise a handle to the detached send,
    /// which resolves to nothing whatever the outcome.
    pub fn notify(&self, event: Event, env: &Environment) -> Option<JoinHandle<()>> {
        self.prepare(event, env).map(|req| self.client.dispatch(req))
    }

    /// Build the request for `event`, or `None` if the current stage isn't
    /// reportable.
    pub fn prepare(&self, event: Event, env: &Environment) -> Option<RequestDescriptor> {
        let ctx = context::resolve(
            &self.slack,
            &self.service,
            self.region.as_deref(),
            &self.options,
            env,
        );

        if !self.slack.is_reportable(&ctx.stage) {
            debug!("Stage `{}` isn't reportable, skipping", ctx.stage);
            return None;
        }

        let tpl = match event {
            Event::FunctionDeploy => self
                .slack
                .function_deploy_message
                .as_deref()
                .unwrap_or(DEFAULT_FUNCTION_TEMPLATE),
            Event::ServiceDeploy => self
                .slack
                .service_deploy_message
                .as_deref()
                .unwrap_or(DEFAULT_SERVICE_TEMPLATE),
        };

        let text = template::compose(tpl, &context::bindings(&ctx, env));

        let extras = Extras {
            icon_emoji: self.slack.emoji.clone(),
            channel: self.slack.channel.clone(),
        };

        request::build(&self.slack.webhook_url, &text, ctx.deployer.as_deref(), &extras)
            .map_err(|e| error!("Failed to serialise webhook body: {}", e))
            .ok()
    }
}
