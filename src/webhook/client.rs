//! Deliver requests to the webhook, reporting the outcome through logs only.

use super::{error::WebhookError, request::RequestDescriptor};
use reqwest::StatusCode;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// How long a single attempt may take, from connecting to reading the
/// response, before it's abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A reusable client that holds a connection pool internally, as per
/// [reqwest::Client]. Cloning is cheap.
#[derive(Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl WebhookClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        WebhookClient {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Make a single delivery attempt. Anything other than a 200 is a
    /// failure, as is taking longer than the timeout.
    pub async fn send(&self, req: &RequestDescriptor) -> Result<(), WebhookError> {
        let res = self
            .client
            .request(req.method.clone(), req.url.clone())
            .timeout(self.timeout)
            .headers(req.headers.clone())
            .body(req.body.clone())
            .send()
            .await?;

        match res.status() {
            StatusCode::OK => Ok(()),
            s => Err(WebhookError::UnexpectedStatus(s)),
        }
    }

    /// Send in the background and return immediately. The outcome is only
    /// ever logged; the handle resolves once the attempt is over, for callers
    /// that need to outlive it.
    pub fn dispatch(&self, req: RequestDescriptor) -> JoinHandle<()> {
        let client = self.clone();

        tokio::spawn(async move {
            match client.send(&req).await {
                Ok(()) => info!("Notified Slack of deployment"),
                Err(e) => {
                    error!(request = ?req, "{}", e);
                    error!("Something went wrong notifying Slack");
                }
            }
        })
    }
}

impl Default for WebhookClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webhook::request::{build, Extras};
    use url::Url;

    async fn server() -> mockito::ServerGuard {
        mockito::Server::new_async().await
    }

    fn request(base: &str) -> RequestDescriptor {
        let url = Url::parse(&format!("{}/hook", base)).unwrap();

        build(&url, "hello", Some("jd"), &Extras::default()).unwrap()
    }

    #[tokio::test]
    async fn test_send_ok() {
        let mut server = server().await;
        let mock = server
            .mock("POST", "/hook")
            .match_header("content-type", "application/json")
            .match_body(r#"{"text":"hello","username":"jd"}"#)
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let res = WebhookClient::new().send(&request(&server.url())).await;

        mock.assert_async().await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_send_bad_status() {
        let mut server = server().await;
        let mock = server
            .mock("POST", "/hook")
            .with_status(404)
            .with_body("no_service")
            .create_async()
            .await;

        let res = WebhookClient::new().send(&request(&server.url())).await;

        mock.assert_async().await;
        assert!(matches!(
            res,
            Err(WebhookError::UnexpectedStatus(StatusCode::NOT_FOUND))
        ));
    }

    #[tokio::test]
    async fn test_send_other_success_status_is_failure() {
        let mut server = server().await;
        server
            .mock("POST", "/hook")
            .with_status(204)
            .create_async()
            .await;

        let res = WebhookClient::new().send(&request(&server.url())).await;

        assert!(matches!(
            res,
            Err(WebhookError::UnexpectedStatus(StatusCode::NO_CONTENT))
        ));
    }

    #[tokio::test]
    async fn test_send_unreachable() {
        // Port 0 requests that the OS assigns us an available port, which
        // nothing will be listening on once the listener's dropped.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();

        let res = WebhookClient::new()
            .send(&request(&format!("http://{}", addr)))
            .await;

        assert!(matches!(res, Err(WebhookError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_send_silent_endpoint_times_out() {
        // Connections land in the backlog and are never answered.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let res = WebhookClient::with_timeout(Duration::from_millis(200))
            .send(&request(&format!("http://{}", addr)))
            .await;

        match res {
            Err(WebhookError::RequestFailed(e)) => assert!(e.is_timeout()),
            _ => panic!("expected a timeout"),
        }
        drop(listener);
    }

    #[tokio::test]
    async fn test_dispatch_swallows_failure() {
        let mut server = server().await;
        let mock = server
            .mock("POST", "/hook")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let handle = WebhookClient::new().dispatch(request(&server.url()));

        // Resolves to unit regardless of the outcome.
        let () = handle.await.unwrap();
        mock.assert_async().await;
    }
}
