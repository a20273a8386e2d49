//! Webhook dispatch abstraction for testability

use async_trait::async_trait;

use crate::payload::OutboundRequest;

/// Sends an encoded request and reports success or failure.
///
/// Implementations own timeouts and cancellation; callers never retry.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait WebhookSender: Send + Sync {
    async fn send(&self, request: &OutboundRequest) -> crate::Result<()>;
}

/// Production sender using reqwest
#[derive(Default)]
pub struct ReqwestWebhookSender {
    client: reqwest::Client,
}

impl ReqwestWebhookSender {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WebhookSender for ReqwestWebhookSender {
    async fn send(&self, request: &OutboundRequest) -> crate::Result<()> {
        let target = redacted_target(request);
        tracing::debug!("{} {}", request.method(), target);

        let mut builder = self.client.post(request.url());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body().to_vec())
            .send()
            .await
            .map_err(|e| {
                crate::NotifierError::Dispatch(format!(
                    "POST {} failed: {}",
                    target,
                    e.without_url()
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(crate::NotifierError::Dispatch(format!(
                "POST {} returned status {}: {}",
                target,
                status.as_u16(),
                body
            )));
        }

        tracing::debug!("POST {} -> {}", target, status.as_u16());
        Ok(())
    }
}

/// Host and API method only; the path segment before the method carries the bot token.
fn redacted_target(request: &OutboundRequest) -> String {
    let url = request.url();
    match url.find("/bot") {
        Some(index) => format!("{}/bot<redacted>/{}", &url[..index], request.api_method()),
        None => url.to_string(),
    }
}
