use anyhow::Context;
use infrastructure::HttpClientConfig;
use reqwest_middleware::ClientWithMiddleware;

use crate::chat::{AskRequest, AskResponse, ModelBackend};

#[derive(Debug, Clone)]
pub struct ModelHttpClient {
    client: ClientWithMiddleware,
    ask_url: reqwest::Url,
}

impl ModelHttpClient {
    pub fn new(url: &str, client_config: &HttpClientConfig) -> anyhow::Result<Self> {
        let client = client_config.new_tracing_client()?;
        let mut ask_url = reqwest::Url::parse(url).with_context(|| format!("Invalid model url {}", url))?;

        ask_url
            .path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Model url {} cannot be a base", url))?
            .pop_if_empty()
            .push("ask");

        Ok(Self { client, ask_url })
    }
}

impl ModelBackend for ModelHttpClient {
    async fn ask(&self, request: &AskRequest) -> anyhow::Result<AskResponse> {
        tracing::debug!(
            "Asking model of {} with {} history messages",
            request.username,
            request.chat_history.len()
        );

        let response = self
            .client
            .post(self.ask_url.clone())
            .json(request)
            .send()
            .await
            .with_context(|| format!("Error sending query of {} to model", request.username))?
            .error_for_status()?;

        response
            .json::<AskResponse>()
            .await
            .with_context(|| format!("Error parsing model response for {}", request.username))
    }
}
