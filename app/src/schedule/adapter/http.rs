use anyhow::Context;
use infrastructure::HttpClientConfig;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;

use crate::core::time::Date;
use crate::schedule::domain::{BusyBlock, BusyBlockSource};

#[derive(Debug, Clone)]
pub struct CalendarHttpClient {
    client: ClientWithMiddleware,
    base_url: reqwest::Url,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BusyBlocksResponse {
    #[serde(default)]
    busy_blocks: Vec<BusyBlock>,
}

impl CalendarHttpClient {
    pub fn new(url: &str, client_config: &HttpClientConfig) -> anyhow::Result<Self> {
        let client = client_config.new_tracing_client()?;
        let base_url = reqwest::Url::parse(url).with_context(|| format!("Invalid calendar url {}", url))?;

        Ok(Self { client, base_url })
    }

    fn busy_blocks_url(&self, username: &str, date: &Date) -> anyhow::Result<reqwest::Url> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Calendar url {} cannot be a base", self.base_url))?
            .pop_if_empty()
            .extend(["api", "calendar", "busy-blocks", username]);

        url.query_pairs_mut().clear().append_pair("date", &date.to_iso_string());

        Ok(url)
    }
}

impl BusyBlockSource for CalendarHttpClient {
    async fn busy_blocks(&self, username: &str, date: &Date) -> anyhow::Result<Vec<BusyBlock>> {
        let url = self.busy_blocks_url(username, date)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Error requesting busy blocks of {} on {}", username, date))?
            .error_for_status()?;

        let body = response
            .json::<BusyBlocksResponse>()
            .await
            .with_context(|| format!("Error parsing busy blocks of {} on {}", username, date))?;

        Ok(body.busy_blocks)
    }
}
