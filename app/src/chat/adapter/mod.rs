mod http;

use infrastructure::HttpClientConfig;
use serde::Deserialize;

pub use http::ModelHttpClient;

#[derive(Debug, Deserialize, Clone)]
pub struct Model {
    pub url: String,
    #[serde(default)]
    pub client: HttpClientConfig,
}

impl Model {
    pub fn new_client(&self) -> anyhow::Result<ModelHttpClient> {
        ModelHttpClient::new(&self.url, &self.client)
    }
}
