mod http;

use infrastructure::HttpClientConfig;
use serde::Deserialize;

pub use http::CalendarHttpClient;

use super::AvailabilityService;

#[derive(Debug, Deserialize, Clone)]
pub struct Calendar {
    pub url: String,
    #[serde(default)]
    pub client: HttpClientConfig,
}

impl Calendar {
    pub fn new_availability_service(&self) -> anyhow::Result<AvailabilityService<CalendarHttpClient>> {
        let client = CalendarHttpClient::new(&self.url, &self.client)?;
        Ok(AvailabilityService::new(client))
    }
}
