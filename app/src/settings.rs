use config::{Config, ConfigError, Environment, File, builder::DefaultState};
use infrastructure::{HttpServerConfig, MonitoringConfig};
use serde::Deserialize;

use crate::user::UserProfile;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub http_server: HttpServerConfig,
    pub monitoring: MonitoringConfig,
    pub calendar: crate::schedule::Calendar,
    pub model: crate::chat::Model,
    #[serde(default)]
    pub users: Vec<UserProfile>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config.toml").required(false))
            .add_source(
                Environment::with_prefix("TWIN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::build(builder)
    }

    fn build(builder: config::ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
