//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers and the job worker.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Public base URL used in example requests and confirmation links.
    pub site_url: String,
    pub zmq_emailer_pub: String,
    #[serde(default = "default_job_poll_interval_secs")]
    pub job_poll_interval_secs: u64,
    #[serde(default = "default_job_batch_size")]
    pub job_batch_size: usize,
}

fn default_job_poll_interval_secs() -> u64 {
    5
}

fn default_job_batch_size() -> usize {
    20
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Reads `config/default.yaml` (optional) overlaid with `APP_*` variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
