use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub schedule: ScheduleConfig,
    pub host: HostConfig,
    pub persistence: PersistenceConfig,
    pub concierge: ConciergeConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds between activity-window polls
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    30
}

/// The host presented on scheduled sessions.
#[derive(Debug, Deserialize)]
pub struct HostConfig {
    pub name: String,
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct PersistenceConfig {
    /// Base URL of the hosted booking service; empty means in-memory
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ConciergeConfig {
    pub api_url: String,
    /// Overridable via DAYMAKER_CONCIERGE__API_KEY
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("DAYMAKER").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
