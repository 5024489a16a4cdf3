use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skua_protocol::IsolationLevel;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Backoff policy shared by every cluster the client builds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Delay before the first retry.
    pub initial_delay: Duration,

    pub max_retries: u32,

    /// Randomization factor applied to each delay, 0.0 disables jitter.
    pub factor: f64,

    /// Exponential growth between consecutive delays.
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(300),
            max_retries: 5,
            factor: 0.2,
            multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Seed brokers used for bootstrap metadata, host:port.
    pub brokers: Vec<String>,

    pub client_id: String,

    pub connection_timeout: Duration,

    pub authentication_timeout: Duration,

    /// Upper bound for a single in-flight request, timer starts at send.
    pub request_timeout: Duration,

    /// Cached metadata older than this is refreshed before routing.
    pub metadata_max_age: Duration,

    pub allow_auto_topic_creation: bool,

    /// Cap on concurrent requests per cluster. `None` = unbounded.
    pub max_in_flight_requests: Option<usize>,

    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            brokers: vec![],
            client_id: "skua".to_string(),
            connection_timeout: Duration::from_secs(1),
            authentication_timeout: Duration::from_secs(1),
            request_timeout: Duration::from_secs(30),
            metadata_max_age: Duration::from_secs(300),
            allow_auto_topic_creation: true,
            max_in_flight_requests: None,
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::read_from_file(p),
            None => Ok(Self::default()),
        }
    }

    fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(&path).with_context(|| format!("reading {:?}", path.as_ref()))?;
        let cfg: ClientConfig = toml::from_str(&raw).with_context(|| "parsing client config TOML")?;
        Ok(cfg)
    }
}

/// Per-component tweaks applied when a producer/consumer/admin builds its
/// own cluster off the shared client.
#[derive(Debug, Clone, Default)]
pub struct ClusterOverrides {
    pub metadata_max_age: Option<Duration>,
    pub allow_auto_topic_creation: Option<bool>,
    pub max_in_flight_requests: Option<usize>,
    pub isolation_level: Option<IsolationLevel>,
}
