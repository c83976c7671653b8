use crate::common::ApplicationResult;
use crate::domains::signal::{PollPolicy, Uid};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulator: SimulatorConfig,
    pub channel: ChannelConfig,
    pub logging: LoggingConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub outbound_stream: String,
    pub inbound_stream: String,
    /// `0` waits for a reply indefinitely.
    pub reply_timeout_ms: u64,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub robot_count: u32,
}

impl Config {
    /// Reads `path` if it exists and falls back to the defaults otherwise.
    pub async fn load<P: AsRef<Path>>(path: P) -> ApplicationResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Ok(Self::from_file(path).await?)
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.channel.outbound_stream.is_empty() || self.channel.inbound_stream.is_empty() {
            anyhow::bail!("channel stream names must not be empty");
        }
        if self.channel.outbound_stream.len() > u8::MAX as usize
            || self.channel.inbound_stream.len() > u8::MAX as usize
        {
            anyhow::bail!("channel stream names must fit in 255 bytes");
        }
        self.logging.level_filter()?;
        self.demo.uids()?;
        Ok(())
    }
}

impl SimulatorConfig {
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl ChannelConfig {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            timeout: (self.reply_timeout_ms > 0).then(|| Duration::from_millis(self.reply_timeout_ms)),
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown log level '{}'", self.level))
    }
}

impl DemoConfig {
    /// Uids `0..robot_count` of the demo swarm.
    pub fn uids(&self) -> Result<Range<Uid>> {
        let end = Uid::try_from(self.robot_count)
            .with_context(|| format!("robot_count {} exceeds the largest uid", self.robot_count))?;
        Ok(0..end)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 19997,
            connect_timeout_ms: 5000,
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            outbound_stream: "signal".to_string(),
            inbound_stream: "reply_signal".to_string(),
            reply_timeout_ms: 2000,
            initial_backoff_ms: 1,
            max_backoff_ms: 50,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { robot_count: 3 }
    }
}
