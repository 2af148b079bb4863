use rand::Rng;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Store reference file loaded at startup
    #[serde(default = "default_store_master_path")]
    pub store_master_path: String,

    /// Lower bound of the simulated per-image processing delay (inclusive)
    #[serde(default = "default_delay_min_ms")]
    pub processing_delay_min_ms: u64,

    /// Upper bound of the simulated per-image processing delay (exclusive)
    #[serde(default = "default_delay_max_ms")]
    pub processing_delay_max_ms: u64,

    /// Per-request timeout for image downloads. Unset means no timeout.
    #[serde(default)]
    pub fetch_timeout_secs: Option<u64>,

    /// Maximum accepted request body size
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_store_master_path() -> String {
    "StoreMasterAssignment.csv".to_string()
}

fn default_delay_min_ms() -> u64 {
    100
}

fn default_delay_max_ms() -> u64 {
    400
}

pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    pub fn processing(&self) -> ProcessingConfig {
        ProcessingConfig {
            delay_min_ms: self.processing_delay_min_ms,
            delay_max_ms: self.processing_delay_max_ms,
        }
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

/// Settings for the simulated per-image workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingConfig {
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            delay_min_ms: default_delay_min_ms(),
            delay_max_ms: default_delay_max_ms(),
        }
    }
}

impl ProcessingConfig {
    /// No simulated delay.
    pub fn immediate() -> Self {
        Self {
            delay_min_ms: 0,
            delay_max_ms: 0,
        }
    }

    /// Draw a delay uniformly from `[min, max)`. A collapsed range yields `min`.
    pub fn sample_delay(&self) -> Option<Duration> {
        let ms = if self.delay_max_ms > self.delay_min_ms {
            rand::rng().random_range(self.delay_min_ms..self.delay_max_ms)
        } else {
            self.delay_min_ms
        };
        (ms > 0).then(|| Duration::from_millis(ms))
    }
}
