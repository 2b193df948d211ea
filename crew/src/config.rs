use agent::search::{AggregatorConfig, DEFAULT_BASE_URL, LinkupSettings};
use agent::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4.1-2025-04-14";

pub const LINKUP_API_KEY: &str = "LINKUP_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub model: String,
    pub linkup: LinkupSettings,
    pub aggregator: AggregatorConfig,
    /// Where agent transcripts are written, if anywhere
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Reads the process environment after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut aggregator = AggregatorConfig::default();
        if let Some(secs) = get("CREW_SEARCH_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                Error::ConfigError(format!("CREW_SEARCH_TIMEOUT_SECS={secs}: {e}"))
            })?;
            aggregator.query_timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            openai_api_key: get(OPENAI_API_KEY),
            model: get("OPENAI_MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            linkup: LinkupSettings {
                api_key: get(LINKUP_API_KEY),
                base_url: get("LINKUP_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                ..LinkupSettings::default()
            },
            aggregator,
            log_dir: get("CREW_LOG_DIR").map(PathBuf::from),
        })
    }

    /// Required keys that are not set, in the order they are checked.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.linkup.api_key.is_none() {
            missing.push(LINKUP_API_KEY);
        }
        if self.openai_api_key.is_none() {
            missing.push(OPENAI_API_KEY);
        }
        missing
    }
}
