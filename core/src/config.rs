//! Store connection settings.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://unidb.openlab.uninorte.edu.co";
pub const DEFAULT_CONTRACT_KEY: &str = "todo_gelatto";
pub const DEFAULT_TABLE: &str = "todos";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the backing store lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub base_url: String,
    pub contract_key: String,
    pub table: String,
    #[serde(with = "secs")]
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            contract_key: DEFAULT_CONTRACT_KEY.to_string(),
            table: DEFAULT_TABLE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl StoreConfig {
    /// Default settings pointed at a different base URL.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `TODO_STORE_URL`, `TODO_STORE_CONTRACT`,
    /// `TODO_STORE_TABLE` and `TODO_STORE_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("TODO_STORE_URL") {
            config.base_url = url;
        }
        if let Some(contract) = lookup("TODO_STORE_CONTRACT") {
            config.contract_key = contract;
        }
        if let Some(table) = lookup("TODO_STORE_TABLE") {
            config.table = table;
        }
        match lookup("TODO_STORE_TIMEOUT_SECS").map(|s| s.parse::<u64>()) {
            Some(Ok(secs)) => config.timeout = Duration::from_secs(secs),
            Some(Err(e)) => tracing::warn!("ignoring TODO_STORE_TIMEOUT_SECS: {e}"),
            None => {}
        }
        config
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
