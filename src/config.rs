use crate::error::{AppError, Result};

/// Base URL baked in at build time (`LEDGER_API_URL=... cargo build`).
pub const BUILD_API_URL: Option<&str> = option_env!("LEDGER_API_URL");

/// Origin used when neither the runtime nor the build environment names one.
/// A terminal client has no page origin, so this stands in for same-origin.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

pub const LEDGER_PATH: &str = "/api/public/ledger";
pub const VERIFY_PATH: &str = "/api/public/audit/verify";

/// Periodic ledger refresh (seconds).
pub const REFRESH_INTERVAL_SECS: u64 = 60;

/// Channel capacity for fetch outcomes flowing back to the UI loop.
pub const CHANNEL_CAPACITY: usize = 16;

/// Chain names the backend keeps.
pub const CHAINS: &[&str] = &["nba", "lottery"];

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub refresh_interval_secs: u64,
    pub log_level: String,
    /// Dashboard log destination; the terminal itself belongs to the TUI.
    pub log_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("LEDGER_API_URL")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| BUILD_API_URL.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let refresh_interval_secs = match lookup("REFRESH_INTERVAL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::Config(
                        "REFRESH_INTERVAL_SECS must be a positive number of seconds".to_string(),
                    )
                })?,
            None => REFRESH_INTERVAL_SECS,
        };

        Ok(Self {
            api_url: normalize_base_url(&api_url),
            refresh_interval_secs,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_file: lookup("LOG_FILE").unwrap_or_else(|| "dashboard.log".to_string()),
        })
    }
}

/// Trim whitespace and trailing slashes so paths can be appended verbatim.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
