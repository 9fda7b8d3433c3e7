use std::{env, fmt, time::Duration};

use crate::{client::DEFAULT_API_URL, errors::Error, Result};

/// Typed configuration, read from the environment (and an optional `.env`).
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub api_base_url: String,

    // Transport
    pub log_traffic: bool,
    pub request_timeout: Duration,

    // Polling
    pub long_poll_timeout: Option<u32>,
    pub poll_interval: Duration,
    pub initial_offset: i64,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Variables already set in the environment win over `.env`.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
            })?;

        let api_base_url = lookup("TELEGRAM_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();

        let log_traffic = parse_bool(lookup("GRAVEL_LOG_TRAFFIC")).unwrap_or(false);
        let request_timeout = Duration::from_millis(
            parse_num::<u64>(&lookup, "GRAVEL_REQUEST_TIMEOUT_MS")?.unwrap_or(30_000),
        );
        if request_timeout.is_zero() {
            return Err(Error::Config(
                "GRAVEL_REQUEST_TIMEOUT_MS must be greater than 0".to_string(),
            ));
        }

        // 0 disables long polling (plain short poll).
        let long_poll_timeout =
            parse_num::<u32>(&lookup, "GRAVEL_LONG_POLL_SECS")?.filter(|s| *s > 0);
        let poll_interval = Duration::from_millis(
            parse_num::<u64>(&lookup, "GRAVEL_POLL_INTERVAL_MS")?.unwrap_or(1000),
        );
        let initial_offset = parse_num::<i64>(&lookup, "GRAVEL_INITIAL_OFFSET")?.unwrap_or(0);

        if let Some(secs) = long_poll_timeout {
            if Duration::from_secs(u64::from(secs)) >= request_timeout {
                return Err(Error::Config(format!(
                    "GRAVEL_LONG_POLL_SECS ({secs}s) must be shorter than GRAVEL_REQUEST_TIMEOUT_MS ({}ms)",
                    request_timeout.as_millis()
                )));
            }
        }

        Ok(Self {
            bot_token,
            api_base_url,
            log_traffic,
            request_timeout,
            long_poll_timeout,
            poll_interval,
            initial_offset,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("log_traffic", &self.log_traffic)
            .field("request_timeout", &self.request_timeout)
            .field("long_poll_timeout", &self.long_poll_timeout)
            .field("poll_interval", &self.poll_interval)
            .field("initial_offset", &self.initial_offset)
            .finish()
    }
}

fn parse_bool(v: Option<String>) -> Option<bool> {
    v.map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn parse_num<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| Error::Config(format!("{key} must be a number, got {raw:?}")))
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
