use std::path::PathBuf;

use chrono_tz::Tz;
use url::Url;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BASE_URL: &str = "http://localhost";
const DEFAULT_HTTP_PORT: u16 = 9000;
const DEFAULT_POLL_INTERVAL_MINUTES: u64 = 15;
const DEFAULT_DATA_DIR: &str = "calendars";
const DEFAULT_ALARM_MINUTES: u32 = 15;
/// One week. Longer intervals would leave feeds stale for no benefit.
const MAX_POLL_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

pub struct Config {
    pub discord_token: String,
    /// REST proxy replacing `https://discord.com`, e.g. a shared rate limiting proxy.
    pub discord_proxy_url: Option<String>,
    /// Guild to register slash commands in instead of registering them globally.
    pub dev_guild_id: Option<u64>,

    /// Public base URL without a trailing slash, e.g. `https://cal.example.org`.
    pub base_url: String,
    pub http_port: u16,
    pub data_dir: PathBuf,

    pub poll_interval_minutes: u64,
    pub timezone: Tz,
    /// Minutes before start for the VALARM reminder, 0 disables alarms.
    pub alarm_minutes: u32,
    pub notify_on_interest: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// `from_env` passes the process environment. Tests pass a map so they never
    /// mutate global state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let discord_token = var("DISCORD_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?;

        let base_url = parse_base_url(var("BASE_URL"))?;

        let http_port = parse_or("HTTP_PORT", var("HTTP_PORT"), DEFAULT_HTTP_PORT)?;

        let poll_interval_minutes = parse_or(
            "POLL_INTERVAL",
            var("POLL_INTERVAL"),
            DEFAULT_POLL_INTERVAL_MINUTES,
        )?;
        if !(1..=MAX_POLL_INTERVAL_MINUTES).contains(&poll_interval_minutes) {
            return Err(invalid(
                "POLL_INTERVAL",
                &poll_interval_minutes.to_string(),
                &format!("must be between 1 and {MAX_POLL_INTERVAL_MINUTES} minutes"),
            )
            .into());
        }

        let timezone = match var("TIMEZONE") {
            Some(value) => value
                .parse::<Tz>()
                .map_err(|e| invalid("TIMEZONE", &value, &e.to_string()))?,
            None => Tz::UTC,
        };

        let dev_guild_id = var("DEV_GUILD_ID")
            .map(|value| {
                value
                    .parse::<u64>()
                    .map_err(|e| invalid("DEV_GUILD_ID", &value, &e.to_string()))
            })
            .transpose()?;

        Ok(Self {
            discord_token,
            discord_proxy_url: var("DISCORD_PROXY_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            dev_guild_id,
            base_url,
            http_port,
            data_dir: PathBuf::from(var("DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())),
            poll_interval_minutes,
            timezone,
            alarm_minutes: parse_or("ALARM_MINUTES", var("ALARM_MINUTES"), DEFAULT_ALARM_MINUTES)?,
            notify_on_interest: parse_bool("NOTIFY_ON_INTEREST", var("NOTIFY_ON_INTEREST"))?,
        })
    }
}

fn invalid(name: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(value) => value
            .parse::<T>()
            .map_err(|e| invalid(name, &value, &e.to_string())),
        None => Ok(default),
    }
}

fn parse_bool(name: &str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("0") | Some("false") | Some("no") | Some("off") => Ok(false),
        Some("1") | Some("true") | Some("yes") | Some("on") => Ok(true),
        Some(other) => Err(invalid(name, other, "expected true or false")),
    }
}

fn parse_base_url(value: Option<String>) -> Result<String, ConfigError> {
    let value = value.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let parsed = Url::parse(&value).map_err(|e| invalid("BASE_URL", &value, &e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("BASE_URL", &value, "scheme must be http or https"));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("BASE_URL", &value, "missing host"));
    }

    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
impl Config {
    /// Configuration with defaults and the given data directory, for unit tests.
    pub fn test_default(data_dir: &std::path::Path) -> Self {
        Self {
            discord_token: "test-token".to_string(),
            discord_proxy_url: None,
            dev_guild_id: None,
            base_url: "https://cal.example.org".to_string(),
            http_port: DEFAULT_HTTP_PORT,
            data_dir: data_dir.to_path_buf(),
            poll_interval_minutes: DEFAULT_POLL_INTERVAL_MINUTES,
            timezone: Tz::UTC,
            alarm_minutes: DEFAULT_ALARM_MINUTES,
            notify_on_interest: false,
        }
    }
}
