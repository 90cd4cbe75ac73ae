use crate::algs::trending::TrendingSettings;
use crate::common::time::now_utc;
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_EVENT_HORIZON_HOURS: i64 = 7 * 24;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;
pub const DEFAULT_TRENDING_LIMIT: usize = 5;
// every minute, on the minute
pub const DEFAULT_SWEEP_CRON: &str = "0 * * * * *";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub event_horizon: chrono::Duration,
    pub cache_ttl_secs: u64,
    pub default_limit: usize,
    pub sweep_cron: String,
}

impl Config {
    /// Reads the configuration from the process environment. Call `dotenv()` first to pick
    /// up a local `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let event_horizon_hours = parse_or(
            &lookup,
            "TRENDING_EVENT_HORIZON_HOURS",
            DEFAULT_EVENT_HORIZON_HOURS,
        )?;
        if event_horizon_hours <= 0 {
            anyhow::bail!("TRENDING_EVENT_HORIZON_HOURS must be positive, got {event_horizon_hours}");
        }
        // the sweep subtracts the horizon from the current time, so it has to fit a timestamp
        let event_horizon = chrono::Duration::try_hours(event_horizon_hours)
            .filter(|horizon| now_utc().checked_sub_signed(*horizon).is_some())
            .with_context(|| {
                format!("TRENDING_EVENT_HORIZON_HOURS is out of range: {event_horizon_hours}")
            })?;

        Ok(Config {
            database_url,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            event_horizon,
            cache_ttl_secs: parse_or(&lookup, "TRENDING_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
            default_limit: parse_or(&lookup, "TRENDING_DEFAULT_LIMIT", DEFAULT_TRENDING_LIMIT)?,
            sweep_cron: lookup("TRENDING_SWEEP_CRON")
                .unwrap_or_else(|| DEFAULT_SWEEP_CRON.to_string()),
        })
    }

    pub fn trending_settings(&self) -> TrendingSettings {
        TrendingSettings {
            event_horizon: self.event_horizon,
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
