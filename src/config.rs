use crate::scheduler::{SchedulerConfig, DEFAULT_HORIZON_DAYS, DEFAULT_SESSION_MINUTES, MAX_HORIZON_DAYS};
use anyhow::Context;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub user_id: String,
    /// Directory with a built web client, served on unknown routes.
    pub static_dir: Option<PathBuf>,
    pub scheduler: SchedulerConfig,
}

impl Config {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        // Missing .env is fine.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let session_minutes = parse_or(&lookup, "STUDY_SESSION_MINUTES", DEFAULT_SESSION_MINUTES)?;
        let min_session_minutes = parse_or(&lookup, "STUDY_MIN_SESSION_MINUTES", session_minutes)?;
        let default_horizon_days = parse_or(&lookup, "STUDY_DEFAULT_HORIZON_DAYS", DEFAULT_HORIZON_DAYS)?;

        if session_minutes == 0 {
            anyhow::bail!("STUDY_SESSION_MINUTES must be positive");
        }
        if !(1..=MAX_HORIZON_DAYS).contains(&default_horizon_days) {
            anyhow::bail!(
                "STUDY_DEFAULT_HORIZON_DAYS must be between 1 and {}, got {}",
                MAX_HORIZON_DAYS,
                default_horizon_days
            );
        }

        Ok(Self {
            database_url: lookup("STUDY_DATABASE_URL")
                .unwrap_or_else(|| "sqlite://study.db?mode=rwc".to_string()),
            bind_addr: lookup("STUDY_BIND_ADDR").unwrap_or_else(|| "127.0.0.1:3000".to_string()),
            user_id: lookup("STUDY_USER_ID").unwrap_or_else(|| "local".to_string()),
            static_dir: lookup("STUDY_STATIC_DIR").map(PathBuf::from),
            scheduler: SchedulerConfig {
                session_minutes,
                min_session_minutes,
                default_horizon_days,
            },
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: '{}'", key, raw)),
        None => Ok(default),
    }
}
