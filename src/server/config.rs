use std::path::PathBuf;

use crate::server::error::config::ConfigError;

pub static DEFAULT_WTRL_BASE_URL: &str = "https://www.wtrl.racing";
pub static DEFAULT_WTRL_SEASON: &str = "17";
pub static DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub static DEFAULT_TEAM_TRC_LIST: &str = "data/team_trc_list.txt";
pub static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Server configuration read from the environment (and `.env` via dotenvy).
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub bind_address: String,
    pub wtrl_api_cookie: String,
    pub wtrl_base_url: String,
    pub wtrl_season: String,
    pub user_agent: String,
    pub team_trc_list: PathBuf,
    pub snapshot_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            wtrl_api_cookie: required("WTRL_API_COOKIE")?,
            bind_address: optional("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            wtrl_base_url: optional("WTRL_BASE_URL", DEFAULT_WTRL_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            wtrl_season: season("WTRL_SEASON")?,
            user_agent: optional("USER_AGENT", DEFAULT_USER_AGENT),
            team_trc_list: PathBuf::from(optional("TEAM_TRC_LIST", DEFAULT_TEAM_TRC_LIST)),
            snapshot_dir: std::env::var("SNAPSHOT_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(var.to_string())),
    }
}

fn optional(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn season(var: &str) -> Result<String, ConfigError> {
    let value = optional(var, DEFAULT_WTRL_SEASON);

    if value.parse::<i32>().is_err() {
        return Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("expected a season number, got {:?}", value),
        });
    }

    Ok(value)
}
