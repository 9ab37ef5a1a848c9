//! Environment-driven configuration for the three services.
//!
//! Values come from a lookup function so tests can supply their own. In production the
//! lookup reads the process environment and falls back to Docker-style secret files under
//! `/run/secrets/<NAME>`.

use std::{env, fmt::Display, fs::read_to_string, path::PathBuf, str::FromStr, time::Duration};

use mentorship_service::remote::{gemini, openvidu};
use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_SECRET_KEY: &str = "your-secret-key";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub struct BackendConfig {
    pub port: u16,
    pub database_path: PathBuf,
    pub secret_key: String,
    pub token_ttl: Duration,
    pub ai_service_url: String,
    pub openvidu_url: String,
    pub openvidu_secret: String,
    pub http_timeout: Duration,
}

pub struct MatcherConfig {
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_url: String,
    pub http_timeout: Duration,
}

pub struct GamesConfig {
    pub port: u16,
    pub secret_key: String,
}

impl BackendConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(process_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let database_path = env
            .var("DATABASE_PATH")
            .or_else(|| env.var("DATABASE_URL"))
            .unwrap_or_else(|| {
                info!("DATABASE_PATH not set, using default: ./data/mentorship");
                "./data/mentorship".to_string()
            });

        Ok(Self {
            port: env.try_load("PORT", "8004")?,
            database_path: PathBuf::from(database_path),
            secret_key: env.secret_key(),
            token_ttl: env.token_ttl()?,
            ai_service_url: env.try_load("AI_SERVICE_URL", "http://ai-service:8000/match")?,
            openvidu_url: env.try_load("OPENVIDU_URL", openvidu::DEFAULT_URL)?,
            openvidu_secret: env.try_load("OPENVIDU_SECRET", "MY_SECRET")?,
            http_timeout: env.timeout()?,
        })
    }
}

impl MatcherConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(process_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        Ok(Self {
            port: env.try_load("PORT", "8000")?,
            gemini_api_key: env
                .var("GEMINI_API_KEY")
                .filter(|key| !key.trim().is_empty())
                .ok_or(ConfigError::Missing("GEMINI_API_KEY"))?,
            gemini_model: env.try_load("GEMINI_MODEL", gemini::DEFAULT_MODEL)?,
            gemini_api_url: env.try_load("GEMINI_API_URL", gemini::DEFAULT_BASE_URL)?,
            http_timeout: env.timeout()?,
        })
    }
}

impl GamesConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(process_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        Ok(Self {
            port: env.try_load("PORT", "8001")?,
            secret_key: env.secret_key(),
        })
    }
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn var(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    fn try_load<T: FromStr>(&self, key: &'static str, default: &str) -> Result<T, ConfigError>
    where
        T::Err: Display,
    {
        self.var(key)
            .unwrap_or_else(|| {
                info!("{key} not set, using default: {default}");
                default.to_string()
            })
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
            })
    }

    fn secret_key(&self) -> String {
        self.var("SECRET_KEY").unwrap_or_else(|| {
            warn!("SECRET_KEY not set, tokens are signed with the development default");
            DEFAULT_SECRET_KEY.to_string()
        })
    }

    fn token_ttl(&self) -> Result<Duration, ConfigError> {
        let key = "ACCESS_TOKEN_EXPIRE_MINUTES";
        let minutes: u64 = self.try_load(key, "60")?;

        minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| ConfigError::Invalid {
                key,
                reason: format!("{minutes} minutes is out of range"),
            })
    }

    fn timeout(&self) -> Result<Duration, ConfigError> {
        let secs: u64 = self.try_load("HTTP_TIMEOUT_SECS", "30")?;
        Ok(Duration::from_secs(secs))
    }
}

fn process_lookup(key: &str) -> Option<String> {
    env::var(key).ok().or_else(|| read_secret(key))
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path).ok().map(|s| s.trim().to_string())
}
