use std::{env, fmt::Display, fs::read_to_string, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::error::ConfigError;

const SESSION_SECRET: &str = "SESSION_SECRET";
const MIN_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub session_secret: String,
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self {
            host: try_load("RUST_HOST", "0.0.0.0")?,
            port: try_load("RUST_PORT", "5000")?,
            session_secret: read_secret(SESSION_SECRET)?,
            catalog_path: var("CATALOG_PATH").ok().map(PathBuf::from),
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret {
                key: SESSION_SECRET,
                min: MIN_SECRET_LEN,
            });
        }

        Ok(())
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("session_secret", &"<redacted>")
            .field("catalog_path", &self.catalog_path)
            .finish()
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("Environment variable {key} not found");
    })
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse::<T>()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }
        })
}

/// Docker secret first, then the plain environment variable.
fn read_secret(secret_name: &'static str) -> Result<String, ConfigError> {
    let path = format!("/run/secrets/{secret_name}");

    match read_to_string(&path) {
        Ok(secret) => Ok(secret.trim().to_string()),
        Err(e) => {
            warn!("Failed to read {secret_name} from file: {e}");

            var(secret_name)
                .map(|secret| secret.trim().to_string())
                .map_err(|_| ConfigError::Missing { key: secret_name })
        }
    }
}
