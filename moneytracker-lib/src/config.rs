use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;
use std::{env, fs};

#[derive(Deserialize)]
pub struct Config {
    pub database_url: String,
    pub signups_enabled: bool,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
}

fn default_bind_address() -> String {
    "0.0.0.0:8000".to_owned()
}

fn default_max_pool_size() -> u32 {
    10
}

impl Config {
    pub fn from_file(path: PathBuf) -> Result<Config, anyhow::Error> {
        let config = fs::read_to_string(path).context("Unable to read config file")?;
        let config: Config =
            toml::from_str(config.as_str()).with_context(|| "Unable to parse config")?;
        Ok(config)
    }

    pub fn from_env() -> Result<Config, anyhow::Error> {
        let signups_enabled = read_env("SIGNUPS_ENABLED")?;
        let signups_enabled = signups_enabled
            .parse()
            .context("Unable to parse SIGNUPS_ENABLED value")?;
        let database_url = read_env("DATABASE_URL")?;
        let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| default_bind_address());
        let max_pool_size = match env::var("MAX_POOL_SIZE") {
            Ok(value) => value.parse().context("Unable to parse MAX_POOL_SIZE value")?,
            Err(_) => default_max_pool_size(),
        };

        let config = Config {
            database_url,
            signups_enabled,
            bind_address,
            max_pool_size,
        };
        Ok(config)
    }
}

fn read_env(key: &str) -> Result<String, anyhow::Error> {
    env::var(key).with_context(|| format!("Unable to read env var: {}", key))
}
