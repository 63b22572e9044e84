//! Store connection settings, read once at process start.

use crate::error::Result;
use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use std::env;
use tokio_postgres::NoTls;

/// Connection parameters for the price store.
///
/// `POSTGRES_URL` wins when set; otherwise the discrete `PG_*` variables
/// are used. Binaries call `dotenv()` before reading, so a `.env` file
/// works as the configuration source.
#[derive(Debug, Clone, Default)]
pub struct DbConfig {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub dbname: Option<String>,
}

impl DbConfig {
    pub fn from_env() -> Self {
        Self {
            url: env_str("POSTGRES_URL"),
            host: env_str("PG_HOST"),
            port: env_str("PG_PORT").and_then(|s| s.parse().ok()),
            user: env_str("PG_USER"),
            password: env_str("PG_PASSWORD"),
            dbname: env_str("PG_DATABASE"),
        }
    }

    /// Build the deadpool pool this configuration describes.
    pub fn create_pool(&self) -> Result<Pool> {
        let mut cfg = Config::new();
        if self.url.is_some() {
            cfg.url = self.url.clone();
        } else {
            cfg.host = self.host.clone();
            cfg.port = self.port;
            cfg.user = self.user.clone();
            cfg.password = self.password.clone();
            cfg.dbname = self.dbname.clone();
        }
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        Ok(cfg.create_pool(Some(Runtime::Tokio1), NoTls)?)
    }
}

fn env_str(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
