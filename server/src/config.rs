use anyhow::{Context, Result};
use platform_db::DatabaseSettings;
use platform_obs::ObsConfig;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub obs: ObsConfig,
}

impl AppConfig {
    /// Loads `.env` when present, then reads the process environment.
    pub fn load() -> Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err).context("reading .env");
            }
        }
        let database = DatabaseSettings::from_env().context("database settings")?;
        let obs = ObsConfig::from_env(env!("CARGO_BIN_NAME"));
        Ok(Self { database, obs })
    }
}
