use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub data_dir: PathBuf,
    pub admin_user: String,
    pub admin_pass: String,
    pub session_secret: String,
    pub production: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let admin_pass = get_env("ADMIN_PASS")?;
        // The session secret falls back to the admin password when unset.
        let session_secret = env::var("ADMIN_SESSION_SECRET").unwrap_or_else(|_| admin_pass.clone());

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()).into(),
            admin_user: get_env("ADMIN_USER")?,
            admin_pass,
            session_secret,
            production: matches!(
                env::var("APP_ENV").as_deref(),
                Ok("production") | Ok("prod")
            ),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
