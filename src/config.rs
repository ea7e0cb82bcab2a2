use std::env;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::gemini::GeminiConfig;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://portal.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// `None` runs the portal with analysis disabled.
    pub gemini: Option<GeminiConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::BadRequest(format!("Invalid BIND_ADDR: {}", e)))?;

        let gemini = GeminiConfig::new_from_env().ok();

        Ok(Self {
            database_url,
            bind_addr,
            gemini,
        })
    }
}
