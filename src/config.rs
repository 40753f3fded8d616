use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // HTTP server
    pub port: u16,

    // Gemini answer service
    pub gemini_endpoint: String,
    pub gemini_api_key: String,
    pub gemini_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // HTTP server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Gemini
            gemini_endpoint: std::env::var("GEMINI_ENDPOINT")
                .context("GEMINI_ENDPOINT not set")?,
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .context("GEMINI_API_KEY not set")?,
            gemini_timeout_secs: std::env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        })
    }
}
