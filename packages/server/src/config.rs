use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub openai_api_key: String,
    pub speech_api_key: String,
    pub speech_region: String,
    pub storage_bucket: String,
    pub storage_region: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
            speech_api_key: env::var("SPEECH_API_KEY").context("SPEECH_API_KEY must be set")?,
            speech_region: env::var("SPEECH_REGION")
                .unwrap_or_else(|_| "eastus".to_string()),
            storage_bucket: env::var("STORAGE_BUCKET").context("STORAGE_BUCKET must be set")?,
            storage_region: env::var("STORAGE_REGION")
                .unwrap_or_else(|_| "us-east-1".to_string()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "studykit".to_string()),
        })
    }
}
