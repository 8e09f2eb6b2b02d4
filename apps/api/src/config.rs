use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::models::generation::CategoryScheme;

pub const DEFAULT_GENERATION_API_URL: &str = "http://localhost:8080";

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub generation_api_url: String,
    /// True when `BLOG_API_URL` was unset and the local default is in use.
    /// Reported by `main` once logging is up.
    pub generation_api_url_defaulted: bool,
    /// `None` keeps the HTTP client's own default.
    pub generation_timeout: Option<Duration>,
    pub category_scheme: CategoryScheme,
    pub session_idle_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let (generation_api_url, generation_api_url_defaulted) =
            match lookup("BLOG_API_URL").filter(|v| !v.trim().is_empty()) {
                Some(url) => (url.trim().to_string(), false),
                None => (DEFAULT_GENERATION_API_URL.to_string(), true),
            };

        let generation_timeout = lookup("GENERATION_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>()
                    .context("GENERATION_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?
            .map(Duration::from_secs);

        let category_scheme = match lookup("CATEGORY_SCHEME").as_deref() {
            None | Some("style") => CategoryScheme::Style,
            Some("content_type") => CategoryScheme::ContentType,
            Some(other) => {
                bail!("CATEGORY_SCHEME must be 'style' or 'content_type', got '{other}'")
            }
        };

        let session_idle_secs = lookup("SESSION_IDLE_SECS")
            .unwrap_or_else(|| "900".to_string())
            .parse::<u64>()
            .context("SESSION_IDLE_SECS must be a whole number of seconds")?;

        Ok(Config {
            generation_api_url,
            generation_api_url_defaulted,
            generation_timeout,
            category_scheme,
            session_idle_ttl: Duration::from_secs(session_idle_secs),
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
