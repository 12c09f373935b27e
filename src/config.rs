//! Environment configuration for the PropLink backend connection

use std::env;
use std::time::Duration;

use crate::error::Error;

/// Connection configuration for the managed backend.
///
/// Both `SUPABASE_URL` and `SUPABASE_ANON_KEY` are required; a missing value
/// is a fatal startup condition.
#[derive(Debug, Clone)]
pub struct Config {
    /// The base URL for the Supabase project
    pub supabase_url: String,

    /// The anonymous API key for the Supabase project
    pub supabase_anon_key: String,

    /// Port for the HTTP server (defaults to 8080)
    pub port: u16,

    /// The request timeout
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self, Error> {
        let supabase_url = env::var("SUPABASE_URL")
            .map_err(|_| Error::config("SUPABASE_URL must be set"))?;
        let supabase_anon_key = env::var("SUPABASE_ANON_KEY")
            .map_err(|_| Error::config("SUPABASE_ANON_KEY must be set"))?;

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| Error::config(format!("invalid PORT value: {}", value)))?,
            Err(_) => 8080,
        };

        Ok(Self {
            supabase_url,
            supabase_anon_key,
            port,
            request_timeout: Duration::from_secs(30),
        })
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Duration) -> Self {
        self.request_timeout = value;
        self
    }
}
