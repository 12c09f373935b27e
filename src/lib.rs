//! PropLink core
//!
//! A property-listing marketplace backend: sellers list houses and land with
//! photos, buyers search and filter listings and contact sellers over
//! WhatsApp. Persistence, authentication and file storage are delegated to a
//! Supabase project; this crate is the query-building and workflow glue plus
//! the presentation helpers the pages use.

pub mod auth;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod fetch;
pub mod http;
pub mod listings;
pub mod media;
pub mod model;
pub mod postgrest;
pub mod profiles;
pub mod storage;
pub mod workflow;

use reqwest::Client;

use crate::auth::Auth;
use crate::config::Config;
use crate::error::Error;
use crate::postgrest::PostgrestClient;
use crate::storage::StorageClient;

/// Entry point for talking to the backing Supabase project
pub struct Supabase {
    /// The base URL for the Supabase project
    pub url: String,

    /// The anonymous API key for the Supabase project
    pub key: String,

    /// HTTP client used for requests
    pub http_client: Client,
}

impl Supabase {
    /// Create a new client for a project URL and anonymous key
    pub fn new(supabase_url: &str, supabase_key: &str) -> Self {
        Self {
            url: supabase_url.to_string(),
            key: supabase_key.to_string(),
            http_client: Client::new(),
        }
    }

    /// Create a client from environment configuration, applying its request
    /// timeout to the underlying HTTP client
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            url: config.supabase_url.clone(),
            key: config.supabase_anon_key.clone(),
            http_client,
        })
    }

    /// Database operations on a specific table or view
    pub fn from(&self, table: &str) -> PostgrestClient {
        PostgrestClient::new(&self.url, &self.key, table, self.http_client.clone())
    }

    /// File operations against the project's storage buckets
    pub fn storage(&self) -> StorageClient {
        StorageClient::new(&self.url, &self.key, self.http_client.clone())
    }

    /// Caller identity lookups against the auth service
    pub fn auth(&self) -> Auth {
        Auth::new(&self.url, &self.key, self.http_client.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::Error;
    pub use crate::Supabase;
}
