//! Caller identity lookup against the backend auth service
//!
//! The app never issues or refreshes tokens itself; a page hands the caller's
//! access token to each operation explicitly, and this module resolves it to
//! a user via the GoTrue `/user` endpoint. No session state is kept here.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::fetch::Fetch;
use crate::postgrest::CLIENT_INFO;

/// Client for the backend auth service
pub struct Auth {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// HTTP client used for requests
    client: Client,
}

/// The authenticated user behind an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The user ID; profiles and properties key off this
    pub id: Uuid,

    /// The user's email address
    pub email: Option<String>,

    /// The user's phone number
    pub phone: Option<String>,

    /// The creation time
    pub created_at: Option<String>,

    /// The auth-level role (not the application role on the profile)
    pub role: Option<String>,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(url: &str, key: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url, path)
    }

    /// Resolve an access token to the user it belongs to.
    ///
    /// An invalid or expired token surfaces as `Error::Auth`; callers treat
    /// that as "not signed in" and redirect or reject.
    pub async fn get_user(&self, access_token: &str) -> Result<User, Error> {
        let url = self.get_auth_url("/user");

        let response = Fetch::get(&self.client, &url)
            .header("apikey", &self.key)
            .header("X-Client-Info", CLIENT_INFO)
            .bearer_auth(access_token)
            .execute_raw()
            .await?;

        if !response.status().is_success() {
            return Err(Error::auth("Invalid or expired access token"));
        }

        let user = response.json::<User>().await?;
        Ok(user)
    }
}
