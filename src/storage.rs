//! Storage operations for property media files

use reqwest::{multipart, Client};

use crate::error::Error;
use crate::fetch::Fetch;
use crate::postgrest::CLIENT_INFO;

/// Bucket holding listing photos
pub const IMAGES_BUCKET: &str = "property-images";

/// Bucket holding listing videos
pub const VIDEOS_BUCKET: &str = "property-videos";

/// Client for the storage service
pub struct StorageClient {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// HTTP client used for requests
    client: Client,
}

/// Client for a specific storage bucket
pub struct BucketClient<'a> {
    /// Reference to the storage client
    storage: &'a StorageClient,

    /// The bucket ID
    bucket_id: String,
}

/// Options for uploading a file
#[derive(Debug, Clone, Default)]
pub struct FileOptions {
    /// Cache control header
    pub cache_control: Option<String>,

    /// Content type of the uploaded bytes
    pub content_type: Option<String>,

    /// Whether to overwrite an existing object at the same path
    pub upsert: bool,
}

impl FileOptions {
    /// Set the content type
    pub fn with_content_type(mut self, value: &str) -> Self {
        self.content_type = Some(value.to_string());
        self
    }
}

impl StorageClient {
    /// Create a new StorageClient
    pub(crate) fn new(url: &str, key: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
        }
    }

    /// Get the base URL for storage operations
    fn get_url(&self, path: &str) -> String {
        format!("{}/storage/v1{}", self.url, path)
    }

    /// Get a client for a specific bucket
    pub fn from(&self, bucket_id: &str) -> BucketClient {
        BucketClient {
            storage: self,
            bucket_id: bucket_id.to_string(),
        }
    }
}

impl<'a> BucketClient<'a> {
    /// Upload raw bytes to the bucket at `path`
    pub async fn upload(
        &self,
        token: &str,
        path: &str,
        file_data: Vec<u8>,
        options: FileOptions,
    ) -> Result<(), Error> {
        let url = self
            .storage
            .get_url(&format!("/object/{}/{}", self.bucket_id, path));

        let file_name = path
            .rsplit('/')
            .next()
            .unwrap_or("file")
            .to_string();

        let mut part = multipart::Part::bytes(file_data).file_name(file_name);
        if let Some(ref content_type) = options.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| Error::storage(format!("invalid content type: {}", e)))?;
        }
        let form = multipart::Form::new().part("file", part);

        let response = self
            .storage
            .client
            .post(&url)
            .header("apikey", &self.storage.key)
            .header("X-Client-Info", CLIENT_INFO)
            .bearer_auth(token)
            .header(
                "Cache-Control",
                options.cache_control.unwrap_or_else(|| "3600".to_string()),
            )
            .header("x-upsert", options.upsert.to_string())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(Error::storage(format!(
                "Upload failed with status {}: {}",
                status, text
            )));
        }

        Ok(())
    }

    /// Delete objects in the bucket
    pub async fn remove(&self, token: &str, paths: &[&str]) -> Result<(), Error> {
        let url = self.storage.get_url(&format!("/object/{}", self.bucket_id));

        let body = serde_json::json!({
            "prefixes": paths,
        });

        let response = Fetch::delete(&self.storage.client, &url)
            .header("apikey", &self.storage.key)
            .header("X-Client-Info", CLIENT_INFO)
            .bearer_auth(token)
            .json(&body)?
            .execute_raw()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(Error::storage(format!(
                "Remove failed with status {}: {}",
                status, text
            )));
        }

        Ok(())
    }

    /// Get the public URL for an object. Purely string construction, no
    /// network round trip.
    pub fn get_public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.storage.url, self.bucket_id, path
        )
    }
}

/// Split a public object URL back into its bucket and object path. Returns
/// `None` for URLs that do not point at public storage.
pub fn parse_public_url(url: &str) -> Option<(&str, &str)> {
    let (_, rest) = url.split_once("/storage/v1/object/public/")?;
    rest.split_once('/')
}
