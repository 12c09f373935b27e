//! Query builders for PostgrestClient

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Error;
use crate::fetch::Fetch;
use crate::postgrest::CLIENT_INFO;

/// Ordered query parameters.
///
/// PostgREST filter keys may repeat (each occurrence ANDs with the others),
/// so this is a list of pairs rather than a map. Insertion order is kept,
/// which also makes the produced URLs stable for tests.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create a new QueryParams
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a parameter to the query
    pub fn push(&mut self, key: &str, value: &str) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    /// Get the query parameters
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Consume into the underlying pairs
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

/// Builder for SELECT queries
pub struct SelectBuilder {
    /// The base URL for the request
    url: String,

    /// The API key
    key: String,

    /// HTTP client
    client: Client,

    /// Query parameters
    query: QueryParams,

    /// Access token of the calling user, forwarded for row-level security
    token: Option<String>,
}

impl SelectBuilder {
    /// Create a new SelectBuilder
    pub fn new(url: String, key: String, columns: &str, client: Client) -> Self {
        let mut query = QueryParams::new();
        query.push("select", columns);

        Self {
            url,
            key,
            client,
            query,
            token: None,
        }
    }

    /// Forward the calling user's access token with the request
    pub fn auth(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Filter rows where column equals a value
    pub fn eq<T: ToString>(mut self, column: &str, value: T) -> Self {
        self.query.push(column, &format!("eq.{}", value.to_string()));
        self
    }

    /// Filter rows where column is greater than or equal to a value
    pub fn gte<T: ToString>(mut self, column: &str, value: T) -> Self {
        self.query.push(column, &format!("gte.{}", value.to_string()));
        self
    }

    /// Filter rows where column is less than or equal to a value
    pub fn lte<T: ToString>(mut self, column: &str, value: T) -> Self {
        self.query.push(column, &format!("lte.{}", value.to_string()));
        self
    }

    /// Filter rows where column matches a substring, case insensitively
    pub fn ilike(mut self, column: &str, pattern: &str) -> Self {
        self.query.push(column, &format!("ilike.{}", pattern));
        self
    }

    /// Add an OR group of raw filter conditions, e.g.
    /// `title.ilike.%lekki%,description.ilike.%lekki%`. The group as a whole
    /// ANDs with every other filter on the query.
    pub fn or(mut self, conditions: &str) -> Self {
        self.query.push("or", &format!("({})", conditions));
        self
    }

    /// Order the results by a column. `nulls_last` pushes rows with a null
    /// sort key to the end, used for price sorts over optional bounds.
    pub fn order(mut self, column: &str, ascending: bool, nulls_last: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        let value = if nulls_last {
            format!("{}.{}.nullslast", column, direction)
        } else {
            format!("{}.{}", column, direction)
        };
        self.query.push("order", &value);
        self
    }

    /// Limit the number of rows returned
    pub fn limit(mut self, count: i32) -> Self {
        self.query.push("limit", &count.to_string());
        self
    }

    /// Get the query parameters built so far
    pub fn params(&self) -> &QueryParams {
        &self.query
    }

    /// Execute the query and return the results
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<Vec<T>, Error> {
        let mut fetch = Fetch::get(&self.client, &self.url)
            .header("apikey", &self.key)
            .header("X-Client-Info", CLIENT_INFO)
            .query(self.query.pairs().to_vec());

        if let Some(ref token) = self.token {
            fetch = fetch.bearer_auth(token);
        }

        let result = fetch.execute::<Vec<T>>().await?;
        Ok(result)
    }

    /// Execute the query and return the first row
    pub async fn execute_one<T: DeserializeOwned>(self) -> Result<Option<T>, Error> {
        let results = self.limit(1).execute::<T>().await?;
        Ok(results.into_iter().next())
    }
}

/// Builder for INSERT queries
pub struct InsertBuilder<T: Serialize> {
    /// The base URL for the request
    url: String,

    /// The API key
    key: String,

    /// The values to insert
    values: T,

    /// HTTP client
    client: Client,

    /// Access token of the calling user
    token: Option<String>,
}

impl<T: Serialize> InsertBuilder<T> {
    /// Create a new InsertBuilder
    pub fn new(url: String, key: String, values: T, client: Client) -> Self {
        Self {
            url,
            key,
            values,
            client,
            token: None,
        }
    }

    /// Forward the calling user's access token with the request
    pub fn auth(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Execute the query and return the inserted rows
    pub async fn execute<R: DeserializeOwned>(&self) -> Result<Vec<R>, Error> {
        let mut fetch = Fetch::post(&self.client, &self.url)
            .header("apikey", &self.key)
            .header("X-Client-Info", CLIENT_INFO)
            .header("Prefer", "return=representation");

        if let Some(ref token) = self.token {
            fetch = fetch.bearer_auth(token);
        }

        let result = fetch.json(&self.values)?.execute::<Vec<R>>().await?;
        Ok(result)
    }

    /// Execute the query and return the single inserted row
    pub async fn execute_one<R: DeserializeOwned>(&self) -> Result<R, Error> {
        let rows = self.execute::<R>().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::database("insert returned no rows"))
    }

    /// Execute the query without returning the inserted data
    pub async fn execute_no_return(&self) -> Result<(), Error> {
        let mut fetch = Fetch::post(&self.client, &self.url)
            .header("apikey", &self.key)
            .header("X-Client-Info", CLIENT_INFO)
            .header("Prefer", "return=minimal");

        if let Some(ref token) = self.token {
            fetch = fetch.bearer_auth(token);
        }

        fetch.json(&self.values)?.execute_no_content().await?;
        Ok(())
    }
}

/// Builder for UPDATE queries
pub struct UpdateBuilder<T: Serialize> {
    /// The base URL for the request
    url: String,

    /// The API key
    key: String,

    /// The values to update
    values: T,

    /// HTTP client
    client: Client,

    /// Query parameters
    query: QueryParams,

    /// Access token of the calling user
    token: Option<String>,
}

impl<T: Serialize> UpdateBuilder<T> {
    /// Create a new UpdateBuilder
    pub fn new(url: String, key: String, values: T, client: Client) -> Self {
        Self {
            url,
            key,
            values,
            client,
            query: QueryParams::new(),
            token: None,
        }
    }

    /// Forward the calling user's access token with the request
    pub fn auth(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Filter rows where column equals a value
    pub fn eq<V: ToString>(mut self, column: &str, value: V) -> Self {
        self.query.push(column, &format!("eq.{}", value.to_string()));
        self
    }

    /// Execute the query without returning the updated data
    pub async fn execute_no_return(&self) -> Result<(), Error> {
        let mut fetch = Fetch::patch(&self.client, &self.url)
            .header("apikey", &self.key)
            .header("X-Client-Info", CLIENT_INFO)
            .header("Prefer", "return=minimal")
            .query(self.query.pairs().to_vec());

        if let Some(ref token) = self.token {
            fetch = fetch.bearer_auth(token);
        }

        fetch.json(&self.values)?.execute_no_content().await?;
        Ok(())
    }
}

/// Builder for DELETE queries
pub struct DeleteBuilder {
    /// The base URL for the request
    url: String,

    /// The API key
    key: String,

    /// HTTP client
    client: Client,

    /// Query parameters
    query: QueryParams,

    /// Access token of the calling user
    token: Option<String>,
}

impl DeleteBuilder {
    /// Create a new DeleteBuilder
    pub fn new(url: String, key: String, client: Client) -> Self {
        Self {
            url,
            key,
            client,
            query: QueryParams::new(),
            token: None,
        }
    }

    /// Forward the calling user's access token with the request
    pub fn auth(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Filter rows where column equals a value
    pub fn eq<V: ToString>(mut self, column: &str, value: V) -> Self {
        self.query.push(column, &format!("eq.{}", value.to_string()));
        self
    }

    /// Execute the query without returning the deleted data
    pub async fn execute_no_return(&self) -> Result<(), Error> {
        let mut fetch = Fetch::delete(&self.client, &self.url)
            .header("apikey", &self.key)
            .header("X-Client-Info", CLIENT_INFO)
            .header("Prefer", "return=minimal")
            .query(self.query.pairs().to_vec());

        if let Some(ref token) = self.token {
            fetch = fetch.bearer_auth(token);
        }

        fetch.execute_no_content().await?;
        Ok(())
    }
}
