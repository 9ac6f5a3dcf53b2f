//! Thin client for the Supabase PostgREST endpoint
//!
//! Covers exactly the operations the app uses: filtered selects with
//! ordering and limits, exact row counts, single-row inserts, and
//! deletes by equality filter.

use serde::de::DeserializeOwned;
use serde::Serialize;
use truckops_types::{Error, Result};

/// Client for one Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    http: reqwest::blocking::Client,
}

impl SupabaseClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn http(&self) -> &reqwest::blocking::Client {
        &self.http
    }

    /// Start a query against one table.
    pub fn table(&self, name: &str) -> TableQuery<'_> {
        TableQuery {
            client: self,
            table: name.to_string(),
            params: Vec::new(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_headers(
        &self,
        req: reqwest::blocking::RequestBuilder,
        access_token: &str,
    ) -> reqwest::blocking::RequestBuilder {
        req.header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {access_token}"))
    }
}

/// One pending table operation, built up PostgREST-style.
pub struct TableQuery<'a> {
    client: &'a SupabaseClient,
    table: String,
    params: Vec<(String, String)>,
}

impl<'a> TableQuery<'a> {
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.to_string(), format!("eq.{value}")));
        self
    }

    pub fn gte(mut self, column: &str, value: &str) -> Self {
        self.params
            .push((column.to_string(), format!("gte.{value}")));
        self
    }

    pub fn lt(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.to_string(), format!("lt.{value}")));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.params
            .push(("order".to_string(), format!("{column}.desc")));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".to_string(), n.to_string()));
        self
    }

    /// The query parameters as they will be sent.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Execute the select and deserialize the row list.
    pub fn fetch<T: DeserializeOwned>(self, access_token: &str) -> Result<Vec<T>> {
        let url = self.client.table_url(&self.table);
        let req = self.client.http().get(&url).query(&self.params);
        let resp = self
            .client
            .auth_headers(req, access_token)
            .send()
            .map_err(|e| Error::Network(e.to_string()))?;
        let resp = check_status(resp)?;
        resp.json::<Vec<T>>()
            .map_err(|e| Error::Network(format!("Malformed response body: {e}")))
    }

    /// Exact row count for the current filters, computed on the store.
    pub fn count(mut self, access_token: &str) -> Result<u64> {
        // Keep the body minimal; the count rides on the Content-Range header.
        self.params.push(("limit".to_string(), "1".to_string()));
        let url = self.client.table_url(&self.table);
        let req = self
            .client
            .http()
            .get(&url)
            .query(&self.params)
            .header("Prefer", "count=exact");
        let resp = self
            .client
            .auth_headers(req, access_token)
            .send()
            .map_err(|e| Error::Network(e.to_string()))?;
        let resp = check_status(resp)?;
        let range = resp
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Error::Network("Missing Content-Range header".to_string()))?;
        parse_content_range(range)
    }

    /// Insert one row.
    pub fn insert<T: Serialize>(self, row: &T, access_token: &str) -> Result<()> {
        let url = self.client.table_url(&self.table);
        let req = self
            .client
            .http()
            .post(&url)
            .header("Prefer", "return=minimal")
            .json(row);
        let resp = self
            .client
            .auth_headers(req, access_token)
            .send()
            .map_err(|e| Error::Network(e.to_string()))?;
        check_status(resp).map(|_| ())
    }

    /// Delete the rows matching the current equality filters.
    pub fn delete(self, access_token: &str) -> Result<()> {
        let url = self.client.table_url(&self.table);
        let req = self.client.http().delete(&url).query(&self.params);
        let resp = self
            .client
            .auth_headers(req, access_token)
            .send()
            .map_err(|e| Error::Network(e.to_string()))?;
        check_status(resp).map(|_| ())
    }
}

fn check_status(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    tracing::warn!(%status, "table request rejected");
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        Err(Error::Auth(format!("Request rejected with {status}")))
    } else {
        Err(Error::Network(format!("Request failed with {status}")))
    }
}

/// Parse a PostgREST `Content-Range` value like `0-9/57` or `*/57`.
fn parse_content_range(value: &str) -> Result<u64> {
    value
        .rsplit('/')
        .next()
        .and_then(|total| total.parse::<u64>().ok())
        .ok_or_else(|| Error::Network(format!("Unparsable Content-Range: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SupabaseClient {
        SupabaseClient::new("https://proj.supabase.co/", "anon-key").unwrap()
    }

    #[test]
    fn base_url_is_trimmed() {
        assert_eq!(client().base_url(), "https://proj.supabase.co");
    }

    #[test]
    fn filters_build_postgrest_params() {
        let c = client();
        let q = c
            .table("Loads")
            .select("date,total_rate")
            .gte("date", "2026-08-24")
            .lt("date", "2026-08-31")
            .eq("dispatcher_name", "user-1")
            .order_desc("date")
            .limit(10);

        let params = q.query_params();
        assert_eq!(
            params,
            &[
                ("select".to_string(), "date,total_rate".to_string()),
                ("date".to_string(), "gte.2026-08-24".to_string()),
                ("date".to_string(), "lt.2026-08-31".to_string()),
                ("dispatcher_name".to_string(), "eq.user-1".to_string()),
                ("order".to_string(), "date.desc".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn content_range_with_span() {
        assert_eq!(parse_content_range("0-9/57").unwrap(), 57);
    }

    #[test]
    fn content_range_without_span() {
        assert_eq!(parse_content_range("*/0").unwrap(), 0);
    }

    #[test]
    fn content_range_garbage_is_an_error() {
        assert!(parse_content_range("nonsense").is_err());
    }
}
