//! HAFAS REST HTTP client.
//!
//! Talks to a `hafas-rest-api` instance fronting the ÖBB HAFAS backend.
//! The client only knows the two endpoints the fetcher needs: location
//! search and station departures.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use super::error::HafasError;
use super::source::TimetableSource;
use super::types::{DeparturesResponse, Location, RawDeparture};

/// Default base URL: a locally running `hafas-rest-api` with the ÖBB profile.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the HAFAS client.
#[derive(Debug, Clone)]
pub struct HafasConfig {
    /// Base URL of the REST API, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Value of the User-Agent header
    pub user_agent: String,
}

impl HafasConfig {
    /// Create a new config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("corridor-fetcher/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for HafasConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// HAFAS REST API client.
#[derive(Debug, Clone)]
pub struct HafasClient {
    http: reqwest::Client,
    base_url: String,
}

impl HafasClient {
    /// Create a new client with the given configuration.
    pub fn new(config: HafasConfig) -> Result<Self, HafasError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| HafasError::InvalidConfig("invalid User-Agent header".to_string()))?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a URL and return the body, mapping error statuses.
    async fn get_body(&self, url: &str, query: &[(&str, String)]) -> Result<String, HafasError> {
        debug!(url, ?query, "requesting timetable data");

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        let body = if status.is_success() {
            response.text().await?
        } else {
            response.text().await.unwrap_or_default()
        };
        check_status(status, body)
    }
}

/// Map a response status to an error, passing successful bodies through.
fn check_status(status: StatusCode, body: String) -> Result<String, HafasError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(HafasError::RateLimited);
    }

    if !status.is_success() {
        return Err(HafasError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(body)
}

impl TimetableSource for HafasClient {
    async fn locations(&self, query: &str, results: u8) -> Result<Vec<Location>, HafasError> {
        let url = format!("{}/locations", self.base_url);
        let body = self
            .get_body(
                &url,
                &[
                    ("query", query.to_string()),
                    ("results", results.to_string()),
                    ("stops", "true".to_string()),
                    ("addresses", "false".to_string()),
                    ("poi", "false".to_string()),
                ],
            )
            .await?;

        parse_locations(&body)
    }

    async fn departures(
        &self,
        station_id: &str,
        duration_mins: u32,
        results: u32,
    ) -> Result<Vec<RawDeparture>, HafasError> {
        let url = format!("{}/stops/{}/departures", self.base_url, station_id);
        let body = self
            .get_body(
                &url,
                &[
                    ("duration", duration_mins.to_string()),
                    ("results", results.to_string()),
                ],
            )
            .await?;

        parse_departures(&body)
    }
}

/// Parse a `/locations` response body. `null` or empty means no results.
pub(crate) fn parse_locations(body: &str) -> Result<Vec<Location>, HafasError> {
    if body.trim().is_empty() || body.trim() == "null" {
        return Ok(Vec::new());
    }

    serde_json::from_str(body).map_err(|e| HafasError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}

/// Parse a departures response body in either of its shapes.
pub(crate) fn parse_departures(body: &str) -> Result<Vec<RawDeparture>, HafasError> {
    if body.trim().is_empty() || body.trim() == "null" {
        return Ok(Vec::new());
    }

    let response: DeparturesResponse =
        serde_json::from_str(body).map_err(|e| HafasError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

    Ok(response.into_departures())
}
