//! Directions HTTP client.
//!
//! Wraps the Google Directions JSON endpoint. Enforces an outbound query
//! rate ceiling and independent connect/read/write time bounds, which is all
//! a metered batch job needs from it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::DirectionsService;
use super::error::DirectionsError;
use super::types::DirectionsResponse;

/// Default endpoint for directions queries.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Default outbound ceiling, in queries per second.
const DEFAULT_QUERY_RATE: u32 = 3;

/// Default for each of the connect/read/write timeouts.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Configuration for the directions client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Directions endpoint (defaults to the production JSON endpoint)
    pub base_url: String,
    /// Maximum queries started per second
    pub query_rate: u32,
    /// Time allowed to establish a connection
    pub connect_timeout: Duration,
    /// Time allowed between reads of the response
    pub read_timeout: Duration,
    /// Time allowed to send the request
    pub write_timeout: Duration,
}

impl ClientConfig {
    /// Create a new config with the given API key and conservative defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            query_rate: DEFAULT_QUERY_RATE,
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
            write_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom endpoint (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the outbound query rate ceiling.
    pub fn with_query_rate(mut self, per_second: u32) -> Self {
        self.query_rate = per_second;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the read timeout.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the write timeout.
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Overall bound on one request/response exchange.
    ///
    /// reqwest has no separate write timeout, so the write budget is folded
    /// into a whole-request deadline alongside connect and read.
    pub fn request_timeout(&self) -> Duration {
        self.connect_timeout + self.read_timeout + self.write_timeout
    }
}

/// Spaces request start times at least `interval` apart.
#[derive(Debug)]
pub(crate) struct RateLimiter {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub(crate) fn per_second(rate: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / rate.max(1),
            next_slot: Mutex::new(None),
        }
    }

    /// Wait until the next request may start, and reserve that slot.
    pub(crate) async fn acquire(&self) {
        let start = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let start = match *next {
                Some(slot) if slot > now => slot,
                _ => now,
            };
            *next = Some(start + self.interval);
            start
        };

        let wait = start.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            debug!(wait_ms = wait.as_millis() as u64, "rate limit delay");
            tokio::time::sleep_until(start).await;
        }
    }
}

/// Directions API client.
///
/// Cheap to clone; clones share the rate limiter.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    limiter: Arc<RateLimiter>,
}

impl DirectionsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, DirectionsError> {
        if config.query_rate == 0 {
            return Err(DirectionsError::NotConfigured(
                "query rate must be at least 1 per second".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            limiter: Arc::new(RateLimiter::per_second(config.query_rate)),
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Get driving directions from `origin` to `destination`.
    ///
    /// `ZERO_RESULTS` is returned as an `Ok` response with no routes; any
    /// other non-`OK` status is an error.
    pub async fn get_directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DirectionsResponse, DirectionsError> {
        self.limiter.acquire().await;

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DirectionsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectionsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let directions: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        check_status(directions)
    }
}

impl DirectionsService for DirectionsClient {
    async fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DirectionsResponse, DirectionsError> {
        self.get_directions(origin, destination).await
    }
}

/// Map the body-level status onto the error taxonomy.
pub(super) fn check_status(
    response: DirectionsResponse,
) -> Result<DirectionsResponse, DirectionsError> {
    if matches!(response.status.as_str(), "OK" | "ZERO_RESULTS") {
        return Ok(response);
    }

    if response.status == "OVER_QUERY_LIMIT" {
        return Err(DirectionsError::RateLimited);
    }

    Err(DirectionsError::Status {
        status: response.status,
        message: response.error_message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = ClientConfig::new("test-key")
            .with_base_url("http://localhost:8080/json")
            .with_query_rate(10)
            .with_connect_timeout(Duration::from_secs(1))
            .with_read_timeout(Duration::from_secs(5))
            .with_write_timeout(Duration::from_secs(3));

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080/json");
        assert_eq!(config.query_rate, 10);
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert_eq!(config.write_timeout, Duration::from_secs(3));
        assert_eq!(config.request_timeout(), Duration::from_secs(9));
    }

    #[test]
    fn config_defaults() {
        let config = ClientConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.query_rate, 3);
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.read_timeout, Duration::from_secs(2));
        assert_eq!(config.write_timeout, Duration::from_secs(2));
    }

    #[test]
    fn client_creation() {
        assert!(DirectionsClient::new(ClientConfig::new("test-key")).is_ok());
    }

    #[test]
    fn zero_rate_is_rejected() {
        let result = DirectionsClient::new(ClientConfig::new("test-key").with_query_rate(0));
        assert!(matches!(result, Err(DirectionsError::NotConfigured(_))));
    }

    #[test]
    fn status_mapping() {
        let with_status = |status: &str, message: Option<&str>| DirectionsResponse {
            status: status.to_string(),
            routes: Vec::new(),
            error_message: message.map(str::to_string),
        };

        assert!(check_status(with_status("OK", None)).is_ok());
        assert!(check_status(with_status("ZERO_RESULTS", None)).is_ok());
        assert!(matches!(
            check_status(with_status("OVER_QUERY_LIMIT", None)),
            Err(DirectionsError::RateLimited)
        ));
        assert!(matches!(
            check_status(with_status("REQUEST_DENIED", Some("The provided API key is invalid."))),
            Err(DirectionsError::Status { status, .. }) if status == "REQUEST_DENIED"
        ));
        assert!(matches!(
            check_status(with_status("NOT_FOUND", Some("no such place"))),
            Err(DirectionsError::Status { status, message: Some(m) })
                if status == "NOT_FOUND" && m == "no such place"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limiter_spaces_requests() {
        let limiter = RateLimiter::per_second(4);
        let begin = Instant::now();

        for _ in 0..5 {
            limiter.acquire().await;
        }

        // First slot is immediate, then four gaps of 250ms
        assert!(Instant::now() - begin >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limiter_does_not_delay_after_idle() {
        let limiter = RateLimiter::per_second(1);
        limiter.acquire().await;
        tokio::time::sleep(Duration::from_secs(5)).await;

        let before = Instant::now();
        limiter.acquire().await;
        assert_eq!(Instant::now(), before);
    }

    mod http {
        use super::*;
        use crate::test_support::{API_KEY, StubDirections, route_json};
        use axum::http::StatusCode;

        fn client_for(stub: &StubDirections, key: &str) -> DirectionsClient {
            DirectionsClient::new(
                ClientConfig::new(key)
                    .with_base_url(&stub.url)
                    .with_query_rate(100),
            )
            .unwrap()
        }

        #[tokio::test]
        async fn parses_successful_route() {
            let stub = StubDirections::spawn(vec![(
                "62701",
                StatusCode::OK,
                route_json(5000, "100 Main St"),
            )])
            .await;

            let response = client_for(&stub, API_KEY)
                .get_directions("1 Depot Rd", "62701")
                .await
                .unwrap();

            let leg = response.first_leg().unwrap();
            assert_eq!(leg.distance.unwrap().value, 5000);
            assert_eq!(leg.end_address.as_deref(), Some("100 Main St"));
            assert_eq!(stub.hits(), 1);
        }

        #[tokio::test]
        async fn zero_results_is_empty_not_error() {
            let stub = StubDirections::spawn(Vec::new()).await;

            let response = client_for(&stub, API_KEY)
                .get_directions("1 Depot Rd", "00000")
                .await
                .unwrap();

            assert!(response.first_leg().is_none());
        }

        #[tokio::test]
        async fn wrong_key_is_unauthorized() {
            let stub = StubDirections::spawn(Vec::new()).await;

            let result = client_for(&stub, "wrong")
                .get_directions("1 Depot Rd", "62701")
                .await;

            assert!(matches!(result, Err(DirectionsError::Unauthorized)));
        }

        #[tokio::test]
        async fn server_error_is_api_error() {
            let stub = StubDirections::spawn(vec![(
                "62701",
                StatusCode::INTERNAL_SERVER_ERROR,
                "upstream down".to_string(),
            )])
            .await;

            let result = client_for(&stub, API_KEY)
                .get_directions("1 Depot Rd", "62701")
                .await;

            assert!(matches!(
                result,
                Err(DirectionsError::Api { status: 500, message }) if message == "upstream down"
            ));
        }

        #[tokio::test]
        async fn too_many_requests_is_rate_limited() {
            let stub = StubDirections::spawn(vec![(
                "62701",
                StatusCode::TOO_MANY_REQUESTS,
                String::new(),
            )])
            .await;

            let result = client_for(&stub, API_KEY)
                .get_directions("1 Depot Rd", "62701")
                .await;

            assert!(matches!(result, Err(DirectionsError::RateLimited)));
        }

        #[tokio::test]
        async fn malformed_body_is_json_error() {
            let stub =
                StubDirections::spawn(vec![("62701", StatusCode::OK, "<html>".to_string())]).await;

            let result = client_for(&stub, API_KEY)
                .get_directions("1 Depot Rd", "62701")
                .await;

            assert!(matches!(
                result,
                Err(DirectionsError::Json { body: Some(body), .. }) if body == "<html>"
            ));
        }

        #[tokio::test]
        async fn non_ok_status_is_status_error() {
            let body = r#"{"status": "NOT_FOUND", "routes": [], "error_message": "bad destination"}"#;
            let stub =
                StubDirections::spawn(vec![("62701", StatusCode::OK, body.to_string())]).await;

            let result = client_for(&stub, API_KEY)
                .get_directions("1 Depot Rd", "62701")
                .await;

            assert!(matches!(
                result,
                Err(DirectionsError::Status { status, .. }) if status == "NOT_FOUND"
            ));
        }

        #[tokio::test]
        async fn unreachable_endpoint_is_http_error() {
            let client = DirectionsClient::new(
                ClientConfig::new(API_KEY)
                    .with_base_url("http://127.0.0.1:1/json")
                    .with_connect_timeout(Duration::from_millis(200)),
            )
            .unwrap();

            let result = client.get_directions("1 Depot Rd", "62701").await;
            assert!(matches!(result, Err(DirectionsError::Http(_))));
        }
    }
}
