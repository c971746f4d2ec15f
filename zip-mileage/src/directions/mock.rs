//! Mock directions client for running without API access.
//!
//! Loads canned directions responses from JSON files and serves them as
//! if they were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::DirectionsService;
use super::client::check_status;
use super::error::DirectionsError;
use super::types::DirectionsResponse;

/// Mock client that serves data from JSON files.
///
/// Useful for dry runs and testing without real API credentials.
#[derive(Debug, Clone)]
pub struct MockDirectionsClient {
    /// Pre-loaded responses, keyed by destination.
    responses: Arc<HashMap<String, DirectionsResponse>>,
}

impl MockDirectionsClient {
    /// Create a new mock client by loading JSON files from a directory.
    ///
    /// Expects files named `{destination}.json` (e.g., `62701.json`).
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, DirectionsError> {
        let data_dir = data_dir.as_ref();
        let mut responses = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            DirectionsError::NotConfigured(format!(
                "failed to read mock data directory {}: {e}",
                data_dir.display()
            ))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                DirectionsError::NotConfigured(format!("failed to read directory entry: {e}"))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let destination = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| {
                    DirectionsError::NotConfigured(format!("invalid filename: {}", path.display()))
                })?
                .to_string();

            let json = std::fs::read_to_string(&path).map_err(|e| {
                DirectionsError::NotConfigured(format!("failed to read {}: {e}", path.display()))
            })?;

            let response: DirectionsResponse =
                serde_json::from_str(&json).map_err(|e| DirectionsError::Json {
                    message: format!("{}: {e}", path.display()),
                    body: None,
                })?;

            responses.insert(destination, response);
        }

        if responses.is_empty() {
            return Err(DirectionsError::NotConfigured(format!(
                "no mock response files found in {}",
                data_dir.display()
            )));
        }

        Ok(Self {
            responses: Arc::new(responses),
        })
    }

    /// Look up the canned response for a destination.
    ///
    /// The origin is ignored - mock data is keyed by destination only. The
    /// body status is mapped as for a live response.
    pub fn get_directions(&self, destination: &str) -> Result<DirectionsResponse, DirectionsError> {
        let response = self
            .responses
            .get(destination.trim())
            .cloned()
            .ok_or_else(|| DirectionsError::Api {
                status: 404,
                message: format!("no mock data for destination {destination}"),
            })?;

        check_status(response)
    }

    /// List destinations available in the mock data, sorted.
    pub fn available_destinations(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.responses.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl DirectionsService for MockDirectionsClient {
    async fn directions(
        &self,
        _origin: &str,
        destination: &str,
    ) -> Result<DirectionsResponse, DirectionsError> {
        self.get_directions(destination)
    }
}
