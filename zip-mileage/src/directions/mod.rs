//! Directions service client.
//!
//! This module provides an HTTP client for the Google Directions API and a
//! fixture-backed stand-in, both behind [`DirectionsService`].
//!
//! Only a sliver of the response matters here:
//! - the first leg of the first route
//! - that leg's distance, in metres
//! - that leg's geocoded end address

mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::future::Future;

pub use client::{ClientConfig, DirectionsClient};
pub use convert::{Resolution, metres_to_miles, resolution_from};
pub use error::DirectionsError;
pub use mock::MockDirectionsClient;
pub use types::{DirectionsResponse, Distance, Leg, Route};

/// Anything that can answer "how do I get from here to there".
pub trait DirectionsService {
    /// Fetch directions from `origin` to `destination`.
    fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> impl Future<Output = Result<DirectionsResponse, DirectionsError>> + Send;
}
