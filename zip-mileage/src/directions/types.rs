//! Directions API response DTOs.
//!
//! These map directly to the Google Directions JSON response. Only the
//! fields the resolver reads are modelled; everything else is ignored.
//! Fields are `Option` where the service is known to omit them.

use serde::Deserialize;

/// Top-level response from the directions endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectionsResponse {
    /// Request status, e.g. `OK`, `ZERO_RESULTS`, `REQUEST_DENIED`.
    #[serde(default)]
    pub status: String,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<Route>,

    /// Human-readable detail accompanying a non-OK status.
    pub error_message: Option<String>,
}

/// One route from origin to destination.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Route {
    /// Legs between consecutive waypoints. A query without waypoints has one.
    #[serde(default)]
    pub legs: Vec<Leg>,

    /// Short description of the route, e.g. "I-80 W".
    pub summary: Option<String>,
}

/// A single leg of a route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Leg {
    /// Total length of this leg.
    pub distance: Option<Distance>,

    /// Geocoded address of the leg's end point.
    pub end_address: Option<String>,

    /// Geocoded address of the leg's start point.
    pub start_address: Option<String>,
}

/// A length as reported by the service.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Distance {
    /// Length in metres.
    pub value: u64,
}

impl DirectionsResponse {
    /// The first leg of the first route, if the response carries one.
    pub fn first_leg(&self) -> Option<&Leg> {
        self.routes.first()?.legs.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_google_shape() {
        let json = r#"{
            "geocoded_waypoints": [],
            "routes": [{
                "summary": "I-80 W",
                "legs": [{
                    "distance": {"text": "3.1 mi", "value": 5000},
                    "duration": {"text": "9 mins", "value": 540},
                    "end_address": "100 Main St, Springfield, IL 62701, USA",
                    "start_address": "1 Depot Rd, Springfield, IL 62702, USA"
                }]
            }],
            "status": "OK"
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "OK");

        let leg = response.first_leg().unwrap();
        assert_eq!(leg.distance.unwrap().value, 5000);
        assert_eq!(
            leg.end_address.as_deref(),
            Some("100 Main St, Springfield, IL 62701, USA")
        );
    }

    #[test]
    fn missing_routes_and_legs_yield_no_first_leg() {
        let response: DirectionsResponse =
            serde_json::from_str(r#"{"status": "ZERO_RESULTS", "routes": []}"#).unwrap();
        assert!(response.first_leg().is_none());

        let response: DirectionsResponse =
            serde_json::from_str(r#"{"status": "OK", "routes": [{"legs": []}]}"#).unwrap();
        assert!(response.first_leg().is_none());
    }

    #[test]
    fn leg_fields_are_optional() {
        let response: DirectionsResponse =
            serde_json::from_str(r#"{"status": "OK", "routes": [{"legs": [{}]}]}"#).unwrap();
        let leg = response.first_leg().unwrap();
        assert!(leg.distance.is_none());
        assert!(leg.end_address.is_none());
    }
}
