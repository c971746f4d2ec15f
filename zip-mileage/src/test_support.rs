//! Shared helpers for tests: a local directions endpoint and CSV fixtures.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;

pub(crate) const API_KEY: &str = "test-key";

pub(crate) const HEADER: &str =
    "CUS_NO,SHP_NO,CUS_NM,ADDR1,ADDR2,ADDR,CITY_STATE,POSTAL_CODE,ZIP_ADDRESS,ZIP_MILEAGE";

/// JSON body for a successful one-leg route.
pub(crate) fn route_json(metres: u64, end_address: &str) -> String {
    serde_json::json!({
        "status": "OK",
        "routes": [{
            "legs": [{
                "distance": {"text": "", "value": metres},
                "end_address": end_address
            }]
        }]
    })
    .to_string()
}

/// A directions endpoint on 127.0.0.1 serving canned answers by destination.
///
/// Requests with the wrong `key` get 403; unknown destinations get
/// `ZERO_RESULTS`.
pub(crate) struct StubDirections {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl StubDirections {
    pub(crate) async fn spawn(answers: Vec<(&str, StatusCode, String)>) -> Self {
        let answers: Arc<HashMap<String, (StatusCode, String)>> = Arc::new(
            answers
                .into_iter()
                .map(|(dest, status, body)| (dest.to_string(), (status, body)))
                .collect(),
        );
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let app = Router::new().route(
            "/json",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let answers = answers.clone();
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    if params.get("key").map(String::as_str) != Some(API_KEY) {
                        return (StatusCode::FORBIDDEN, String::new());
                    }
                    let destination = params.get("destination").cloned().unwrap_or_default();
                    match answers.get(&destination) {
                        Some((status, body)) => (*status, body.clone()),
                        None => (
                            StatusCode::OK,
                            r#"{"status": "ZERO_RESULTS", "routes": []}"#.to_string(),
                        ),
                    }
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}/json"),
            hits,
        }
    }

    /// Requests received so far.
    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Write an input CSV under `dir` with the standard header and `rows`.
pub(crate) fn write_csv(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("ship_to_addresses.csv");
    let mut text = format!("{HEADER}\r\n");
    for row in rows {
        text.push_str(row);
        text.push_str("\r\n");
    }
    std::fs::write(&path, text).unwrap();
    path
}

/// Write a properties file under `dir`.
pub(crate) fn write_properties(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("maps.properties");
    std::fs::write(&path, body).unwrap();
    path
}

/// Read an output CSV as lines, without terminators.
pub(crate) fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .split("\r\n")
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
