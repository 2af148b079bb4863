//! Test helper utilities for driving the router in-process

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use reqwest::StatusCode as HttpStatus;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use tower::ServiceExt;

use visit_image_jobs::{
    app_state::AppState,
    config::{ProcessingConfig, DEFAULT_MAX_BODY_BYTES},
    models::submission::JobStatusResponse,
    routes,
    services::image_fetcher::{FetchError, ImageDimensions, ImageFetcher},
    services::store_directory::StoreDirectory,
};

use crate::fixtures::{IMAGE_FIXTURES, STORE_MASTER_CSV};

/// Image fetcher that serves fixture dimensions and 404s everything else.
#[derive(Default)]
pub struct StubFetcher {
    images: HashMap<String, ImageDimensions>,
    requested: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn with_fixtures() -> Self {
        let images = IMAGE_FIXTURES
            .iter()
            .map(|f| (f.url.to_string(), ImageDimensions::new(f.width, f.height)))
            .collect();
        Self {
            images,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageFetcher for StubFetcher {
    async fn fetch_dimensions(&self, url: &str) -> Result<ImageDimensions, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.images
            .get(url)
            .copied()
            .ok_or(FetchError::Status(HttpStatus::NOT_FOUND))
    }
}

/// Application wired to the fixture store directory and a stub fetcher.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub fetcher: Arc<StubFetcher>,
}

pub fn build_test_app() -> TestApp {
    build_test_app_with_limit(DEFAULT_MAX_BODY_BYTES)
}

pub fn build_test_app_with_limit(max_body_bytes: usize) -> TestApp {
    let directory =
        StoreDirectory::from_reader(STORE_MASTER_CSV.as_bytes()).expect("fixture CSV parses");
    let fetcher = Arc::new(StubFetcher::with_fixtures());
    let state = AppState::new(directory, fetcher.clone(), ProcessingConfig::immediate());
    TestApp {
        router: routes::router(state.clone(), max_body_bytes),
        state,
        fetcher,
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Vec<u8>) {
    send(app, Method::POST, uri, Body::from(body.to_string())).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(app, Method::GET, uri, Body::empty()).await
}

pub fn body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}

pub fn body_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("response body is JSON")
}

/// Submit a batch and return the allocated job id.
pub async fn submit(app: &Router, body: &Value) -> u64 {
    let (status, bytes) = post_json(app, "/api/submit/", body).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body_text(&bytes));
    body_json(&bytes)["job_id"].as_u64().expect("job_id is an integer")
}

/// Poll status until the job leaves `ongoing` (with timeout).
pub async fn wait_for_job(app: &Router, job_id: u64) -> JobStatusResponse {
    for _ in 0..500 {
        let (status, bytes) = get(app, &format!("/api/status?jobid={job_id}")).await;
        assert_eq!(status, StatusCode::OK, "{}", body_text(&bytes));
        let response: JobStatusResponse = serde_json::from_slice(&bytes).unwrap();
        if response.status != "ongoing" {
            return response;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!("job {job_id} did not finish within 5 seconds");
}
