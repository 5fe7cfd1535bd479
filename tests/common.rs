//! Shared helpers for HTTP integration tests.
//!
//! `TestHost` wraps the application router with an in-memory record
//! backend and a seeded key-value store, and drives it with
//! `tower::ServiceExt::oneshot` so no socket is needed.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use recordkv::server::{AppState, router};
use recordkv::services::kv::KvStore;
use recordkv::services::records::{Pipeline, Record, RecordBackend, RecordService};

/// Records used by the default test host.
pub fn sample_records() -> Vec<Record> {
    vec![
        record("in-range", "2020-06-15T10:00:00Z", vec![1000, 1200, 500]),
        record("low-total", "2020-06-15T10:00:00Z", vec![100, 200]),
        record("high-total", "2020-06-15T10:00:00Z", vec![2000, 2000]),
        record("too-old", "2019-03-01T00:00:00Z", vec![2500]),
        record("also-in-range", "2020-11-30T23:59:59Z", vec![2999]),
    ]
}

pub fn record(key: &str, created_at: &str, counts: Vec<i64>) -> Record {
    Record {
        key: key.to_string(),
        val: format!("val-{key}"),
        created_at: created_at.parse().expect("valid timestamp"),
        counts,
        total_count: 0,
    }
}

/// Backend that always fails, for exercising the 500 path.
pub struct FailingBackend;

#[async_trait]
impl RecordBackend for FailingBackend {
    async fn aggregate(&self, _pipeline: &Pipeline) -> Result<Vec<Record>> {
        anyhow::bail!("connection refused")
    }
}

/// A response with its body collected.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub async fn from_response(response: Response<Body>) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub struct TestHost {
    app: Router,
    kv: KvStore,
}

impl TestHost {
    pub fn builder() -> TestHostBuilder {
        TestHostBuilder::default()
    }

    /// Default host: sample records and `getir = company` seeded.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn kv(&self) -> &KvStore {
        &self.kv
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(body.into()).expect("Failed to build request");
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        TestResponse::from_response(response).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request("GET", uri, None, Body::empty()).await
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> TestResponse {
        self.request("POST", uri, Some("application/json"), body.to_string())
            .await
    }
}

pub struct TestHostBuilder {
    records: RecordService,
    seed: Vec<(String, String)>,
}

impl Default for TestHostBuilder {
    fn default() -> Self {
        Self {
            records: RecordService::memory(sample_records()),
            seed: vec![("getir".to_string(), "company".to_string())],
        }
    }
}

impl TestHostBuilder {
    pub fn records(mut self, records: RecordService) -> Self {
        self.records = records;
        self
    }

    pub fn empty_store(mut self) -> Self {
        self.seed.clear();
        self
    }

    pub fn build(self) -> TestHost {
        let kv = KvStore::with_entries(self.seed);
        let app = router(AppState::new(kv.clone(), self.records));
        TestHost { app, kv }
    }
}
