//! Report API integration tests.
//!
//! Exercises the HTTP surface in-process with mock collaborators injected
//! behind the runner.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use aperta_core::{
    testing::{fixtures, MockEngagementApi, MockReportSink, MockTenantStore},
    EngagementApi, PipelineConfig, ReportRunner, ReportSink, TenantStore,
};
use aperta_server::{api::create_router, state::AppState};

/// Test fixture wiring the router to mock dependencies.
struct TestFixture {
    router: Router,
    api: Arc<MockEngagementApi>,
    store: Arc<MockTenantStore>,
}

impl TestFixture {
    fn new() -> Self {
        let config = aperta_core::load_config_from_str(
            r#"
[tenants]
spreadsheet_id = "sheet-1"
api_key = "key-1"

[pipeline]
batch_size = 10
batch_pause_ms = 10
"#,
        )
        .unwrap();

        let api = Arc::new(MockEngagementApi::new());
        let store = Arc::new(MockTenantStore::new());
        let sink = Arc::new(MockReportSink::new());

        let runner = Arc::new(ReportRunner::new(
            Arc::clone(&store) as Arc<dyn TenantStore>,
            Arc::clone(&api) as Arc<dyn EngagementApi>,
            sink as Arc<dyn ReportSink>,
            &config.pipeline,
        ));

        let state = Arc::new(AppState::new(config, runner));
        let router = create_router(state);

        Self { router, api, store }
    }

    /// Seed one tenant with one campaign and one in-window open event.
    async fn seed_reporting_tenant(&self) {
        self.store.set_tenants(vec![fixtures::tenant("a")]).await;
        self.api
            .set_campaigns("cid-a", vec![fixtures::campaign("c1", "Spring")])
            .await;
        self.api
            .set_opens(
                "c1",
                vec![fixtures::open_event("p@example.com", "2024-03-15 10:30:00")],
            )
            .await;
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        Self::send(self.router.clone(), request).await
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        Self::send(self.router.clone(), request).await
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();
    let (status, body) = fixture.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "aperta");
}

#[tokio::test]
async fn test_config_redacts_secrets() {
    let fixture = TestFixture::new();
    let (status, body) = fixture.get("/api/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenants"]["api_key_configured"], true);
    assert!(body["tenants"].get("api_key").is_none());
}

#[tokio::test]
async fn test_generate_report() {
    let fixture = TestFixture::new();
    fixture.seed_reporting_tenant().await;

    let (status, body) = fixture
        .post(
            "/api/reports",
            json!({
                "tenants": ["a@account.example"],
                "start_date": "01/03/2024",
                "end_date": "31/03/2024",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_openings"], 1);
    assert_eq!(body["processed_tenants"], 1);
    assert_eq!(body["counts_by_email"]["p@example.com"], 1);
}

#[tokio::test]
async fn test_generate_report_validation_errors() {
    let fixture = TestFixture::new();
    fixture.seed_reporting_tenant().await;

    let (status, body) = fixture
        .post(
            "/api/reports",
            json!({
                "tenants": [],
                "start_date": "01/03/2024",
                "end_date": "31/03/2024",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("no tenants"));

    let (status, _) = fixture
        .post(
            "/api/reports",
            json!({
                "tenants": ["a@account.example"],
                "end_date": "31/03/2024",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_report_partial_outage_is_not_an_error() {
    let fixture = TestFixture::new();
    fixture.seed_reporting_tenant().await;
    fixture
        .store
        .set_tenants(vec![fixtures::tenant("a"), fixtures::tenant("b")])
        .await;
    fixture.api.fail_auth("cid-b").await;

    let (status, body) = fixture
        .post(
            "/api/reports",
            json!({
                "tenants": ["a@account.example", "b@account.example"],
                "start_date": "01/03/2024",
                "end_date": "31/03/2024",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_openings"], 1);
    assert_eq!(body["processed_tenants"], 2);
}

#[tokio::test]
async fn test_store_outage_maps_to_bad_gateway() {
    let fixture = TestFixture::new();
    fixture.store.set_fail(true).await;

    let (status, body) = fixture
        .post(
            "/api/reports",
            json!({
                "tenants": ["a@account.example"],
                "start_date": "01/03/2024",
                "end_date": "31/03/2024",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("credential store"));
}

#[tokio::test]
async fn test_list_tenants() {
    let fixture = TestFixture::new();
    fixture.seed_reporting_tenant().await;

    let (status, body) = fixture.get("/api/tenants").await;
    assert_eq!(status, StatusCode::OK);

    let tenants = body["tenants"].as_array().unwrap();
    assert_eq!(tenants.len(), 1);
    assert_eq!(tenants[0]["identity"], "a@account.example");
    assert_eq!(tenants[0]["campaign_count"], 1);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new();
    let request = Request::builder()
        .uri("/api/metrics")
        .body(Body::empty())
        .unwrap();
    let response = fixture.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
