//! HTTP boundary tests: request decoding, error mapping and CORS.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use review_rag::{
    testing::{reviews_page, MockCompleter, MockEmbedder, MockFetcher},
    RagConfig, ReviewQa,
};
use review_server::build_app;
use serde_json::{json, Value};
use tower::ServiceExt;

const SOURCE_URL: &str = "https://www.example.com/biz/cafe-y";

fn app(fetcher: MockFetcher, embedder: MockEmbedder, completer: MockCompleter) -> Router {
    let config = RagConfig::new(2, 5).unwrap();
    build_app(ReviewQa::new(fetcher, embedder, completer, config).unwrap())
}

fn reviewed_fetcher() -> MockFetcher {
    MockFetcher::new().with_page(
        0,
        reviews_page(&["The cortado is perfect", "Croissants sell out early"]),
    )
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_answer_is_returned() {
    let completer = MockCompleter::new().with_response("Get the cortado.");
    let app = app(reviewed_fetcher(), MockEmbedder::new(), completer);

    let body = json!({ "source_url": SOURCE_URL, "question": "What should I drink?" });
    let (status, body) = send(app, post_json(&body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "answer": "Get the cortado." }));
}

#[tokio::test]
async fn test_legacy_field_name_is_accepted() {
    let app = app(reviewed_fetcher(), MockEmbedder::new(), MockCompleter::new());

    let body = json!({ "yelp_url": SOURCE_URL, "question": "Is it busy?" });
    let (status, body) = send(app, post_json(&body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "Mock answer");
}

#[tokio::test]
async fn test_blank_question_is_bad_request_without_fetching() {
    let fetcher = reviewed_fetcher();
    let app = app(fetcher.clone(), MockEmbedder::new(), MockCompleter::new());

    let body = json!({ "source_url": SOURCE_URL, "question": "" });
    let (status, body) = send(app, post_json(&body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid request" }));
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app(reviewed_fetcher(), MockEmbedder::new(), MockCompleter::new());

    let (status, body) = send(app, post_json("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid request" }));
}

#[tokio::test]
async fn test_invalid_url_is_bad_request() {
    let fetcher = reviewed_fetcher();
    let app = app(fetcher.clone(), MockEmbedder::new(), MockCompleter::new());

    let body = json!({ "source_url": "mailto:owner@example.com", "question": "Open late?" });
    let (status, body) = send(app, post_json(&body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid request" }));
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_no_reviews_is_server_error() {
    let app = app(MockFetcher::new(), MockEmbedder::new(), MockCompleter::new());

    let body = json!({ "source_url": SOURCE_URL, "question": "Any vegan food?" });
    let (status, body) = send(app, post_json(&body.to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "No reviews" }));
}

#[tokio::test]
async fn test_capability_failures_are_distinguished() {
    let body = json!({ "source_url": SOURCE_URL, "question": "Wifi?" }).to_string();

    let indexing = app(reviewed_fetcher(), MockEmbedder::new().failing(), MockCompleter::new());
    let (status, payload) = send(indexing, post_json(&body)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(payload, json!({ "error": "Indexing failed" }));

    let synthesis = app(reviewed_fetcher(), MockEmbedder::new(), MockCompleter::new().failing());
    let (status, payload) = send(synthesis, post_json(&body)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(payload, json!({ "error": "Answer synthesis failed" }));
}

#[tokio::test]
async fn test_health() {
    let app = app(MockFetcher::new(), MockEmbedder::new(), MockCompleter::new());

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_preflight_is_answered_without_the_pipeline() {
    let fetcher = reviewed_fetcher();
    let app = app(fetcher.clone(), MockEmbedder::new(), MockCompleter::new());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header(header::ORIGIN, "https://frontend.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "3600");
    assert!(fetcher.calls().is_empty());
}
