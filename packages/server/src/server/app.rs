use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use review_rag::{Completer, Embedder, PageFetcher, ReviewQa};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::routes::{ask_handler, health_handler};

/// How long browsers may cache a preflight response.
const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

/// Build the router around one pipeline instance.
///
/// `POST /` answers questions; `GET /health` reports liveness. Preflight
/// requests are answered by the CORS layer and never reach the pipeline.
pub fn build_app<F, E, C>(qa: ReviewQa<F, E, C>) -> Router
where
    F: PageFetcher + 'static,
    E: Embedder + 'static,
    C: Completer + 'static,
{
    // CORS configuration - allow any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(CORS_MAX_AGE);

    Router::new()
        .route("/", post(ask_handler::<F, E, C>))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(qa))
}
