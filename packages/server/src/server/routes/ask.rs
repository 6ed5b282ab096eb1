use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use review_rag::{AskRequest, Completer, Embedder, PageFetcher, ReviewQa};
use serde::Serialize;
use tracing::{info, warn};

use crate::server::error::ApiError;

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// Answer a question about the business at `source_url`.
///
/// Accepts `{"source_url": "...", "question": "..."}` (`yelp_url` is
/// accepted for `source_url`) and returns `{"answer": "..."}`.
pub async fn ask_handler<F, E, C>(
    State(qa): State<Arc<ReviewQa<F, E, C>>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AnswerResponse>, ApiError>
where
    F: PageFetcher + 'static,
    E: Embedder + 'static,
    C: Completer + 'static,
{
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected request body");
        ApiError::invalid_request()
    })?;

    let answer = qa.answer(&request).await?;

    info!(
        corpus_size = answer.corpus_size,
        retrieved = answer.retrieved,
        "Answered question"
    );

    Ok(Json(AnswerResponse {
        answer: answer.text,
    }))
}
