//! Request boundary for the review question-answering pipeline.
//!
//! - [`config`] - Environment configuration
//! - [`logging`] - Tracing subscriber setup
//! - [`pipeline`] - Wiring the OpenAI-backed pipeline
//! - [`server`] - Axum router, routes and error mapping

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod server;

pub use config::{Config, OpenAISettings};
pub use pipeline::{build_review_qa, OpenAIReviewQa};
pub use server::build_app;
