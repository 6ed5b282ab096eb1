mod ask;
mod health;

pub use ask::{ask_handler, AnswerResponse};
pub use health::{health_handler, HealthResponse};
