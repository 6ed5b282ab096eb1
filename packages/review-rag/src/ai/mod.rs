//! Provider-backed embedding and completion capabilities.
//!
//! Any [`Embedder`](crate::traits::ai::Embedder) or
//! [`Completer`](crate::traits::ai::Completer) works with the pipeline;
//! these are the ones the server uses.

mod openai;

pub use openai::{OpenAICompleter, OpenAIEmbedder};
