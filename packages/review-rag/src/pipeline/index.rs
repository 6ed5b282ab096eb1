//! Semantic index and retriever over one corpus.
//!
//! The index is built from scratch for every corpus and lives only as long
//! as the request that built it. Similarity is cosine; results come back in
//! descending similarity, ties broken by corpus order.

use tracing::{debug, info};

use crate::error::{AiError, RagError, Result};
use crate::traits::ai::Embedder;
use crate::types::review::{Corpus, RetrievalResult};

/// An embedding paired with the review text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedVector {
    pub vector: Vec<f32>,
    pub text: String,
}

/// Exact nearest-neighbour index over review embeddings.
///
/// Holds exactly one [`IndexedVector`] per review of the corpus it was built
/// from; a failed embedding fails the whole build.
pub struct SemanticIndex<'e, E: Embedder + ?Sized> {
    embedder: &'e E,
    entries: Vec<IndexedVector>,
    dimension: usize,
}

impl<'e, E: Embedder + ?Sized> SemanticIndex<'e, E> {
    /// Embed every review of `corpus` and index it.
    pub async fn build(embedder: &'e E, corpus: &Corpus) -> Result<Self> {
        let texts: Vec<&str> = corpus.texts().collect();

        if texts.is_empty() {
            return Ok(Self {
                embedder,
                entries: Vec::new(),
                dimension: 0,
            });
        }

        debug!(reviews = texts.len(), "Embedding corpus");
        let vectors = embedder
            .embed_batch(&texts)
            .await
            .map_err(RagError::Indexing)?;

        if vectors.len() != texts.len() {
            return Err(RagError::Indexing(AiError::CountMismatch {
                expected: texts.len(),
                actual: vectors.len(),
            }));
        }

        let dimension = vectors.first().map(Vec::len).unwrap_or_default();
        if dimension == 0 {
            return Err(RagError::Indexing(AiError::Parse(
                "embedding has no dimensions".into(),
            )));
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(RagError::Indexing(AiError::DimensionMismatch {
                expected: dimension,
                actual: bad.len(),
            }));
        }

        let entries = vectors
            .into_iter()
            .zip(texts)
            .map(|(vector, text)| IndexedVector {
                vector,
                text: text.to_string(),
            })
            .collect::<Vec<_>>();

        info!(entries = entries.len(), dimension, "Semantic index built");

        Ok(Self {
            embedder,
            entries,
            dimension,
        })
    }

    /// Return the texts of the `k` reviews most similar to `question`.
    ///
    /// Returns every review when the index holds fewer than `k`.
    pub async fn query(&self, question: &str, k: usize) -> Result<RetrievalResult> {
        if self.entries.is_empty() || k == 0 {
            return Ok(RetrievalResult::default());
        }

        let query = self
            .embedder
            .embed(question)
            .await
            .map_err(RagError::Indexing)?;

        if query.len() != self.dimension {
            return Err(RagError::Indexing(AiError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            }));
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(&query, &entry.vector)))
            .collect();

        // Stable sort keeps corpus order among equal scores
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);

        debug!(
            k,
            retrieved = scored.len(),
            top_score = scored.first().map(|s| s.1),
            "Similarity search"
        );

        Ok(RetrievalResult::new(
            scored
                .into_iter()
                .map(|(i, _)| self.entries[i].text.clone())
                .collect(),
        ))
    }

    /// Indexed entries in corpus order.
    pub fn entries(&self) -> &[IndexedVector] {
        &self.entries
    }

    /// Number of indexed reviews.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embedding dimension (0 for an empty index).
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Top-k retrieval with k fixed from configuration.
pub struct Retriever<'e, E: Embedder + ?Sized> {
    index: SemanticIndex<'e, E>,
    k: usize,
}

impl<'e, E: Embedder + ?Sized> Retriever<'e, E> {
    /// Create a retriever returning at most `k` texts per question.
    pub fn new(index: SemanticIndex<'e, E>, k: usize) -> Self {
        Self { index, k }
    }

    /// Retrieve the reviews most relevant to `question`.
    pub async fn retrieve(&self, question: &str) -> Result<RetrievalResult> {
        self.index.query(question, self.k).await
    }

    /// Get the underlying index.
    pub fn index(&self) -> &SemanticIndex<'e, E> {
        &self.index
    }

    /// Maximum texts returned per question.
    pub fn k(&self) -> usize {
        self.k
    }
}

/// Cosine similarity between two vectors (0.0 for mismatched or zero vectors).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
