use crate::config::RecommenderConfig;
use crate::corpus::Corpus;
use crate::error::RecommendError;
use crate::fuzzy::match_title;
use crate::rank::{recommend, Recommendation};
use crate::tokenizer::LinguisticResources;
use crate::vectorize::{build, SimilarityMatrix, VectorSpaceModel};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSet {
    pub searched_title: String,
    pub matched_title: String,
    pub recommendations: Vec<Recommendation>,
}

/// Everything derived from one corpus snapshot. Built in a single pass and never
/// mutated afterwards; row `i` means the same course in every field.
#[derive(Debug)]
pub struct SearchIndex {
    corpus: Corpus,
    normalized: Vec<String>,
    model: VectorSpaceModel,
    similarity: SimilarityMatrix,
    config: RecommenderConfig,
}

impl SearchIndex {
    pub fn build(corpus: Corpus, resources: &LinguisticResources, config: RecommenderConfig) -> Self {
        let start = Instant::now();
        let normalized: Vec<String> = corpus.overviews().map(|o| resources.normalize(o)).collect();
        let (model, similarity) = build(normalized.as_slice());
        tracing::info!(
            num_docs = corpus.len(),
            num_terms = model.num_terms(),
            took_ms = start.elapsed().as_millis() as u64,
            "built search index"
        );
        Self { corpus, normalized, model, similarity, config }
    }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    pub fn normalized(&self, row: usize) -> Option<&str> { self.normalized.get(row).map(String::as_str) }

    pub fn model(&self) -> &VectorSpaceModel { &self.model }

    pub fn similarity(&self) -> &SimilarityMatrix { &self.similarity }

    pub fn config(&self) -> &RecommenderConfig { &self.config }

    /// Resolve `query` to the closest known title and rank courses against it.
    pub fn recommend_by_title(&self, query: &str) -> Result<RecommendationSet, RecommendError> {
        if query.is_empty() {
            return Err(RecommendError::MissingParameter);
        }
        let matched = match_title(query, self.corpus.titles(), self.config.match_cutoff)
            .ok_or(RecommendError::NotFound)?;
        let row = self.corpus.first_row_of_title(matched.title).ok_or(RecommendError::NotFound)?;
        tracing::debug!(query, matched = matched.title, score = matched.score, row, "matched title");

        let recommendations = recommend(row, &self.similarity, &self.corpus, self.config.top_k, self.config.include_self)?;
        Ok(RecommendationSet {
            searched_title: query.to_string(),
            matched_title: matched.title.to_string(),
            recommendations,
        })
    }
}

/// Shared slot holding the index currently served. Readers take a cheap `Arc`
/// clone; a replacement index is swapped in whole.
pub struct IndexHandle {
    current: RwLock<Arc<SearchIndex>>,
}

impl IndexHandle {
    pub fn new(index: SearchIndex) -> Self { Self { current: RwLock::new(Arc::new(index)) } }

    pub fn current(&self) -> Arc<SearchIndex> { self.current.read().clone() }

    /// Install a fully built index, returning the one it replaces.
    pub fn replace(&self, index: SearchIndex) -> Arc<SearchIndex> {
        let next = Arc::new(index);
        let prev = std::mem::replace(&mut *self.current.write(), next);
        tracing::info!(num_docs = self.current().corpus().len(), "search index replaced");
        prev
    }
}
