use crate::corpus::{Corpus, CourseId};
use crate::error::RecommendError;
use crate::vectorize::SimilarityMatrix;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: CourseId,
    pub title: String,
    pub overview: String,
    #[serde(skip)]
    pub score: f32,
}

/// Rows of the similarity matrix ordered by descending score. Equal scores keep
/// ascending row order.
pub fn ranked_rows(row: usize, sim: &SimilarityMatrix) -> Result<Vec<(usize, f32)>, RecommendError> {
    let scores = sim.row(row).ok_or(RecommendError::IndexOutOfRange { index: row, len: sim.len() })?;
    let mut scored: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    Ok(scored)
}

/// Top `k` courses most similar to the course at `row`.
///
/// The course itself scores highest against its own row and heads the list unless
/// `include_self` is false, in which case it is skipped and the next `k` are taken.
pub fn recommend(
    row: usize,
    sim: &SimilarityMatrix,
    corpus: &Corpus,
    k: usize,
    include_self: bool,
) -> Result<Vec<Recommendation>, RecommendError> {
    if row >= corpus.len() {
        return Err(RecommendError::IndexOutOfRange { index: row, len: corpus.len() });
    }
    let ranked = ranked_rows(row, sim)?;
    let mut out = Vec::with_capacity(k.min(ranked.len()));
    for (idx, score) in ranked.into_iter().filter(|(idx, _)| include_self || *idx != row).take(k) {
        let rec = corpus.get(idx).ok_or(RecommendError::IndexOutOfRange { index: idx, len: corpus.len() })?;
        out.push(Recommendation { id: rec.id, title: rec.title.clone(), overview: rec.overview.clone(), score });
    }
    Ok(out)
}
