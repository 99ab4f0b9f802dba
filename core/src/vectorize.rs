//! TF-IDF document-term model and the dense cosine similarity matrix derived from it.
//!
//! Weights follow the smoothed scheme: raw term count times
//! `ln((1 + N) / (1 + df)) + 1`, then each row is scaled to unit L2 norm.
//! Columns are assigned in lexicographic term order so a rebuild over the same
//! texts reproduces the same model bit for bit.

use std::collections::{BTreeMap, BTreeSet, HashMap};

pub type TermId = u32;

/// Sparse document row: `(column, weight)` pairs sorted by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocVector {
    pub entries: Vec<(TermId, f32)>,
    pub norm: f32,
}

impl DocVector {
    pub fn is_zero(&self) -> bool { self.norm == 0.0 }

    pub fn dot(&self, other: &DocVector) -> f32 {
        let (mut i, mut j, mut acc) = (0, 0, 0.0f32);
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            if ta == tb {
                acc += wa * wb;
                i += 1;
                j += 1;
            } else if ta < tb {
                i += 1;
            } else {
                j += 1;
            }
        }
        acc
    }
}

#[derive(Debug, Clone, Default)]
pub struct VectorSpaceModel {
    vocabulary: BTreeMap<String, TermId>,
    df: Vec<u32>,
    idf: Vec<f32>,
    rows: Vec<DocVector>,
}

impl VectorSpaceModel {
    /// Fit vocabulary and weights over `texts`. Tokens are whitespace separated.
    pub fn fit<S: AsRef<str>>(texts: &[S]) -> Self {
        let docs: Vec<Vec<&str>> = texts.iter().map(|t| t.as_ref().split_whitespace().collect()).collect();

        let terms: BTreeSet<&str> = docs.iter().flatten().copied().collect();
        let vocabulary: BTreeMap<String, TermId> = terms
            .into_iter()
            .enumerate()
            .map(|(col, term)| (term.to_string(), col as TermId))
            .collect();

        // Raw counts per document, and document frequency per column
        let mut df = vec![0u32; vocabulary.len()];
        let mut counts: Vec<HashMap<TermId, u32>> = Vec::with_capacity(docs.len());
        for tokens in &docs {
            let mut tf: HashMap<TermId, u32> = HashMap::new();
            for tok in tokens {
                let tid = vocabulary[*tok];
                *tf.entry(tid).or_insert(0) += 1;
            }
            for tid in tf.keys() { df[*tid as usize] += 1; }
            counts.push(tf);
        }

        let n = docs.len() as f32;
        let idf: Vec<f32> = df.iter().map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0).collect();

        let rows = counts
            .into_iter()
            .map(|tf| {
                let mut entries: Vec<(TermId, f32)> =
                    tf.into_iter().map(|(tid, c)| (tid, c as f32 * idf[tid as usize])).collect();
                entries.sort_by_key(|(tid, _)| *tid);
                let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
                if norm > 0.0 {
                    for (_, w) in entries.iter_mut() { *w /= norm; }
                }
                // Stored rows are unit length, or empty for documents with no terms
                let norm = if entries.is_empty() { 0.0 } else { 1.0 };
                DocVector { entries, norm }
            })
            .collect();

        Self { vocabulary, df, idf, rows }
    }

    pub fn num_docs(&self) -> usize { self.rows.len() }

    pub fn num_terms(&self) -> usize { self.vocabulary.len() }

    pub fn term_id(&self, term: &str) -> Option<TermId> { self.vocabulary.get(term).copied() }

    pub fn df(&self, term: &str) -> Option<u32> { self.term_id(term).map(|t| self.df[t as usize]) }

    pub fn idf(&self, term: &str) -> Option<f32> { self.term_id(term).map(|t| self.idf[t as usize]) }

    pub fn row(&self, doc: usize) -> Option<&DocVector> { self.rows.get(doc) }

    /// Weight of `term` in document `doc`, zero when absent.
    pub fn weight(&self, doc: usize, term: &str) -> f32 {
        let (Some(row), Some(tid)) = (self.rows.get(doc), self.term_id(term)) else { return 0.0 };
        row.entries
            .binary_search_by_key(&tid, |(t, _)| *t)
            .map(|pos| row.entries[pos].1)
            .unwrap_or(0.0)
    }
}

/// Square, symmetric, row-major matrix of pairwise cosine similarities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    pub fn from_model(model: &VectorSpaceModel) -> Self {
        let n = model.num_docs();
        let mut values = vec![0.0f32; n * n];
        for i in 0..n {
            let a = &model.rows[i];
            values[i * n + i] = if a.is_zero() { 0.0 } else { 1.0 };
            for j in (i + 1)..n {
                let s = cosine(a, &model.rows[j]);
                values[i * n + j] = s;
                values[j * n + i] = s;
            }
        }
        Self { n, values }
    }

    /// Number of documents (rows and columns).
    pub fn len(&self) -> usize { self.n }

    pub fn is_empty(&self) -> bool { self.n == 0 }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.n { return None; }
        Some(&self.values[i * self.n..(i + 1) * self.n])
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i >= self.n || j >= self.n { return None; }
        Some(self.values[i * self.n + j])
    }
}

/// Cosine of the angle between two rows; 0 when either is the zero vector.
pub fn cosine(a: &DocVector, b: &DocVector) -> f32 {
    let denom = a.norm * b.norm;
    if denom == 0.0 { return 0.0; }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Fit the model over normalized texts and derive the similarity matrix in one pass.
pub fn build<S: AsRef<str>>(normalized: &[S]) -> (VectorSpaceModel, SimilarityMatrix) {
    let model = VectorSpaceModel::fit(normalized);
    let sim = SimilarityMatrix::from_model(&model);
    (model, sim)
}
