use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MATCH_CUTOFF: f64 = 0.1;

/// Query-time knobs shared by the server and the catalog CLI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Number of rows returned per recommendation.
    pub top_k: usize,
    /// Minimum sequence ratio a title needs to count as a match.
    pub match_cutoff: f64,
    /// Keep the matched course itself at the head of the results.
    pub include_self: bool,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K, match_cutoff: DEFAULT_MATCH_CUTOFF, include_self: true }
    }
}
