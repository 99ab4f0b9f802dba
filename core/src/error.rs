use thiserror::Error;

/// Query-time failures surfaced to callers of [`crate::SearchIndex`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Missing title parameter")]
    MissingParameter,

    #[error("Course title not found")]
    NotFound,

    /// The ranker was handed a row that does not exist. Only reachable through
    /// a broken caller; the orchestration never produces it.
    #[error("row index {index} out of range for corpus of {len} courses")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Rejections raised while validating a corpus snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorpusError {
    #[error("course {id} has an empty title")]
    EmptyTitle { id: i64 },

    #[error("course id {id} appears more than once")]
    DuplicateId { id: i64 },
}
