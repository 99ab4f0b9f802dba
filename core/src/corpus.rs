use crate::error::CorpusError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type CourseId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: CourseId,
    pub title: String,
    pub overview: String,
}

impl CourseRecord {
    pub fn new(id: CourseId, title: impl Into<String>, overview: impl Into<String>) -> Self {
        Self { id, title: title.into(), overview: overview.into() }
    }
}

/// Ordered snapshot of the course table. Position in `records` is the row index
/// every derived structure is keyed by.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<CourseRecord>,
    by_id: HashMap<CourseId, usize>,
    /// First row carrying each title; later duplicates are shadowed.
    by_title: HashMap<String, usize>,
}

impl Corpus {
    pub fn from_records(records: Vec<CourseRecord>) -> Result<Self, CorpusError> {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut by_title = HashMap::with_capacity(records.len());
        for (row, rec) in records.iter().enumerate() {
            if rec.title.trim().is_empty() {
                return Err(CorpusError::EmptyTitle { id: rec.id });
            }
            if by_id.insert(rec.id, row).is_some() {
                return Err(CorpusError::DuplicateId { id: rec.id });
            }
            by_title.entry(rec.title.clone()).or_insert(row);
        }
        Ok(Self { records, by_id, by_title })
    }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn get(&self, row: usize) -> Option<&CourseRecord> { self.records.get(row) }

    pub fn records(&self) -> &[CourseRecord] { &self.records }

    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.title.as_str())
    }

    pub fn overviews(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.overview.as_str())
    }

    pub fn row_of_id(&self, id: CourseId) -> Option<usize> { self.by_id.get(&id).copied() }

    /// Lowest row whose title equals `title` exactly.
    pub fn first_row_of_title(&self, title: &str) -> Option<usize> { self.by_title.get(title).copied() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_titles_resolve_to_first_row() {
        let corpus = Corpus::from_records(vec![
            CourseRecord::new(10, "Rust", "a"),
            CourseRecord::new(11, "Go", "b"),
            CourseRecord::new(12, "Rust", "c"),
        ])
        .unwrap();
        assert_eq!(corpus.first_row_of_title("Rust"), Some(0));
        assert_eq!(corpus.row_of_id(12), Some(2));
        assert_eq!(corpus.first_row_of_title("rust"), None);
    }

    #[test]
    fn rejects_invalid_snapshots() {
        let dup = Corpus::from_records(vec![CourseRecord::new(1, "A", ""), CourseRecord::new(1, "B", "")]);
        assert_eq!(dup.unwrap_err(), CorpusError::DuplicateId { id: 1 });
        let empty = Corpus::from_records(vec![CourseRecord::new(7, "  ", "text")]);
        assert_eq!(empty.unwrap_err(), CorpusError::EmptyTitle { id: 7 });
    }
}
