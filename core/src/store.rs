//! Corpus Store adapters. Each returns the full course table as one ordered snapshot.

use crate::corpus::{Corpus, CourseId, CourseRecord};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub trait CorpusStore {
    fn load_all(&self) -> Result<Vec<CourseRecord>>;
}

/// Load and validate a snapshot from any store.
pub fn load_corpus(store: &dyn CorpusStore) -> Result<Corpus> {
    let records = store.load_all()?;
    let corpus = Corpus::from_records(records)?;
    tracing::info!(num_courses = corpus.len(), "loaded corpus");
    Ok(corpus)
}

/// Row shape accepted on input; `overview` is a nullable column upstream.
#[derive(Debug, Deserialize)]
struct CourseRow {
    id: CourseId,
    title: String,
    #[serde(default)]
    overview: Option<String>,
}

impl From<CourseRow> for CourseRecord {
    fn from(row: CourseRow) -> Self {
        CourseRecord { id: row.id, title: row.title, overview: row.overview.unwrap_or_default() }
    }
}

/// Courses read from a `.json` file, a `.jsonl` file, or a directory tree of them.
pub struct JsonCorpusStore {
    root: PathBuf,
}

impl JsonCorpusStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn files(&self) -> Vec<PathBuf> {
        if self.root.is_file() {
            return vec![self.root.clone()];
        }
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file())
            .filter(|p| matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")))
            .collect();
        files.sort();
        files
    }
}

impl CorpusStore for JsonCorpusStore {
    fn load_all(&self) -> Result<Vec<CourseRecord>> {
        if !self.root.exists() {
            anyhow::bail!("corpus path {} does not exist", self.root.display());
        }
        let mut records = Vec::new();
        for file in self.files() {
            if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
                read_jsonl(&file, &mut records)?;
            } else {
                read_json(&file, &mut records)?;
            }
        }
        Ok(records)
    }
}

fn read_jsonl(file: &Path, out: &mut Vec<CourseRecord>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let row: CourseRow = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        out.push(row.into());
    }
    Ok(())
}

fn read_json(file: &Path, out: &mut Vec<CourseRecord>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let row: CourseRow = serde_json::from_value(v).with_context(|| file.display().to_string())?;
                out.push(row.into());
            }
        }
        serde_json::Value::Object(_) => {
            let row: CourseRow = serde_json::from_value(json).with_context(|| file.display().to_string())?;
            out.push(row.into());
        }
        _ => tracing::warn!(file = %file.display(), "skipping json file without course objects"),
    }
    Ok(())
}

/// Courses kept in a sled tree keyed by big-endian id; snapshots come back in key order.
pub struct SledCorpusStore {
    db: sled::Db,
    tree: sled::Tree,
}

impl SledCorpusStore {
    const TREE: &'static str = "courses";

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path.as_ref()).with_context(|| format!("opening {}", path.as_ref().display()))?;
        let tree = db.open_tree(Self::TREE)?;
        Ok(Self { db, tree })
    }

    /// Upsert `records` and flush. Returns how many rows were written.
    pub fn insert_all(&self, records: &[CourseRecord]) -> Result<usize> {
        for rec in records {
            let bytes = bincode::serialize(rec)?;
            self.tree.insert(rec.id.to_be_bytes(), bytes)?;
        }
        self.db.flush()?;
        Ok(records.len())
    }

    pub fn len(&self) -> usize { self.tree.len() }

    pub fn is_empty(&self) -> bool { self.tree.is_empty() }
}

impl CorpusStore for SledCorpusStore {
    fn load_all(&self) -> Result<Vec<CourseRecord>> {
        let mut records = Vec::with_capacity(self.tree.len());
        for item in self.tree.iter() {
            let (_key, value) = item?;
            let rec: CourseRecord = bincode::deserialize(&value)?;
            records.push(rec);
        }
        Ok(records)
    }
}

/// In-memory snapshot, handy for tests and embedding.
impl CorpusStore for Vec<CourseRecord> {
    fn load_all(&self) -> Result<Vec<CourseRecord>> { Ok(self.clone()) }
}
