//! Course recommendation engine: overview text is normalized, embedded as
//! TF-IDF rows and compared pairwise; free-text titles are resolved with a
//! gestalt sequence ratio before ranking.

pub mod config;
pub mod corpus;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod rank;
pub mod store;
pub mod tokenizer;
pub mod vectorize;

pub use config::RecommenderConfig;
pub use corpus::{Corpus, CourseId, CourseRecord};
pub use error::{CorpusError, RecommendError};
pub use index::{IndexHandle, RecommendationSet, SearchIndex};
pub use rank::Recommendation;
pub use store::{load_corpus, CorpusStore, JsonCorpusStore, SledCorpusStore};
pub use tokenizer::LinguisticResources;
