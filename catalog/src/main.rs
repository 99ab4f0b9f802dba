use anyhow::Result;
use clap::{Parser, Subcommand};
use recommender_core::config::{DEFAULT_MATCH_CUTOFF, DEFAULT_TOP_K};
use recommender_core::store::{load_corpus, CorpusStore, JsonCorpusStore, SledCorpusStore};
use recommender_core::{Corpus, LinguisticResources, RecommendError, RecommenderConfig, SearchIndex};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Import course rows and query TF-IDF course recommendations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy courses from JSON/JSONL files or a directory into a sled store
    Import {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
        /// sled database directory
        #[arg(long)]
        db: PathBuf,
    },
    /// Print recommendations for a free-text course title as JSON
    Recommend {
        /// JSON/JSONL file or directory with course rows
        #[arg(long, conflicts_with = "db", required_unless_present = "db")]
        corpus: Option<PathBuf>,
        /// sled database written by `import`
        #[arg(long)]
        db: Option<PathBuf>,
        /// Course title to search for
        #[arg(long)]
        title: String,
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
        #[arg(long, default_value_t = DEFAULT_MATCH_CUTOFF)]
        match_cutoff: f64,
        /// Leave the matched course out of its own recommendations
        #[arg(long, default_value_t = false)]
        exclude_self: bool,
    },
}

fn main() -> Result<ExitCode> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Import { input, db } => {
            import(&input, &db)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Recommend { corpus, db, title, top_k, match_cutoff, exclude_self } => {
            let corpus = match (corpus, db) {
                (Some(path), _) => load_corpus(&JsonCorpusStore::new(path))?,
                (None, Some(path)) => load_corpus(&SledCorpusStore::open(path)?)?,
                (None, None) => anyhow::bail!("one of --corpus or --db is required"),
            };
            let config = RecommenderConfig { top_k, match_cutoff, include_self: !exclude_self };
            recommend(corpus, config, &title)
        }
    }
}

fn import(input: &Path, db: &Path) -> Result<()> {
    let records = JsonCorpusStore::new(input).load_all()?;
    // validate before anything is written
    Corpus::from_records(records.clone())?;
    let store = SledCorpusStore::open(db)?;
    let written = store.insert_all(&records)?;
    tracing::info!(written, total = store.len(), db = %db.display(), "import complete");
    Ok(())
}

fn recommend(corpus: Corpus, config: RecommenderConfig, title: &str) -> Result<ExitCode> {
    let index = SearchIndex::build(corpus, &LinguisticResources::english(), config);
    match index.recommend_by_title(title) {
        Ok(set) => {
            println!("{}", serde_json::to_string_pretty(&set)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ (RecommendError::MissingParameter | RecommendError::NotFound)) => {
            println!("{}", serde_json::json!({ "error": err.to_string() }));
            Ok(ExitCode::from(1))
        }
        Err(err) => Err(err.into()),
    }
}
