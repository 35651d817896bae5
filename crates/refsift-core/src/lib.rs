//! refsift core — merge literature-database exports, drop near-duplicates.

pub mod error;
pub mod config;
pub mod record;
pub mod sources;
pub mod import;
pub mod export;
pub mod stopwords;
pub mod corpus;
pub mod vectorizer;
pub mod similarity;
pub mod classifier;
pub mod resolver;
pub mod dedup;

pub use error::{RefsiftError, Result};
pub use config::{DedupConfig, TitleMatch};
pub use record::Record;
pub use sources::SourceDatabase;
pub use import::{import_csv, merge_files};
pub use export::export_csv;
pub use classifier::ScoredPair;
pub use dedup::{DedupOutcome, Deduplicator};
