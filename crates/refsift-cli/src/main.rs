use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use refsift_core::{
    DedupConfig, Deduplicator, SourceDatabase, TitleMatch, export_csv, import_csv, merge_files,
};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "refsift",
    about = "Merge literature-database exports and remove near-duplicate records",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format (for scripts).
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which source database an export file came from.
    Detect { file: PathBuf },

    /// Merge export files into one canonical table, without dedup.
    Merge {
        files: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Merge export files and remove near-duplicate records.
    Dedupe {
        files: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,

        /// Document-similarity threshold, rule (a).
        #[arg(long)]
        doc_threshold: Option<f64>,

        /// Mean-similarity threshold, rule (b).
        #[arg(long)]
        mean_threshold: Option<f64>,

        /// Title-similarity threshold (participates through the mean).
        #[arg(long)]
        title_threshold: Option<f64>,

        /// How titles are compared.
        #[arg(long, value_enum)]
        title_match: Option<TitleMatchArg>,

        /// TOML config file; flags override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the dropped records to a separate CSV for review.
        #[arg(long)]
        removed: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TitleMatchArg {
    Exact,
    Tokens,
}

impl From<TitleMatchArg> for TitleMatch {
    fn from(arg: TitleMatchArg) -> Self {
        match arg {
            TitleMatchArg::Exact => TitleMatch::Exact,
            TitleMatchArg::Tokens => TitleMatch::TokenSimilarity,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Detect { file } => detect(&file, cli.json),
        Commands::Merge { files, output } => merge(&files, &output, cli.json),
        Commands::Dedupe {
            files,
            output,
            doc_threshold,
            mean_threshold,
            title_threshold,
            title_match,
            config,
            removed,
        } => {
            let config = build_config(
                config.as_deref(),
                doc_threshold,
                mean_threshold,
                title_threshold,
                title_match,
            )?;
            dedupe(&files, &output, removed.as_deref(), config, cli.json)
        }
    }
}

fn detect(file: &std::path::Path, json: bool) -> Result<()> {
    let imported = import_csv(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    print_detect(file, imported.source, imported.records.len(), json);
    Ok(())
}

fn print_detect(file: &std::path::Path, source: SourceDatabase, records: usize, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "file": file.display().to_string(),
                "source": source.name(),
                "records": records,
            })
        );
    } else {
        println!("{}: {} ({} records)", file.display(), source.name(), records);
    }
}

fn merge(files: &[PathBuf], output: &std::path::Path, json: bool) -> Result<()> {
    anyhow::ensure!(!files.is_empty(), "no input files given");
    let records = merge_files(files).context("failed to merge input files")?;
    export_csv(output, &records)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "files": files.len(), "records": records.len() })
        );
    } else {
        println!(
            "merged {} files into {} ({} records)",
            files.len(),
            output.display(),
            records.len()
        );
    }
    Ok(())
}

fn build_config(
    path: Option<&std::path::Path>,
    doc_threshold: Option<f64>,
    mean_threshold: Option<f64>,
    title_threshold: Option<f64>,
    title_match: Option<TitleMatchArg>,
) -> Result<DedupConfig> {
    let mut config = match path {
        Some(path) => DedupConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => DedupConfig::default(),
    };

    if let Some(value) = doc_threshold {
        config = config.with_doc_threshold(value);
    }
    if let Some(value) = mean_threshold {
        config = config.with_mean_threshold(value);
    }
    if let Some(value) = title_threshold {
        config = config.with_title_threshold(value);
    }
    if let Some(mode) = title_match {
        config = config.with_title_match(mode.into());
    }

    config.validate()?;
    Ok(config)
}

fn dedupe(
    files: &[PathBuf],
    output: &std::path::Path,
    removed_output: Option<&std::path::Path>,
    config: DedupConfig,
    json: bool,
) -> Result<()> {
    anyhow::ensure!(!files.is_empty(), "no input files given");

    let records = merge_files(files).context("failed to merge input files")?;
    let total = records.len();
    info!(files = files.len(), records = total, "merged input files");

    let outcome = Deduplicator::with_config(config).deduplicate(records)?;
    export_csv(output, &outcome.records)
        .with_context(|| format!("failed to write {}", output.display()))?;
    if let Some(path) = removed_output {
        export_csv(path, &outcome.removed)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "records_in": total,
                "records_out": outcome.records.len(),
                "removed": outcome.removed.len(),
                "candidate_pairs": outcome.pairs.len(),
            })
        );
    } else {
        println!(
            "{} records in, {} removed as duplicates, {} written to {}",
            total,
            outcome.removed.len(),
            outcome.records.len(),
            output.display()
        );
    }
    Ok(())
}
