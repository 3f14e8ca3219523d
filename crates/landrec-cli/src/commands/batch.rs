//! Batch command for multiple registration documents.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use landrec_core::store::{JsonFileStore, RecordSink};
use landrec_core::{LandrecConfig, TransactionParser, TransactionRecord};

use super::output::{OutputFormat, format_records};
use super::parse::TranslationArgs;
use super::{is_supported_document, load_config, read_document};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input documents
    #[arg(required = true)]
    input: String,

    /// Output directory, one file per document
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    #[command(flatten)]
    translation: TranslationArgs,

    /// Also write a summary CSV
    #[arg(long)]
    summary: bool,

    /// Save all records to the transaction store
    #[arg(long)]
    save: bool,

    /// Owner id recorded with saved transactions
    #[arg(long, default_value = "0", requires = "save")]
    owner: i64,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single document.
struct DocumentResult {
    path: PathBuf,
    records: Option<Vec<TransactionRecord>>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    args.translation.apply(&mut config);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported_document(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!("{} Found {} files to process", style("ℹ").blue(), files.len());

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = TransactionParser::from_config(&config);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = process_document(&path, &parser, &config).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(records) => {
                results.push(DocumentResult {
                    path,
                    records: Some(records),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(DocumentResult {
                        path,
                        records: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        let paths: Vec<&Path> = results.iter().map(|r| r.path.as_path()).collect();
        for (result, output_name) in results.iter().zip(output_names(&paths)) {
            if let Some(records) = &result.records {
                let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_records(records, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!("{} Summary written to {}", style("✓").green(), summary_path.display());
    }

    let total_records: usize = results
        .iter()
        .filter_map(|r| r.records.as_ref())
        .map(|r| r.len())
        .sum();

    if args.save {
        let store = JsonFileStore::new(&config.store.path);
        let all: Vec<TransactionRecord> = results
            .iter_mut()
            .filter_map(|r| r.records.take())
            .flatten()
            .collect();
        let saved = store.save(all, args.owner).await?;
        println!(
            "{} Saved {} transactions to {}",
            style("✓").green(),
            saved.len(),
            config.store.path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} transactions, {} files failed",
        style(total_records).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

async fn process_document(
    path: &Path,
    parser: &TransactionParser,
    config: &LandrecConfig,
) -> anyhow::Result<Vec<TransactionRecord>> {
    let text = read_document(path, config)?;
    let result = parser.parse(&text).await;
    debug!(
        "{}: {} transactions in {}ms",
        path.display(),
        result.sections.len(),
        result.processing_time_ms
    );
    Ok(result.into_records())
}

/// Output file names without extension, one per input, all distinct.
///
/// The file stem is used when it is unique among the inputs, the full file
/// name when several inputs share a stem ("deed.pdf", "deed.txt"), and a
/// numeric suffix when even that collides.
fn output_names(paths: &[&Path]) -> Vec<String> {
    fn part(value: Option<&std::ffi::OsStr>) -> String {
        value
            .and_then(|s| s.to_str())
            .unwrap_or("document")
            .to_string()
    }

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for path in paths {
        *stem_counts.entry(part(path.file_stem())).or_default() += 1;
    }

    let mut taken = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let stem = part(path.file_stem());
            let base = if stem_counts[&stem] > 1 {
                part(path.file_name())
            } else {
                stem
            };

            let mut name = base.clone();
            let mut suffix = 2;
            while !taken.insert(name.clone()) {
                name = format!("{}-{}", base, suffix);
                suffix += 1;
            }
            name
        })
        .collect()
}

fn write_summary(path: &Path, results: &[DocumentResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "transactions",
        "document_numbers",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        match &result.records {
            Some(records) => {
                let document_numbers = records
                    .iter()
                    .filter_map(|r| r.document_number.as_deref())
                    .collect::<Vec<_>>()
                    .join("; ");
                wtr.write_record([
                    filename,
                    "success",
                    &records.len().to_string(),
                    &document_numbers,
                    &result.processing_time_ms.to_string(),
                    "",
                ])?;
            }
            None => {
                wtr.write_record([
                    filename,
                    "error",
                    "0",
                    "",
                    &result.processing_time_ms.to_string(),
                    result.error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
