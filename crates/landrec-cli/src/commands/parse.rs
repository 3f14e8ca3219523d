//! Parse command - extract transactions from a single document.

use std::fmt::Display;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use landrec_core::store::{JsonFileStore, RecordSink};
use landrec_core::{LandrecConfig, Normalization, TransactionParser};

use super::output::{OutputFormat, format_records};
use super::{load_config, read_document};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input document (PDF or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    #[command(flatten)]
    translation: TranslationArgs,

    /// Save the records to the transaction store
    #[arg(long)]
    save: bool,

    /// Owner id recorded with saved transactions
    #[arg(long, default_value = "0", requires = "save")]
    owner: i64,

    /// Transaction store path (default from config)
    #[arg(long)]
    store: Option<PathBuf>,

    /// List the fields each transaction is missing
    #[arg(long)]
    show_missing: bool,
}

/// Translation overrides shared by parse and batch.
#[derive(Args)]
pub struct TranslationArgs {
    /// Extract from the original text without translating
    #[arg(long)]
    no_translate: bool,

    /// Target language for translation
    #[arg(long)]
    target: Option<String>,

    /// Translation service endpoint
    #[arg(long)]
    endpoint: Option<String>,
}

impl TranslationArgs {
    pub fn apply(&self, config: &mut LandrecConfig) {
        if self.no_translate {
            config.translation.enabled = false;
        }
        if let Some(target) = &self.target {
            config.translation.target_language = target.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.translation.endpoint = endpoint.clone();
        }
    }
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    args.translation.apply(&mut config);

    info!("Processing file: {}", args.input.display());
    let text = read_document(&args.input, &config)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(if config.translation.enabled {
        "Translating and extracting sections..."
    } else {
        "Extracting sections..."
    });

    let parser = TransactionParser::from_config(&config);
    let result = parser
        .parse_until(&text, cancel_on(tokio::signal::ctrl_c()))
        .await;

    pb.finish_and_clear();

    if result.cancelled {
        eprintln!(
            "{} Interrupted, keeping {} completed transactions",
            style("⚠").yellow(),
            result.sections.len()
        );
    }

    let fallbacks = result.count(Normalization::Fallback);
    if fallbacks > 0 {
        eprintln!(
            "{} {} sections could not be translated and were read from the original text",
            style("⚠").yellow(),
            fallbacks
        );
    }

    if args.show_missing {
        for section in &result.sections {
            if !section.missing_fields.is_empty() {
                eprintln!(
                    "{} Transaction {}: missing {}",
                    style("ℹ").blue(),
                    section.index + 1,
                    section
                        .missing_fields
                        .iter()
                        .map(|f| f.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }
    }

    let processing_time_ms = result.processing_time_ms;
    let records = result.into_records();
    let output = format_records(&records, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.save {
        let store_path = args.store.clone().unwrap_or_else(|| config.store.path.clone());
        let store = JsonFileStore::new(&store_path);
        let saved = store.save(records, args.owner).await?;
        eprintln!(
            "{} Saved {} transactions to {}",
            style("✓").green(),
            saved.len(),
            store_path.display()
        );
    }

    eprintln!(
        "{} Extracted transactions in {}ms",
        style("ℹ").blue(),
        processing_time_ms
    );

    Ok(())
}

/// Completes when `signal` fires. A signal that cannot be installed never
/// fires, so parsing runs to the end.
async fn cancel_on<F, E>(signal: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    if let Err(e) = signal.await {
        warn!("Interrupt handling unavailable, parsing cannot be cancelled: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use landrec_core::Normalizer;

    const DOCUMENT: &str = "Sr. No. : 1\nDocument No. : 1/2019\nSr. No. : 2\nDocument No. : 2/2019\n";

    fn failed_signal() -> impl Future<Output = io::Result<()>> {
        async { Err(io::Error::other("no signal driver")) }
    }

    #[tokio::test]
    async fn test_failed_signal_never_cancels() {
        let waited = tokio::time::timeout(Duration::from_millis(50), cancel_on(failed_signal())).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_delivered_signal_cancels() {
        let waited = tokio::time::timeout(
            Duration::from_millis(50),
            cancel_on(async { Ok::<(), io::Error>(()) }),
        )
        .await;
        assert!(waited.is_ok());
    }

    #[tokio::test]
    async fn test_failed_signal_keeps_every_record() {
        let parser = TransactionParser::new(Normalizer::disabled());
        let result = parser.parse_until(DOCUMENT, cancel_on(failed_signal())).await;

        assert!(!result.cancelled);
        assert_eq!(result.sections.len(), 2);
    }
}
