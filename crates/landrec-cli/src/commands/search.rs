//! Search command - query saved transactions.

use std::path::PathBuf;

use clap::Args;
use console::style;

use landrec_core::store::{JsonFileStore, RecordSearch, TransactionFilter};

use super::load_config;
use super::output::{OutputFormat, format_persisted};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Transaction store path (default from config)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Buyer name fragment, matched against claimants
    #[arg(long)]
    buyer: Option<String>,

    /// Seller name fragment, matched against executants
    #[arg(long)]
    seller: Option<String>,

    /// Survey number fragment
    #[arg(long)]
    survey_number: Option<String>,

    /// Exact plot number
    #[arg(long)]
    plot_number: Option<String>,

    /// Exact document number
    #[arg(long)]
    document_number: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl SearchArgs {
    fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            buyer: self.buyer.clone(),
            seller: self.seller.clone(),
            survey_number: self.survey_number.clone(),
            plot_number: self.plot_number.clone(),
            document_number: self.document_number.clone(),
        }
    }
}

pub async fn run(args: SearchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store_path = args.store.clone().unwrap_or(config.store.path);
    let store = JsonFileStore::new(&store_path);

    let found = store.search(&args.filter()).await?;

    if found.is_empty() {
        eprintln!(
            "{} No matching transactions in {}",
            style("ℹ").blue(),
            store_path.display()
        );
        return Ok(());
    }

    println!("{}", format_persisted(&found, args.format)?);
    eprintln!("{} {} transactions found", style("✓").green(), found.len());

    Ok(())
}
