//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod output;
pub mod parse;
pub mod search;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use landrec_core::LandrecConfig;
use landrec_core::pdf::PdfExtractor;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("landrec")
        .join("config.json")
}

/// Load configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LandrecConfig> {
    if let Some(path) = config_path {
        return Ok(LandrecConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(LandrecConfig::from_file(&default_path)?)
    } else {
        Ok(LandrecConfig::default())
    }
}

/// Read the text of a document: the text layer of a PDF, or a plain text file.
pub fn read_document(path: &Path, config: &LandrecConfig) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            Ok(PdfExtractor::text_from_bytes(&data, config.pdf.min_text_length)?)
        }
        "txt" | "text" | "" => Ok(fs::read_to_string(path)?),
        other => anyhow::bail!("Unsupported file format: {}", other),
    }
}

/// Whether a path looks like a document `read_document` accepts.
pub fn is_supported_document(path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    matches!(extension.as_str(), "pdf" | "txt" | "text")
}
