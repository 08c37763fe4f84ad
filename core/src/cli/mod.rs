pub mod report;

use crate::compare::CompareConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for dicomcheck
#[derive(Parser, Debug)]
#[command(name = "dicomcheck")]
#[command(about = "Compare acquisition parameters of a DICOM session against a reference session")]
#[command(version)]
pub struct Cli {
    /// Directory holding the reference session
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Directory holding the session to check
    #[arg(value_name = "NEW")]
    pub new: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Highlight differing values
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Search nested sequences for scan parameters missing at top level
    #[arg(short, long)]
    pub deep: bool,

    /// Modality of the series to compare
    #[arg(short, long, default_value = crate::compare::DEFAULT_MODALITY)]
    pub modality: String,

    /// Compare series of every modality, including those without TR
    #[arg(long, conflicts_with = "modality")]
    pub all_modalities: bool,

    /// Print the patient/study/series tree of both sessions
    #[arg(long)]
    pub tree: bool,

    /// Locate a sidecar (DICOM JSON) file in the new session
    #[arg(long, value_name = "FILE")]
    pub identify: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Comparison settings selected by the flags
    pub fn compare_config(&self) -> CompareConfig {
        let config = if self.all_modalities {
            CompareConfig::permissive()
        } else {
            CompareConfig::default().with_modality(self.modality.as_str())
        };
        config.deep_search(self.deep)
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// When to highlight differences
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Only when stdout is a terminal
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolves the choice given whether output goes to a terminal
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}
