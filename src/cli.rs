//! CLI interface for the job matcher

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "job-matcher")]
#[command(about = "Match a resume against job postings with TF-IDF retrieval")]
#[command(
    long_about = "Chunk a resume into overlapping windows, score job postings by cosine \
similarity over a TF-IDF index, and combine the similarity with a reasoning step to flag \
recommended jobs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score job postings against a resume
    Match {
        /// Path to resume file (PDF, TXT, MD); defaults to resume.path from config
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Path to a JSON file with job postings; defaults to search.jobs_path from config
        #[arg(short, long)]
        jobs: Option<PathBuf>,

        /// Words per resume chunk
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Words shared between consecutive chunks
        #[arg(long)]
        overlap: Option<usize>,

        /// Snippets retrieved per job
        #[arg(long)]
        top_k: Option<usize>,

        /// Minimum similarity for a recommendation
        #[arg(long)]
        threshold: Option<f64>,

        /// Only keep postings mentioning one of these keywords
        #[arg(short, long)]
        keyword: Vec<String>,

        /// Location filter for postings
        #[arg(long)]
        location: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file instead of stdout
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Extract a candidate profile from a resume
    Profile {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

pub fn parse_output_format(format: &str) -> std::result::Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        other => Err(format!(
            "Unknown output format '{other}'. Use console, json, markdown, or html"
        )),
    }
}

pub fn validate_file_extension(
    path: &Path,
    allowed: &[&str],
) -> std::result::Result<(), String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if allowed.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(format!(
            "'{}' has unsupported extension '{}'. Expected one of: {}",
            path.display(),
            extension,
            allowed.join(", ")
        ))
    }
}
