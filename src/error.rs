//! Error handling for the job matcher application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Resume parsing error: {0}")]
    ResumeParsing(String),

    #[error("Indexing error: {0}")]
    Indexing(String),

    #[error("Retriever has not been indexed. Call 'index' first")]
    NotIndexed,

    #[error("Reasoning error: {0}")]
    Reasoning(String),

    #[error("Job fetch error: {0}")]
    Fetch(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, JobMatcherError>;
