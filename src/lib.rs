//! Job matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod input;
pub mod llm;
pub mod matcher;
pub mod models;
pub mod output;
pub mod retrieval;

pub use config::Config;
pub use error::{JobMatcherError, Result};
