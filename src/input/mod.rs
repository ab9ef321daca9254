//! Resume input handling
//! File loading, section splitting, and candidate profile extraction

pub mod profile;
pub mod resume_parser;
