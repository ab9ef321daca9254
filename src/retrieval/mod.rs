//! TF-IDF retrieval over resume chunks

pub mod retriever;
pub mod vector;
