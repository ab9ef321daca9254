//! Local job provider backed by a JSON dataset

use crate::config::SearchConfig;
use crate::error::{JobMatcherError, Result};
use crate::fetchers::JobFetcher;
use crate::models::JobPosting;
use log::info;
use std::path::PathBuf;
use tokio::fs;

/// Loads job postings from a JSON file for offline runs.
///
/// Postings are filtered by the configured keywords (any keyword hit in
/// title or description) and location, then capped at `max_results`.
pub struct LocalJobFetcher {
    path: PathBuf,
    config: SearchConfig,
}

impl LocalJobFetcher {
    pub fn new(path: impl Into<PathBuf>, config: SearchConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    fn matches_keywords(job: &JobPosting, keywords: &[String]) -> bool {
        let haystack = format!("{}\n{}", job.title, job.description).to_lowercase();
        keywords
            .iter()
            .any(|keyword| haystack.contains(&keyword.to_lowercase()))
    }

    fn matches_location(job: &JobPosting, location: &str) -> bool {
        job.location
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(&location.to_lowercase())
    }
}

impl JobFetcher for LocalJobFetcher {
    async fn fetch(&self) -> Result<Vec<JobPosting>> {
        if !self.path.exists() {
            return Err(JobMatcherError::Fetch(format!(
                "Local job dataset not found at {}",
                self.path.display()
            )));
        }

        let content = fs::read_to_string(&self.path).await?;
        let mut jobs: Vec<JobPosting> = serde_json::from_str(&content)?;

        for job in &mut jobs {
            if job.source.is_none() {
                job.source = Some("local".to_string());
            }
        }

        let keywords = &self.config.keywords;
        let location = self.config.location.as_deref().unwrap_or("");
        let jobs: Vec<JobPosting> = jobs
            .into_iter()
            .filter(|job| keywords.is_empty() || Self::matches_keywords(job, keywords))
            .filter(|job| location.is_empty() || Self::matches_location(job, location))
            .take(self.config.max_results)
            .collect();

        info!(
            "Loaded {} job postings from {}",
            jobs.len(),
            self.path.display()
        );
        Ok(jobs)
    }
}
