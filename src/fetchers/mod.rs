//! Job posting providers

pub mod local;

use crate::error::Result;
use crate::models::JobPosting;

/// A source of job postings matching the configured criteria.
pub trait JobFetcher {
    fn fetch(&self) -> impl std::future::Future<Output = Result<Vec<JobPosting>>> + Send;
}

/// Returns pre-defined job postings. Useful for testing and demos.
pub struct StaticJobFetcher {
    jobs: Vec<JobPosting>,
}

impl StaticJobFetcher {
    pub fn new(jobs: Vec<JobPosting>) -> Self {
        Self { jobs }
    }
}

impl JobFetcher for StaticJobFetcher {
    async fn fetch(&self) -> Result<Vec<JobPosting>> {
        Ok(self.jobs.clone())
    }
}
