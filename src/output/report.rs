//! Report structure wrapping the ordered match results

use crate::models::MatchingResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_path: Option<String>,
    pub summary: ReportSummary,
    /// Results in scoring order (input job order, minus skipped jobs).
    pub results: Vec<MatchingResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub jobs_scored: usize,
    pub recommended: usize,
    pub best_similarity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_match: Option<String>,
}

impl MatchReport {
    pub fn new(results: Vec<MatchingResult>) -> Self {
        let best = results
            .iter()
            .max_by(|a, b| a.similarity.total_cmp(&b.similarity));
        let summary = ReportSummary {
            jobs_scored: results.len(),
            recommended: results.iter().filter(|r| r.is_recommended).count(),
            best_similarity: best.map(|r| r.similarity).unwrap_or(0.0),
            best_match: best.map(|r| r.job.title.clone()),
        };

        Self {
            generated_at: Utc::now(),
            resume_path: None,
            summary,
            results,
        }
    }

    pub fn with_resume_path(mut self, path: impl Into<String>) -> Self {
        self.resume_path = Some(path.into());
        self
    }
}
