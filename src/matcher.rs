//! Logic for matching job postings to the candidate's resume

use crate::error::Result;
use crate::llm::reasoning::ReasoningEngine;
use crate::models::{JobPosting, MatchingResult, Resume};
use crate::retrieval::retriever::ResumeRetriever;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Tunables for the matching pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSettings {
    /// Minimum best-snippet similarity for a job to be eligible for
    /// recommendation.
    pub similarity_threshold: f64,
    /// Number of resume snippets retrieved per job.
    pub top_k_snippets: usize,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.25,
            top_k_snippets: 3,
        }
    }
}

/// Coordinates retrieval and reasoning to score jobs.
pub struct JobMatcher<'a, R: ReasoningEngine> {
    retriever: &'a mut ResumeRetriever,
    reasoning: R,
    settings: MatchSettings,
}

impl<'a, R: ReasoningEngine> JobMatcher<'a, R> {
    pub fn new(retriever: &'a mut ResumeRetriever, reasoning: R) -> Self {
        Self::with_settings(retriever, reasoning, MatchSettings::default())
    }

    pub fn with_settings(
        retriever: &'a mut ResumeRetriever,
        reasoning: R,
        settings: MatchSettings,
    ) -> Self {
        Self {
            retriever,
            reasoning,
            settings,
        }
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Index the resume ahead of scoring. Must be called once before
    /// `score_jobs`.
    pub fn prepare(&mut self, resume: &Resume, chunk_size: usize, overlap: usize) -> Result<()> {
        self.retriever.index(resume, chunk_size, overlap)
    }

    /// Score postings strictly in input order, consuming the sequence once.
    ///
    /// A job whose query returns zero snippets is skipped without a result.
    /// The similarity reported for a job is the maximum snippet score, so a
    /// single strong passage surfaces a job even when the other retrieved
    /// passages are weak. Reasoning failures propagate unmodified and abort
    /// the remaining jobs.
    pub fn score_jobs<I>(&self, jobs: I) -> Result<Vec<MatchingResult>>
    where
        I: IntoIterator<Item = JobPosting>,
    {
        let mut results = Vec::new();
        for job in jobs {
            let contexts = self
                .retriever
                .query(&job, Some(self.settings.top_k_snippets))?;
            if contexts.is_empty() {
                debug!("No snippets retrieved for '{}', skipping", job.title);
                continue;
            }

            let similarity = contexts
                .iter()
                .map(|context| context.score)
                .fold(f64::NEG_INFINITY, f64::max);
            let snippets: Vec<String> = contexts.into_iter().map(|c| c.snippet).collect();

            let reasoning =
                self.reasoning
                    .analyze(&job.title, &job.description, &snippets, similarity)?;
            let is_recommended = similarity >= self.settings.similarity_threshold
                && reasoning.to_lowercase().contains("yes");

            debug!(
                "Scored '{}': similarity {:.3}, recommended: {}",
                job.title, similarity, is_recommended
            );
            results.push(MatchingResult {
                job,
                similarity,
                reasoning,
                is_recommended,
            });
        }

        info!("Scored {} job postings", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JobMatcherError;
    use crate::llm::reasoning::HeuristicReasoner;
    use std::cell::RefCell;

    const RESUME_TEXT: &str = "Python developer with experience in machine learning and data \
engineering. Built scalable pipelines using AWS and Docker.";

    fn python_job() -> JobPosting {
        JobPosting::new(
            "Machine Learning Engineer",
            "Tech Corp",
            "Looking for a Python engineer with AWS experience to build data pipelines.",
            "https://example.com/ml",
        )
    }

    fn unrelated_job() -> JobPosting {
        JobPosting::new(
            "Pastry Chef",
            "Bistro",
            "Seeking an experienced chef for laminated doughs.",
            "https://example.com/chef",
        )
    }

    #[test]
    fn test_score_jobs_end_to_end_with_heuristic() {
        let mut retriever = ResumeRetriever::new(3);
        let mut matcher = JobMatcher::new(&mut retriever, HeuristicReasoner);
        assert_eq!(matcher.settings().similarity_threshold, 0.25);
        assert_eq!(matcher.settings().top_k_snippets, 3);
        matcher.prepare(&Resume::new(RESUME_TEXT), 10, 2).unwrap();

        let results = matcher.score_jobs(vec![python_job(), unrelated_job()]).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].job.title, "Machine Learning Engineer");
        assert_eq!(results[1].job.title, "Pastry Chef");
        assert!(results[0].similarity > results[1].similarity);
        assert!(!results[0].reasoning.is_empty());
    }

    #[test]
    fn test_recommendation_needs_both_threshold_and_keyword() {
        let mut retriever = ResumeRetriever::new(3);
        let always_no = |_: &str, _: &str, _: &[String], _: f64| -> Result<String> {
            Ok("High overlap on paper. Recommendation: NO.".to_string())
        };
        let settings = MatchSettings {
            similarity_threshold: 0.0,
            top_k_snippets: 3,
        };
        let mut matcher = JobMatcher::with_settings(&mut retriever, always_no, settings);
        matcher.prepare(&Resume::new(RESUME_TEXT), 10, 2).unwrap();

        let results = matcher.score_jobs(vec![python_job()]).unwrap();

        // Similarity clears the threshold, but the keyword is missing.
        assert_eq!(results.len(), 1);
        assert!(!results[0].is_recommended);
    }

    #[test]
    fn test_recommendation_rejected_below_threshold_despite_yes() {
        let mut retriever = ResumeRetriever::new(3);
        let always_yes =
            |_: &str, _: &str, _: &[String], _: f64| -> Result<String> { Ok("Yes, apply.".to_string()) };
        let settings = MatchSettings {
            similarity_threshold: 2.0,
            top_k_snippets: 3,
        };
        let mut matcher = JobMatcher::with_settings(&mut retriever, always_yes, settings);
        matcher.prepare(&Resume::new(RESUME_TEXT), 10, 2).unwrap();

        let results = matcher.score_jobs(vec![python_job()]).unwrap();

        assert_eq!(results.len(), 1);
        assert!(!results[0].is_recommended);
    }

    #[test]
    fn test_keyword_check_is_case_insensitive() {
        let mut retriever = ResumeRetriever::new(3);
        let shouting =
            |_: &str, _: &str, _: &[String], _: f64| -> Result<String> { Ok("YES.".to_string()) };
        let settings = MatchSettings {
            similarity_threshold: 0.0,
            top_k_snippets: 3,
        };
        let mut matcher = JobMatcher::with_settings(&mut retriever, shouting, settings);
        matcher.prepare(&Resume::new(RESUME_TEXT), 10, 2).unwrap();

        let results = matcher.score_jobs(vec![python_job()]).unwrap();
        assert!(results[0].is_recommended);
    }

    #[test]
    fn test_jobs_with_zero_snippets_are_skipped() {
        let mut retriever = ResumeRetriever::new(3);
        let settings = MatchSettings {
            similarity_threshold: 0.25,
            top_k_snippets: 0,
        };
        let mut matcher = JobMatcher::with_settings(&mut retriever, HeuristicReasoner, settings);
        matcher.prepare(&Resume::new(RESUME_TEXT), 10, 2).unwrap();

        let results = matcher.score_jobs(vec![python_job(), unrelated_job()]).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_reasoning_receives_best_first_snippets_and_max_similarity() {
        let mut retriever = ResumeRetriever::new(2);
        let calls: RefCell<Vec<(Vec<String>, f64)>> = RefCell::new(Vec::new());
        let recorder = |_: &str, _: &str, snippets: &[String], similarity: f64| -> Result<String> {
            calls.borrow_mut().push((snippets.to_vec(), similarity));
            Ok("yes".to_string())
        };
        let mut matcher = JobMatcher::new(&mut retriever, &recorder);
        matcher.prepare(&Resume::new(RESUME_TEXT), 10, 2).unwrap();

        matcher.score_jobs(vec![python_job()]).unwrap();

        let calls = calls.into_inner();
        assert_eq!(calls.len(), 1);
        let (snippets, similarity) = &calls[0];
        assert_eq!(snippets.len(), 2);
        // Best-first ordering: the reported similarity is the first score.
        assert!(*similarity > 0.0);
        assert!(snippets[0].contains("Python") || snippets[0].contains("pipelines"));
    }

    #[test]
    fn test_reasoning_error_aborts_remaining_jobs() {
        let mut retriever = ResumeRetriever::new(3);
        let calls = RefCell::new(0usize);
        let failing = |_: &str, _: &str, _: &[String], _: f64| -> Result<String> {
            *calls.borrow_mut() += 1;
            Err(JobMatcherError::Reasoning("backend unavailable".to_string()))
        };
        let mut matcher = JobMatcher::new(&mut retriever, &failing);
        matcher.prepare(&Resume::new(RESUME_TEXT), 10, 2).unwrap();

        let result = matcher.score_jobs(vec![python_job(), unrelated_job()]);

        assert!(matches!(result, Err(JobMatcherError::Reasoning(_))));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_score_jobs_before_prepare_fails() {
        let mut retriever = ResumeRetriever::new(3);
        let matcher = JobMatcher::new(&mut retriever, HeuristicReasoner);

        let result = matcher.score_jobs(vec![python_job()]);
        assert!(matches!(result, Err(JobMatcherError::NotIndexed)));
    }

    #[test]
    fn test_empty_job_sequence_yields_no_results() {
        let mut retriever = ResumeRetriever::new(3);
        let mut matcher = JobMatcher::new(&mut retriever, HeuristicReasoner);
        matcher.prepare(&Resume::new(RESUME_TEXT), 10, 2).unwrap();

        let results = matcher.score_jobs(Vec::new()).unwrap();
        assert!(results.is_empty());
    }
}
