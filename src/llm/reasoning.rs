//! Pluggable reasoning step for the match decision

use crate::error::Result;
use unicode_segmentation::UnicodeSegmentation;

/// Produces a textual fit assessment for one job.
///
/// The matcher treats the backend as opaque: it passes the job title and
/// description, the retrieved snippets (best first), and the retrieval
/// similarity, then captures the returned text verbatim. Which backend to
/// wire in is the caller's decision when assembling the matcher.
pub trait ReasoningEngine {
    fn analyze(
        &self,
        job_title: &str,
        job_description: &str,
        resume_snippets: &[String],
        similarity: f64,
    ) -> Result<String>;
}

/// Plain functions and closures work as reasoning backends.
impl<F> ReasoningEngine for F
where
    F: Fn(&str, &str, &[String], f64) -> Result<String>,
{
    fn analyze(
        &self,
        job_title: &str,
        job_description: &str,
        resume_snippets: &[String],
        similarity: f64,
    ) -> Result<String> {
        self(job_title, job_description, resume_snippets, similarity)
    }
}

/// Deterministic offline backend. Keeps the pipeline working without any
/// model access; the verdict tracks the retrieval similarity alone and the
/// text always ends with a `Recommendation: YES|NO.` marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicReasoner;

impl HeuristicReasoner {
    const STRONG_SIMILARITY: f64 = 0.4;
    const PROMISING_SIMILARITY: f64 = 0.25;
    const PREVIEW_CHARS: usize = 240;

    fn preview(text: &str) -> &str {
        match text.char_indices().nth(Self::PREVIEW_CHARS) {
            Some((idx, _)) => &text[..idx],
            None => text,
        }
    }
}

impl ReasoningEngine for HeuristicReasoner {
    fn analyze(
        &self,
        job_title: &str,
        job_description: &str,
        resume_snippets: &[String],
        similarity: f64,
    ) -> Result<String> {
        let snippet_highlight = resume_snippets
            .first()
            .map(|snippet| Self::preview(snippet))
            .unwrap_or("");
        let description_focus = job_description
            .unicode_sentences()
            .next()
            .map(str::trim)
            .unwrap_or("");
        let description_focus = Self::preview(description_focus);

        let (verdict, takeaway) = if similarity >= Self::STRONG_SIMILARITY {
            ("YES", "The resume strongly aligns with the job requirements.")
        } else if similarity >= Self::PROMISING_SIMILARITY {
            ("YES", "The match looks promising with some gaps to address.")
        } else {
            ("NO", "The overlap with the resume is limited.")
        };

        Ok(format!(
            "Role: {job_title}. First job detail: {description_focus}. \
Resume highlight: {snippet_highlight}. {takeaway} Recommendation: {verdict}."
        ))
    }
}
