//! Prompt template for model-backed reasoning engines

/// Template for the match-analysis prompt sent to a language model when one
/// backs the reasoning step. The crate ships no model client; callers render
/// this prompt inside their own `ReasoningEngine` implementation.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub match_analysis: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            match_analysis: MATCH_ANALYSIS_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn render_match_analysis(
        &self,
        job_title: &str,
        job_description: &str,
        resume_snippets: &[String],
        similarity: f64,
    ) -> String {
        let context = resume_snippets.join("\n---\n");
        self.match_analysis
            .replace("{title}", job_title)
            .replace("{description}", job_description)
            .replace("{similarity}", &format!("{similarity:.3}"))
            .replace("{snippets}", &context)
    }
}

const MATCH_ANALYSIS_TEMPLATE: &str = r#"Evaluate whether the candidate is a strong fit for the job.
Job Title: {title}
Job Description:
{description}

Similarity score from retrieval model: {similarity}.
Relevant resume snippets:
{snippets}

Respond with a concise summary highlighting strengths, gaps, and a final yes/no recommendation."#;
