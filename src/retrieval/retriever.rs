//! Retrieves the most relevant resume snippets for a job description

use crate::error::{JobMatcherError, Result};
use crate::models::{JobPosting, Resume};
use crate::retrieval::vector::TfIdfVector;
use log::debug;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// A resume snippet paired with its similarity to one job description.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedContext {
    pub snippet: String,
    pub score: f64,
}

/// Everything derived from one `index` call. Built in full and then swapped
/// in as a unit, so chunks, IDF table, and vectors always agree with each
/// other.
struct ResumeIndex {
    chunks: Vec<String>,
    idf: HashMap<String, f64>,
    vectors: Vec<TfIdfVector>,
}

/// TF-IDF retriever over overlapping word windows of a single resume.
///
/// Not safe for concurrent `index`/`query` calls on one instance; use one
/// retriever per resume when matching concurrently.
pub struct ResumeRetriever {
    max_snippets: usize,
    tokenizer: Regex,
    index: Option<ResumeIndex>,
}

impl ResumeRetriever {
    pub fn new(max_snippets: usize) -> Self {
        let tokenizer = Regex::new(r"[a-zA-Z0-9]+").expect("Invalid token regex");
        Self {
            max_snippets,
            tokenizer,
            index: None,
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Chunk the resume and build a fresh index over it.
    ///
    /// Replaces any prior index state in a single assignment once the new
    /// snapshot is fully built.
    pub fn index(&mut self, resume: &Resume, chunk_size: usize, overlap: usize) -> Result<()> {
        let chunks = self.chunk_text(&resume.raw_text, chunk_size, overlap)?;
        if chunks.is_empty() {
            return Err(JobMatcherError::Indexing(
                "Resume did not produce any chunks for retrieval".to_string(),
            ));
        }

        let tokenized: Vec<Vec<String>> = chunks.iter().map(|chunk| self.tokenize(chunk)).collect();
        let idf = Self::compute_idf(&tokenized);
        let vectors = tokenized
            .iter()
            .map(|tokens| TfIdfVector::build(tokens, &idf))
            .collect();

        debug!(
            "Indexed {} resume chunks over {} distinct terms",
            chunks.len(),
            idf.len()
        );
        self.index = Some(ResumeIndex {
            chunks,
            idf,
            vectors,
        });
        Ok(())
    }

    /// Return the top resume snippets relevant to the job description,
    /// sorted by descending similarity. Ties keep original chunk order.
    pub fn query(&self, job: &JobPosting, top_k: Option<usize>) -> Result<Vec<RetrievedContext>> {
        let index = self.index.as_ref().ok_or(JobMatcherError::NotIndexed)?;

        let query_tokens = self.tokenize(&job.description);
        let query_vector = TfIdfVector::build(&query_tokens, &index.idf);

        let mut ranked: Vec<(usize, f64)> = index
            .vectors
            .iter()
            .map(|vector| query_vector.cosine_similarity(vector))
            .enumerate()
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let top_k = top_k.unwrap_or(self.max_snippets);
        Ok(ranked
            .into_iter()
            .take(top_k)
            .map(|(chunk_idx, score)| RetrievedContext {
                snippet: index.chunks[chunk_idx].clone(),
                score,
            })
            .collect())
    }

    /// Slide a window of `chunk_size` words across the text, advancing by
    /// `end - overlap` each step. The final partial window is included and
    /// the loop stops once the window reaches the end of the text.
    fn chunk_text(&self, text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
        if chunk_size <= overlap {
            return Err(JobMatcherError::Indexing(
                "chunk_size must be greater than overlap".to_string(),
            ));
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        let mut chunks = Vec::new();
        let mut start = 0;
        while start < words.len() {
            let end = usize::min(start + chunk_size, words.len());
            chunks.push(words[start..end].join(" "));
            if end == words.len() {
                break;
            }
            start = end.saturating_sub(overlap);
        }
        Ok(chunks)
    }

    /// Maximal runs of ASCII letters and digits, lowercased. Everything else
    /// is a separator and is dropped.
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.tokenizer
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Smoothed IDF: `ln((1 + N) / (1 + df)) + 1`. Strictly positive for
    /// every term, even one present in all chunks.
    fn compute_idf(documents: &[Vec<String>]) -> HashMap<String, f64> {
        let doc_count = documents.len() as f64;
        let mut df: HashMap<&str, usize> = HashMap::new();
        for tokens in documents {
            let distinct: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in distinct {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        df.into_iter()
            .map(|(term, freq)| {
                let idf = ((1.0 + doc_count) / (1.0 + freq as f64)).ln() + 1.0;
                (term.to_string(), idf)
            })
            .collect()
    }
}

impl Default for ResumeRetriever {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME_TEXT: &str = "Python developer with experience in machine learning and data \
engineering. Built scalable pipelines using AWS and Docker.";

    fn sample_job() -> JobPosting {
        JobPosting::new(
            "Machine Learning Engineer",
            "Tech Corp",
            "Looking for a Python engineer with AWS experience to build data pipelines.",
            "https://example.com",
        )
    }

    #[test]
    fn test_returns_ranked_snippets() {
        let mut retriever = ResumeRetriever::new(2);
        retriever
            .index(&Resume::new(RESUME_TEXT), 10, 2)
            .unwrap();

        let contexts = retriever.query(&sample_job(), None).unwrap();

        assert_eq!(contexts.len(), 2);
        assert!(contexts.iter().all(|context| context.score >= 0.0));
        assert!(contexts.iter().any(|context| context.snippet.contains("Python")));
    }

    #[test]
    fn test_chunk_windows_cover_text_and_end_at_last_word() {
        let retriever = ResumeRetriever::default();
        let chunks = retriever.chunk_text(RESUME_TEXT, 10, 2).unwrap();

        // 16 words: [0..10] then start = 10 - 2 = 8, [8..16]
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].starts_with("Python developer"));
        assert!(chunks[1].ends_with("Docker."));

        let words: Vec<&str> = RESUME_TEXT.split_whitespace().collect();
        let last_chunk_words: Vec<&str> = chunks.last().unwrap().split_whitespace().collect();
        assert_eq!(last_chunk_words.last(), words.last());
    }

    #[test]
    fn test_single_partial_window_when_text_is_short() {
        let retriever = ResumeRetriever::default();
        let chunks = retriever.chunk_text("one two three", 10, 2).unwrap();

        assert_eq!(chunks, vec!["one two three".to_string()]);
    }

    #[test]
    fn test_idf_is_strictly_positive_for_every_term() {
        let documents = vec![
            vec!["rust".to_string(), "python".to_string()],
            vec!["rust".to_string(), "docker".to_string()],
        ];
        let idf = ResumeRetriever::compute_idf(&documents);

        // "rust" appears in every chunk and still gets a positive weight.
        assert!(idf.values().all(|&weight| weight > 0.0));
        assert!(idf["docker"] > idf["rust"]);
    }

    #[test]
    fn test_query_sorted_descending_with_stable_ties() {
        let mut retriever = ResumeRetriever::new(4);
        // Four two-word chunks, none sharing terms with the query: every
        // similarity is 0.0 and the original chunk order must survive.
        retriever
            .index(&Resume::new("alpha bravo charlie delta echo foxtrot golf hotel"), 2, 0)
            .unwrap();

        let unrelated = JobPosting::new("Chef", "Bistro", "Seeking a pastry chef.", "https://example.com");
        let contexts = retriever.query(&unrelated, None).unwrap();

        let snippets: Vec<&str> = contexts.iter().map(|c| c.snippet.as_str()).collect();
        assert_eq!(
            snippets,
            vec!["alpha bravo", "charlie delta", "echo foxtrot", "golf hotel"]
        );
        for pair in contexts.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_query_terms_unseen_in_resume_are_ignored() {
        let mut retriever = ResumeRetriever::new(1);
        retriever.index(&Resume::new(RESUME_TEXT), 10, 2).unwrap();

        let job = JobPosting::new(
            "Engineer",
            "Acme",
            "Python plus zymurgy and xenobiology.",
            "https://example.com",
        );
        let contexts = retriever.query(&job, None).unwrap();

        assert_eq!(contexts.len(), 1);
        assert!(contexts[0].score > 0.0);
    }

    #[test]
    fn test_query_before_index_fails() {
        let retriever = ResumeRetriever::default();
        assert!(!retriever.is_indexed());

        let result = retriever.query(&sample_job(), None);
        assert!(matches!(result, Err(JobMatcherError::NotIndexed)));
    }

    #[test]
    fn test_index_rejects_chunk_size_not_greater_than_overlap() {
        let mut retriever = ResumeRetriever::default();
        let result = retriever.index(&Resume::new(RESUME_TEXT), 50, 50);

        assert!(matches!(result, Err(JobMatcherError::Indexing(_))));
    }

    #[test]
    fn test_index_rejects_empty_resume() {
        let mut retriever = ResumeRetriever::default();
        let result = retriever.index(&Resume::new("   \n  "), 10, 2);

        assert!(matches!(result, Err(JobMatcherError::Indexing(_))));
    }

    #[test]
    fn test_query_with_zero_top_k_returns_nothing() {
        let mut retriever = ResumeRetriever::default();
        retriever.index(&Resume::new(RESUME_TEXT), 10, 2).unwrap();

        let contexts = retriever.query(&sample_job(), Some(0)).unwrap();
        assert!(contexts.is_empty());
    }

    #[test]
    fn test_reindex_replaces_prior_state() {
        let mut retriever = ResumeRetriever::new(5);
        retriever.index(&Resume::new(RESUME_TEXT), 10, 2).unwrap();
        retriever
            .index(&Resume::new("Accountant specializing in tax law."), 10, 2)
            .unwrap();

        let contexts = retriever.query(&sample_job(), None).unwrap();
        assert_eq!(contexts.len(), 1);
        assert!(!contexts[0].snippet.contains("Python"));
    }

    #[test]
    fn test_tokenize_lowercases_and_drops_punctuation() {
        let retriever = ResumeRetriever::default();
        let tokens = retriever.tokenize("C++ and Node.js, v2!");

        assert_eq!(tokens, vec!["c", "and", "node", "js", "v2"]);
    }
}
