//! Data models shared across the job matching pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parsed resume content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub raw_text: String,
    #[serde(default)]
    pub sections: HashMap<String, String>,
}

impl Resume {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            sections: HashMap::new(),
        }
    }

    pub fn with_sections(raw_text: impl Into<String>, sections: HashMap<String, String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            sections,
        }
    }

    pub fn section(&self, name: &str) -> Option<&str> {
        self.sections.get(name).map(String::as_str)
    }
}

/// A job listing fetched from a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub description: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
}

impl JobPosting {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            description: description.into(),
            url: url.into(),
            location: None,
            salary: None,
            source: None,
            posted_at: None,
        }
    }
}

/// Outcome of matching a job posting to the resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingResult {
    pub job: JobPosting,
    pub similarity: f64,
    pub reasoning: String,
    pub is_recommended: bool,
}

/// Structured data extracted from the resume for applications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub experience_summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_posting_deserializes_with_optional_fields_missing() {
        let payload = r#"{
            "title": "Backend Engineer",
            "company": "Acme",
            "description": "Build services in Rust.",
            "url": "https://example.com/jobs/1"
        }"#;

        let job: JobPosting = serde_json::from_str(payload).unwrap();
        assert_eq!(job.title, "Backend Engineer");
        assert_eq!(job.location, None);
        assert_eq!(job.posted_at, None);
    }

    #[test]
    fn test_resume_section_lookup() {
        let mut sections = HashMap::new();
        sections.insert("skills".to_string(), "Rust, Python".to_string());
        let resume = Resume::with_sections("Rust developer", sections);

        assert_eq!(resume.section("skills"), Some("Rust, Python"));
        assert_eq!(resume.section("education"), None);
    }
}
