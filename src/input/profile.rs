//! Candidate profile extraction from parsed resumes

use crate::error::{JobMatcherError, Result};
use crate::models::{CandidateProfile, Resume};
use aho_corasick::AhoCorasick;
use regex::Regex;
use strsim::jaro_winkler;

/// Extracts a lightweight candidate profile (contact details, skills,
/// experience summary) from a parsed resume.
pub struct ProfileExtractor {
    email_regex: Regex,
    phone_regex: Regex,
    skill_matcher: AhoCorasick,
    known_skills: Vec<String>,
    fuzzy_threshold: f64,
}

impl ProfileExtractor {
    pub fn new() -> Result<Self> {
        Self::with_custom_skills(Vec::new())
    }

    /// Build an extractor with additional known skills beyond the defaults.
    pub fn with_custom_skills(additional_skills: Vec<String>) -> Result<Self> {
        let mut known_skills = Self::default_skills();
        known_skills.extend(additional_skills);
        known_skills.sort();
        known_skills.dedup();

        let skill_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&known_skills)
            .map_err(|e| {
                JobMatcherError::ResumeParsing(format!("Failed to build skill matcher: {e}"))
            })?;

        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");
        let phone_regex =
            Regex::new(r"\b(?:\+?1[-. ]?)?\(?[0-9]{3}\)?[-. ]?[0-9]{3}[-. ]?[0-9]{4}\b")
                .expect("Invalid phone regex");

        Ok(Self {
            email_regex,
            phone_regex,
            skill_matcher,
            known_skills,
            fuzzy_threshold: 0.9,
        })
    }

    pub fn extract(&self, resume: &Resume) -> CandidateProfile {
        CandidateProfile {
            name: self.extract_name(resume),
            email: self
                .email_regex
                .find(&resume.raw_text)
                .map(|m| m.as_str().to_string()),
            phone: self
                .phone_regex
                .find(&resume.raw_text)
                .map(|m| m.as_str().to_string()),
            skills: self.extract_skills(resume),
            experience_summary: resume
                .section("summary")
                .or_else(|| resume.section("experience"))
                .map(str::to_string),
        }
    }

    /// The first short line that doesn't look like contact info.
    fn extract_name(&self, resume: &Resume) -> Option<String> {
        resume.raw_text.lines().take(5).find_map(|line| {
            let trimmed = line.trim();
            let plausible = (5..100).contains(&trimmed.chars().count())
                && !trimmed.contains('@')
                && !trimmed.starts_with('-')
                && !self.phone_regex.is_match(trimmed);
            plausible.then(|| trimmed.to_string())
        })
    }

    /// Skills from the `skills` section (comma separated), then a known-skill
    /// scan of the full text, then a fuzzy pass for near-miss spellings.
    fn extract_skills(&self, resume: &Resume) -> Vec<String> {
        let mut skills: Vec<String> = resume
            .section("skills")
            .map(|section| {
                section
                    .split(',')
                    .map(str::trim)
                    .filter(|skill| !skill.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        for m in self.skill_matcher.find_iter(&resume.raw_text) {
            skills.push(self.known_skills[m.pattern().as_usize()].clone());
        }

        for word in resume.raw_text.split_whitespace() {
            let cleaned = Self::clean_word(word).to_lowercase();
            if cleaned.chars().count() < 3 {
                continue;
            }
            for skill in &self.known_skills {
                if cleaned == *skill {
                    continue;
                }
                if jaro_winkler(&cleaned, skill) >= self.fuzzy_threshold {
                    skills.push(skill.clone());
                    break;
                }
            }
        }

        let mut deduped = Vec::new();
        for skill in skills {
            if !deduped
                .iter()
                .any(|existing: &String| existing.eq_ignore_ascii_case(&skill))
            {
                deduped.push(skill);
            }
        }
        deduped
    }

    /// Keep alphanumerics plus the symbols that appear in skill names.
    fn clean_word(word: &str) -> String {
        word.chars()
            .filter(|c| c.is_alphanumeric() || *c == '+' || *c == '#')
            .collect()
    }

    fn default_skills() -> Vec<String> {
        [
            "python", "rust", "java", "javascript", "typescript", "go", "c++", "c#",
            "sql", "postgresql", "mysql", "mongodb", "redis", "elasticsearch",
            "aws", "azure", "gcp", "docker", "kubernetes", "terraform",
            "react", "vue", "angular", "django", "flask",
            "machine learning", "deep learning", "tensorflow", "pytorch",
            "spark", "kafka", "airflow", "data engineering",
            "git", "linux", "agile", "scrum",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}
