//! Loading and parsing resume files into structured data

use crate::error::{JobMatcherError, Result};
use crate::models::Resume;
use log::info;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Parses TXT, MD, and PDF resume files.
pub struct ResumeParser {
    tag_regex: Regex,
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeParser {
    pub fn new() -> Self {
        let tag_regex = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
        Self { tag_regex }
    }

    /// Load a resume file, normalize its text, and split it into sections.
    pub async fn load(&self, path: &Path) -> Result<Resume> {
        if !path.exists() {
            return Err(JobMatcherError::InvalidInput(format!(
                "Resume file not found: {}",
                path.display()
            )));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let text = match extension.as_str() {
            "txt" => {
                info!("Reading plain text resume: {}", path.display());
                fs::read_to_string(path).await?
            }
            "md" => {
                info!("Processing markdown resume: {}", path.display());
                let markdown = fs::read_to_string(path).await?;
                self.markdown_to_text(&markdown)
            }
            "pdf" => {
                info!("Extracting text from PDF resume: {}", path.display());
                self.extract_pdf(path).await?
            }
            other => {
                return Err(JobMatcherError::UnsupportedFormat(format!(
                    "Unsupported resume format '{other}'. Provide TXT, MD, or PDF"
                )));
            }
        };

        let cleaned = Self::normalize(&text);
        if cleaned.is_empty() {
            return Err(JobMatcherError::ResumeParsing(format!(
                "Resume file is empty: {}",
                path.display()
            )));
        }

        let sections = Self::split_sections(&cleaned);
        Ok(Resume::with_sections(cleaned, sections))
    }

    async fn extract_pdf(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            JobMatcherError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;

        if text.trim().is_empty() {
            return Err(JobMatcherError::PdfExtraction(
                "No text could be extracted from the PDF resume".to_string(),
            ));
        }
        Ok(text)
    }

    /// Render markdown to HTML, then strip tags and entities back to plain
    /// text.
    fn markdown_to_text(&self, markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        let text = html_output
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        self.tag_regex.replace_all(&text, "").to_string()
    }

    fn normalize(text: &str) -> String {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Split normalized text into named sections. A short, purely alphabetic
    /// line (optionally ending with a colon) starts a new section; anything
    /// before the first header lands in `summary`.
    fn split_sections(text: &str) -> HashMap<String, String> {
        let mut sections = HashMap::new();
        let mut current = "summary".to_string();
        let mut buffer: Vec<&str> = Vec::new();

        for line in text.lines() {
            let normalized = line
                .to_lowercase()
                .trim()
                .trim_matches(':')
                .to_string();
            let is_header = !normalized.is_empty()
                && normalized.chars().count() < 60
                && normalized.chars().all(char::is_alphabetic);

            if is_header {
                if !buffer.is_empty() {
                    sections.insert(current.clone(), buffer.join("\n").trim().to_string());
                }
                current = normalized;
                buffer.clear();
            } else {
                buffer.push(line);
            }
        }

        if !buffer.is_empty() {
            sections.insert(current, buffer.join("\n").trim().to_string());
        }

        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_plain_text_resume() {
        let file = temp_file(
            ".txt",
            "Jane Doe\n\nExperience:\nPython developer at Acme.\n\nSkills:\nPython, AWS, Docker\n",
        );

        let resume = ResumeParser::new().load(file.path()).await.unwrap();

        assert!(resume.raw_text.contains("Jane Doe"));
        assert!(!resume.raw_text.contains("\n\n"));
        assert_eq!(resume.section("experience"), Some("Python developer at Acme."));
        assert_eq!(resume.section("skills"), Some("Python, AWS, Docker"));
    }

    #[tokio::test]
    async fn test_markdown_formatting_is_stripped() {
        let file = temp_file(
            ".md",
            "# Jane Doe\n\n**Experienced** Python developer.\n\n## Skills\n\n- Python\n- Docker\n",
        );

        let resume = ResumeParser::new().load(file.path()).await.unwrap();

        assert!(resume.raw_text.contains("Jane Doe"));
        assert!(resume.raw_text.contains("Experienced"));
        assert!(!resume.raw_text.contains("**"));
        assert!(!resume.raw_text.contains("##"));
    }

    #[tokio::test]
    async fn test_unsupported_format_is_rejected() {
        let file = temp_file(".docx", "not really a docx");

        let result = ResumeParser::new().load(file.path()).await;
        assert!(matches!(result, Err(JobMatcherError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_rejected() {
        let result = ResumeParser::new()
            .load(Path::new("definitely/not/here.txt"))
            .await;
        assert!(matches!(result, Err(JobMatcherError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_empty_file_is_rejected() {
        let file = temp_file(".txt", "  \n \n");

        let result = ResumeParser::new().load(file.path()).await;
        assert!(matches!(result, Err(JobMatcherError::ResumeParsing(_))));
    }

    #[test]
    fn test_leading_content_lands_in_summary() {
        let sections =
            ResumeParser::split_sections("Jane Doe\nSeasoned developer\nEducation\nBSc Computing");

        assert_eq!(sections["summary"], "Jane Doe\nSeasoned developer");
        assert_eq!(sections["education"], "BSc Computing");
    }

    #[test]
    fn test_multi_word_headers_are_not_section_breaks() {
        let sections = ResumeParser::split_sections("Work history at Acme\nSkills:\nRust");

        // "work history at acme" contains spaces, so it stays in the summary.
        assert_eq!(sections["summary"], "Work history at Acme");
        assert_eq!(sections["skills"], "Rust");
    }
}
