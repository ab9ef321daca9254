//! Output formatters for match reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::models::MatchingResult;
use crate::output::report::MatchReport;
use askama::Template;
use colored::Colorize;

/// Trait for formatting match reports.
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and per-result detail.
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and API integration.
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharable reports.
pub struct MarkdownFormatter;

/// HTML formatter with minimal styling.
pub struct HtmlFormatter;

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn verdict(&self, result: &MatchingResult) -> String {
        if result.is_recommended {
            if self.use_colors {
                "RECOMMENDED".green().bold().to_string()
            } else {
                "RECOMMENDED".to_string()
            }
        } else if self.use_colors {
            "not recommended".red().to_string()
        } else {
            "not recommended".to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut out = String::new();
        out.push_str(&self.heading("Job Match Report"));
        out.push('\n');
        if let Some(resume_path) = &report.resume_path {
            out.push_str(&format!("Resume: {resume_path}\n"));
        }
        out.push_str(&format!(
            "Scored {} postings, {} recommended\n",
            report.summary.jobs_scored, report.summary.recommended
        ));
        if let Some(best_match) = &report.summary.best_match {
            out.push_str(&format!(
                "Best match: {} (similarity {:.3})\n",
                best_match, report.summary.best_similarity
            ));
        }
        out.push('\n');

        for (idx, result) in report.results.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} @ {} — {:.3} [{}]\n",
                idx + 1,
                self.heading(&result.job.title),
                result.job.company,
                result.similarity,
                self.verdict(result)
            ));
            out.push_str(&format!("   {}\n", result.job.url));
            if self.detailed {
                out.push_str(&format!("   {}\n", result.reasoning));
            }
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut out = String::new();
        out.push_str("# Job Match Report\n\n");
        out.push_str(&format!(
            "Generated: {}\n\n",
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
        out.push_str(&format!(
            "**{}** postings scored, **{}** recommended.\n\n",
            report.summary.jobs_scored, report.summary.recommended
        ));

        out.push_str("| Job | Company | Similarity | Recommended |\n");
        out.push_str("| --- | --- | --- | --- |\n");
        for result in &report.results {
            out.push_str(&format!(
                "| [{}]({}) | {} | {:.3} | {} |\n",
                result.job.title,
                result.job.url,
                result.job.company,
                result.similarity,
                if result.is_recommended { "yes" } else { "no" }
            ));
        }

        out.push_str("\n## Reasoning\n\n");
        for result in &report.results {
            out.push_str(&format!(
                "### {}\n\n{}\n\n",
                result.job.title, result.reasoning
            ));
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Askama template for HTML output.
#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Job Match Report</title>
<style>
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; color: #333; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
.recommended { color: #1a7f37; font-weight: bold; }
.rejected { color: #b35900; }
</style>
</head>
<body>
<h1>Job Match Report</h1>
<p>Generated {{ generated_at }} — {{ jobs_scored }} postings scored, {{ recommended }} recommended.</p>
<table>
<tr><th>Job</th><th>Company</th><th>Similarity</th><th>Verdict</th></tr>
{% for row in rows %}
<tr>
<td><a href="{{ row.url }}">{{ row.title }}</a></td>
<td>{{ row.company }}</td>
<td>{{ row.similarity }}</td>
<td class="{{ row.css_class }}">{{ row.verdict }}</td>
</tr>
{% endfor %}
</table>
{% for row in rows %}
<h3>{{ row.title }}</h3>
<p>{{ row.reasoning }}</p>
{% endfor %}
</body>
</html>"#,
    ext = "html"
)]
struct ReportTemplate {
    generated_at: String,
    jobs_scored: usize,
    recommended: usize,
    rows: Vec<ReportRow>,
}

struct ReportRow {
    title: String,
    company: String,
    url: String,
    similarity: String,
    verdict: &'static str,
    css_class: &'static str,
    reasoning: String,
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let rows = report
            .results
            .iter()
            .map(|result| ReportRow {
                title: result.job.title.clone(),
                company: result.job.company.clone(),
                url: result.job.url.clone(),
                similarity: format!("{:.3}", result.similarity),
                verdict: if result.is_recommended {
                    "recommended"
                } else {
                    "not recommended"
                },
                css_class: if result.is_recommended {
                    "recommended"
                } else {
                    "rejected"
                },
                reasoning: result.reasoning.clone(),
            })
            .collect();

        let template = ReportTemplate {
            generated_at: report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            jobs_scored: report.summary.jobs_scored,
            recommended: report.summary.recommended,
            rows,
        };

        template
            .render()
            .map_err(|e| crate::error::JobMatcherError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

/// Pick the formatter matching the requested output format.
pub fn format_report(
    report: &MatchReport,
    format: OutputFormat,
    use_colors: bool,
    detailed: bool,
) -> Result<String> {
    match format {
        OutputFormat::Console => ConsoleFormatter::new(use_colors, detailed).format_report(report),
        OutputFormat::Json => JsonFormatter::new(true).format_report(report),
        OutputFormat::Markdown => MarkdownFormatter.format_report(report),
        OutputFormat::Html => HtmlFormatter.format_report(report),
    }
}
