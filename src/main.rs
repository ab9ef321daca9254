//! Job matcher: resume-to-job matching with TF-IDF retrieval

mod cli;
mod config;
mod error;
mod fetchers;
mod input;
mod llm;
mod matcher;
mod models;
mod output;
mod retrieval;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use colored::Colorize;
use config::{Config, SearchConfig};
use error::{JobMatcherError, Result};
use fetchers::local::LocalJobFetcher;
use fetchers::JobFetcher;
use indicatif::ProgressBar;
use input::profile::ProfileExtractor;
use input::resume_parser::ResumeParser;
use llm::reasoning::HeuristicReasoner;
use log::{error, info};
use matcher::{JobMatcher, MatchSettings};
use output::formatter;
use output::report::MatchReport;
use retrieval::retriever::ResumeRetriever;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            jobs,
            chunk_size,
            overlap,
            top_k,
            threshold,
            keyword,
            location,
            output,
            save,
        } => {
            let resume = resume.or_else(|| config.resume.path.clone()).ok_or_else(|| {
                JobMatcherError::InvalidInput(
                    "No resume file given. Pass --resume or set resume.path in the config"
                        .to_string(),
                )
            })?;
            let jobs = jobs.or_else(|| config.search.jobs_path.clone()).ok_or_else(|| {
                JobMatcherError::InvalidInput(
                    "No jobs file given. Pass --jobs or set search.jobs_path in the config"
                        .to_string(),
                )
            })?;

            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| JobMatcherError::InvalidInput(format!("Resume file: {e}")))?;
            cli::validate_file_extension(&jobs, &["json"])
                .map_err(|e| JobMatcherError::InvalidInput(format!("Jobs file: {e}")))?;
            let output_format =
                cli::parse_output_format(&output).map_err(JobMatcherError::InvalidInput)?;

            let chunk_size = chunk_size.unwrap_or(config.resume.chunk_size);
            let overlap = overlap.unwrap_or(config.resume.chunk_overlap);
            let settings = MatchSettings {
                similarity_threshold: threshold.unwrap_or(config.matching.similarity_threshold),
                top_k_snippets: top_k.unwrap_or(config.matching.top_k_snippets),
            };

            info!("Loading resume from {}", resume.display());
            let parser = ResumeParser::new();
            let parsed_resume = parser.load(&resume).await?;

            let search = SearchConfig {
                keywords: if keyword.is_empty() {
                    config.search.keywords.clone()
                } else {
                    keyword
                },
                location: location.or_else(|| config.search.location.clone()),
                ..config.search.clone()
            };
            let fetcher = LocalJobFetcher::new(&jobs, search);
            let postings = fetcher.fetch().await?;
            if postings.is_empty() {
                println!("No job postings matched the search filters.");
                return Ok(());
            }

            let mut retriever = ResumeRetriever::new(settings.top_k_snippets);
            let mut job_matcher =
                JobMatcher::with_settings(&mut retriever, HeuristicReasoner, settings);
            job_matcher.prepare(&parsed_resume, chunk_size, overlap)?;

            info!("Scoring {} postings", postings.len());
            let progress = ProgressBar::new(postings.len() as u64);
            let results = job_matcher.score_jobs(progress.wrap_iter(postings.into_iter()))?;
            progress.finish_and_clear();

            let report =
                MatchReport::new(results).with_resume_path(resume.to_string_lossy().to_string());
            let rendered = formatter::format_report(
                &report,
                output_format,
                config.output.color_output && save.is_none(),
                config.output.detailed,
            )?;

            write_output(rendered, save)?;
        }

        Commands::Profile { resume } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| JobMatcherError::InvalidInput(format!("Resume file: {e}")))?;

            let parser = ResumeParser::new();
            let parsed_resume = parser.load(&resume).await?;
            let profile = ProfileExtractor::new()?.extract(&parsed_resume);

            println!("{}", "Candidate Profile".bold());
            println!("Name:   {}", profile.name.as_deref().unwrap_or("-"));
            println!("Email:  {}", profile.email.as_deref().unwrap_or("-"));
            println!("Phone:  {}", profile.phone.as_deref().unwrap_or("-"));
            println!("Skills: {}", profile.skills.join(", "));
            if let Some(summary) = &profile.experience_summary {
                println!("\n{summary}");
            }
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    JobMatcherError::Configuration(format!("Failed to serialize config: {e}"))
                })?;
                println!("{content}");
            }
            ConfigAction::Path => {
                println!("{}", Config::config_path().display());
            }
            ConfigAction::Reset => {
                Config::default().save()?;
                println!("Configuration reset to defaults.");
            }
        },
    }

    Ok(())
}

fn write_output(rendered: String, save: Option<PathBuf>) -> Result<()> {
    match save {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            println!("Report saved to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
