//! CLI interface for the resume matcher

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Keyword-based resume and job requirement matcher")]
#[command(
    long_about = "Upload resumes (PDF, DOCX, TXT) and score them against a job requirement \
                  on skills, experience, education and title"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload one or more resumes
    Upload {
        /// Resume files (PDF, DOCX, TXT)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List uploaded resumes
    List,

    /// Show the entities parsed from one resume
    Show {
        /// Resume id
        id: String,
    },

    /// Delete a resume and its analyses
    Delete {
        /// Resume id
        id: String,
    },

    /// Score every uploaded resume against a job requirement
    Analyze {
        /// Job title
        #[arg(short, long)]
        title: String,

        /// Job description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Required skills, comma separated
        #[arg(short, long, default_value = "")]
        skills: String,

        /// Required years of experience
        #[arg(short, long, default_value = "0")]
        experience: String,

        /// Education requirements, comma separated
        #[arg(long, default_value = "")]
        education: String,

        /// Hiring company
        #[arg(long)]
        company: Option<String>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Show stored analyses for a resume
    History {
        /// Resume id
        id: String,
    },

    /// Query the skills index
    Skills {
        /// Show resumes with this skill instead of all skills
        skill: Option<String>,
    },

    /// List job titles analysed so far
    Titles,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<String, String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            let ext = ext.to_lowercase();
            if allowed_extensions.contains(&ext.as_str()) {
                Ok(ext)
            } else {
                Err(format!(
                    "Unsupported file format: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("Unsupported file format: file has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("console"), Ok(OutputFormat::Console));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["pdf", "docx", "txt"];
        assert_eq!(validate_file_extension(Path::new("cv.PDF"), &allowed), Ok("pdf".to_string()));
        assert!(validate_file_extension(Path::new("cv.rtf"), &allowed)
            .unwrap_err()
            .starts_with("Unsupported file format"));
        assert!(validate_file_extension(Path::new("cv"), &allowed).is_err());
    }

    #[test]
    fn test_analyze_arguments_parse() {
        let cli = Cli::try_parse_from([
            "resume-matcher",
            "analyze",
            "--title",
            "Data Engineer",
            "--skills",
            "python, sql",
            "--experience",
            "3",
            "--education",
            "bachelor",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { title, skills, experience, output, .. } => {
                assert_eq!(title, "Data Engineer");
                assert_eq!(skills, "python, sql");
                assert_eq!(experience, "3");
                assert!(output.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }
}
