//! CLI interface for the candidate matcher

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "candidate-matcher")]
#[command(about = "Match candidates to company requirements by country, degree and skills")]
#[command(long_about = "Normalize company requirement and candidate tables exported from forms, then select the best eligible candidates for every requirement")]
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
    /// Match candidates against company requirements
    Match {
        /// Company requirements table (CSV, TSV, JSON)
        #[arg(short, long)]
        requirements: PathBuf,

        /// Candidate table (CSV, TSV, JSON)
        #[arg(short = 'a', long)]
        candidates: PathBuf,

        /// Directory of resume documents named by document ID
        #[arg(long)]
        resumes: Option<PathBuf>,

        /// Output format: console, json, markdown, html, csv
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file (a directory gets a timestamped file name)
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show per-requirement candidate details
        #[arg(short, long)]
        detailed: bool,

        /// Evaluate requirements in parallel
        #[arg(long)]
        parallel: bool,

        /// Minimum skill match percentage
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Normalize one table and print the records as JSON
    Normalize {
        /// Which kind of table the input holds
        #[arg(short, long, value_enum)]
        kind: DatasetKind,

        /// Input table (CSV, TSV, JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Write sample requirement and candidate tables
    Sample {
        /// Directory to write the sample CSV files into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetKind {
    Requirements,
    Candidates,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "matching.skill_threshold")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        "csv" => Ok(crate::config::OutputFormat::Csv),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html, csv",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

pub const TABLE_EXTENSIONS: &[&str] = &["csv", "tsv", "json"];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("CSV"), Ok(OutputFormat::Csv));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("reqs.CSV"), TABLE_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("reqs.xlsx"), TABLE_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("reqs"), TABLE_EXTENSIONS).is_err());
    }

    #[test]
    fn test_match_command_parses() {
        let cli = Cli::try_parse_from([
            "candidate-matcher",
            "match",
            "-r",
            "companies.csv",
            "-a",
            "students.json",
            "--threshold",
            "50",
            "--parallel",
        ])
        .unwrap();

        match cli.command {
            Commands::Match {
                requirements,
                candidates,
                threshold,
                parallel,
                ..
            } => {
                assert_eq!(requirements, PathBuf::from("companies.csv"));
                assert_eq!(candidates, PathBuf::from("students.json"));
                assert_eq!(threshold, Some(50.0));
                assert!(parallel);
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn test_normalize_command_parses() {
        let cli = Cli::try_parse_from(["candidate-matcher", "-v", "normalize", "--kind", "candidates", "-i", "s.csv"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Normalize {
                kind: DatasetKind::Candidates,
                ..
            }
        ));
    }
}
