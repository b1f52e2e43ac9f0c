//! Candidate matcher: select eligible candidates for company requirements

use anyhow::Context;
use candidate_matcher::cli::{self, Cli, Commands, ConfigAction, DatasetKind};
use candidate_matcher::config::{Config, ProviderKind};
use candidate_matcher::error::{MatcherError, Result};
use candidate_matcher::input::InputManager;
use candidate_matcher::output::{save_report_to_file, suggest_filename, MatchReport, ReportGenerator};
use candidate_matcher::processing::matcher::Matcher;
use candidate_matcher::processing::normalizer::{normalize_candidates, normalize_requirements};
use candidate_matcher::resume::provider_from_config;
use candidate_matcher::sample_data;
use candidate_matcher::session::MatchingSession;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if path.exists() => Config::load_from(path),
        Some(path) => {
            warn!("Config file {} not found, using defaults", path.display());
            Ok(Config::default())
        }
        None => Config::load(),
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Match {
            requirements,
            candidates,
            resumes,
            output,
            save,
            detailed,
            parallel,
            threshold,
        } => {
            for path in [&requirements, &candidates] {
                cli::validate_file_extension(path, cli::TABLE_EXTENSIONS)
                    .map_err(|e| MatcherError::InvalidInput(format!("{}: {}", path.display(), e)))?;
            }

            if let Some(threshold) = threshold {
                config.matching.skill_threshold = threshold;
            }
            if parallel {
                config.matching.parallel = true;
            }
            if detailed {
                config.output.detailed = true;
            }
            if let Some(dir) = resumes {
                config.resume.provider = ProviderKind::Directory;
                config.resume.resume_dir = Some(dir);
            }
            if let Some(output) = output {
                config.output.format = cli::parse_output_format(&output).map_err(MatcherError::InvalidInput)?;
            }
            config.validate()?;

            run_match(&requirements, &candidates, save, &config).await
        }

        Commands::Normalize { kind, input } => {
            cli::validate_file_extension(&input, cli::TABLE_EXTENSIONS).map_err(MatcherError::InvalidInput)?;

            let mut input_manager = InputManager::new();
            let table = input_manager.load_table(&input).await?;

            let json = match kind {
                DatasetKind::Requirements => {
                    let mut outcome = normalize_requirements(&table.rows);
                    outcome.skipped.extend(table.skipped);
                    serde_json::json!({ "records": outcome.records, "skipped": outcome.skipped })
                }
                DatasetKind::Candidates => {
                    let mut outcome = normalize_candidates(&table.rows);
                    outcome.skipped.extend(table.skipped);
                    serde_json::json!({ "records": outcome.records, "skipped": outcome.skipped })
                }
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(())
        }

        Commands::Sample { out_dir } => {
            let files = sample_data::write_samples(&out_dir, chrono::Utc::now())?;
            println!("{}", "✅ Sample files generated:".green().bold());
            println!("   - {}", files.requirements.display());
            println!("   - {}", files.candidates.display());
            println!("   - {}/", files.resumes_dir.display());
            println!(
                "\nTry: candidate-matcher match -r {} -a {} --resumes {}",
                files.requirements.display(),
                files.candidates.display(),
                files.resumes_dir.display()
            );
            Ok(())
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("📋 Configuration ({})", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| MatcherError::Configuration(e.to_string()))?;
                println!("{}", content);
                Ok(())
            }
            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset to defaults");
                Ok(())
            }
            Some(ConfigAction::Set { key, value }) => {
                config.set_value(&key, &value)?;
                config.save_to(config_path)?;
                println!("✅ Set {} = {}", key, value);
                Ok(())
            }
        },
    }
}

async fn run_match(requirements: &Path, candidates: &Path, save: Option<PathBuf>, config: &Config) -> Result<()> {
    let started = Instant::now();
    let mut input_manager = InputManager::new();

    let requirement_table = input_manager
        .load_table(requirements)
        .await
        .with_context(|| format!("loading requirements from {}", requirements.display()))?;
    let candidate_table = input_manager
        .load_table(candidates)
        .await
        .with_context(|| format!("loading candidates from {}", candidates.display()))?;

    for (table, path) in [(&requirement_table, requirements), (&candidate_table, candidates)] {
        if table.is_empty() {
            warn!("No readable rows in {}", path.display());
        }
    }

    let mut session = MatchingSession::new();
    let requirement_summary = session.load_requirements(&requirement_table);
    let candidate_summary = session.load_candidates(&candidate_table);

    for skipped in session.skipped_requirements() {
        warn!("Requirement row {} skipped: {}", skipped.position, skipped.reason);
    }
    for skipped in session.skipped_candidates() {
        warn!("Candidate row {} skipped: {}", skipped.position, skipped.reason);
    }

    let provider = provider_from_config(&config.resume)?;
    let matcher = Matcher::from_config(&config.matching);

    let progress = ProgressBar::new(session.requirements().len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} requirements ({eta})")
            .map_err(|e| MatcherError::Processing(e.to_string()))?
            .progress_chars("#>-"),
    );

    let progress_handle = progress.clone();
    let records = tokio::task::spawn_blocking(move || {
        session.run_with_progress(&matcher, provider.as_ref(), &|| progress_handle.inc(1))
    })
    .await
    .map_err(|e| MatcherError::Processing(format!("matching task failed: {}", e)))?;
    progress.finish_and_clear();

    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!("Matched {} requirements in {}ms", records.len(), elapsed_ms);

    let report = MatchReport::new(
        records,
        requirement_summary,
        candidate_summary,
        config.matching.skill_threshold,
        elapsed_ms,
    );

    let output = &config.output;
    let generator = ReportGenerator::with_options(
        output.color_output && save.is_none(),
        output.detailed,
        true,
        true,
        true,
    );
    let content = generator.generate_report(&report, &output.format)?;

    match save {
        Some(target) => {
            let path = if target.is_dir() {
                target.join(suggest_filename(&output.format, report.metadata.generated_at))
            } else {
                target
            };
            save_report_to_file(&content, &path)?;
            println!("💾 Results saved to {}", path.display());
        }
        None => {
            print!("{}", content);
            if !content.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}
