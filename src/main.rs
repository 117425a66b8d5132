//! Resume matcher: score uploaded resumes against a job requirement

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::OutputFormat;
use resume_matcher::error::{MatcherError, Result};
use resume_matcher::input::file_detector::SUPPORTED_EXTENSIONS;
use resume_matcher::output::formatter::{self, ReportEntry};
use resume_matcher::processing::document::JobRequirement;
use resume_matcher::processing::indices::Indices;
use resume_matcher::store::Store;
use resume_matcher::{Config, MatcherService};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = match Config::load(Some(config_path.as_path())) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Config { action } => run_config(action, &config, &config_path),
        command => run_store_command(command, &config, &config_path).await,
    }
}

async fn run_store_command(command: Commands, config: &Config, config_path: &Path) -> Result<()> {
    let mut store = Store::open(&config.storage)?;
    let service = MatcherService::new(&config.extraction, Arc::new(Indices::new()));
    service.restore_indices(&store);

    match command {
        Commands::Upload { files } => {
            for file in &files {
                cli::validate_file_extension(file, SUPPORTED_EXTENSIONS)
                    .map_err(|_| MatcherError::UnsupportedFormat(file.display().to_string()))?;
            }

            for file in &files {
                println!("📄 Uploading {}...", file.display());
                let record = service.upload_file(&mut store, file).await?;
                println!("✅ {} ({})", record.name, record.id);
                println!(
                    "  • {} candidate skills, {} years experience",
                    record.parsed_data.skills.len(),
                    record.parsed_data.experience_years
                );
                if !record.parsed_data.organizations.is_empty() {
                    let organizations = record.parsed_data.organizations.join(", ");
                    println!("  • Organizations: {}", organizations);
                }
            }
        }

        Commands::List => {
            let resumes = store.list_resumes();
            if resumes.is_empty() {
                println!("💡 No resumes uploaded yet. Get started with:");
                println!("   resume-matcher upload <FILE>");
                return Ok(());
            }
            println!("📚 {} resume(s)\n", resumes.len());
            for resume in resumes {
                println!(
                    "  • {} {} (uploaded {}, {} years)",
                    resume.id,
                    resume.name,
                    resume.upload_date.format("%Y-%m-%d %H:%M"),
                    resume.parsed_data.experience_years
                );
            }
        }

        Commands::Show { id } => {
            let resume = store.get_resume(&id)?;
            println!("📋 {} ({})\n", resume.name, resume.id);
            println!("Uploaded: {}", resume.upload_date.format("%Y-%m-%d %H:%M:%S UTC"));
            println!("File: {}", resume.file_path.display());
            println!("Text length: {} characters", resume.content.len());
            println!("Experience: {} years", resume.parsed_data.experience_years);
            println!("Organizations: {}", resume.parsed_data.organizations.join(", "));
            let skills: Vec<&str> = resume.parsed_data.skills.iter().map(String::as_str).collect();
            println!("Skills ({}): {}", skills.len(), skills.join(", "));
        }

        Commands::Delete { id } => {
            let record = service.delete_resume(&mut store, &id)?;
            println!("🗑️  Deleted {} ({})", record.name, record.id);
        }

        Commands::Analyze {
            title,
            description,
            skills,
            experience,
            education,
            company,
            output,
            save,
        } => {
            let output_format = match output {
                Some(format) => {
                    cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?
                }
                None => config.output.format,
            };

            let job = JobRequirement {
                job_title: title,
                job_description: description,
                required_skills: skills,
                experience,
                education,
                company,
            };
            info!("Analyzing stored resumes for '{}'", job.job_title);

            let total = store.list_resumes().len() as u64;
            let progress = if output_format == OutputFormat::Console && total > 1 {
                let bar = ProgressBar::new(total);
                let template = "{bar:40.cyan/blue} {pos}/{len} {msg}";
                if let Ok(style) = ProgressStyle::with_template(template) {
                    bar.set_style(style);
                }
                Some(bar)
            } else {
                None
            };

            let results = service.analyze_stored(&mut store, &job, |_| {
                if let Some(bar) = &progress {
                    bar.inc(1);
                }
            })?;
            if let Some(bar) = progress {
                bar.finish_and_clear();
            }

            let names: HashMap<&str, &str> = store
                .list_resumes()
                .iter()
                .map(|r| (r.id.as_str(), r.name.as_str()))
                .collect();
            let entries: Vec<ReportEntry> = results
                .into_iter()
                .map(|result| ReportEntry {
                    resume_name: names.get(result.resume_id.as_str()).unwrap_or(&"").to_string(),
                    result,
                })
                .collect();

            let report =
                formatter::formatter_for(output_format, &config.output).format_report(&entries)?;
            println!("{}", report);

            if let Some(path) = save {
                formatter::save_report_to_file(&report, &path)?;
                println!("💾 Report saved to {}", path.display());
            }
        }

        Commands::History { id } => {
            let resume = store.get_resume(&id)?;
            let analyses = store.analyses_for(&id);
            if analyses.is_empty() {
                println!("💡 No analyses stored for {}", resume.name);
                return Ok(());
            }
            println!("📈 {} analyses for {}\n", analyses.len(), resume.name);
            for analysis in analyses {
                println!(
                    "  • {} {:.1}% {}",
                    analysis.analysis_date.format("%Y-%m-%d %H:%M"),
                    analysis.overall_score,
                    analysis.job_title
                );
            }
        }

        Commands::Skills { skill } => match skill {
            Some(skill) => {
                let ids = service.indices().skills.resumes_with(&skill);
                println!("🔤 {} resume(s) with '{}'", ids.len(), skill);
                for id in ids {
                    let name = store.get_resume(&id).map(|r| r.name.clone()).unwrap_or_default();
                    println!("  • {} {}", id, name);
                }
            }
            None => {
                for (skill, count) in service.indices().skills.skill_counts() {
                    println!("  • {} ({})", skill, count);
                }
            }
        },

        Commands::Titles => {
            let titles = service.indices().job_titles.titles();
            if titles.is_empty() {
                println!("💡 No job titles analysed yet");
            }
            for title in titles {
                println!("  • {}", title);
            }
        }

        Commands::Config { action } => run_config(action, config, config_path)?,
    }

    Ok(())
}

fn run_config(action: Option<ConfigAction>, config: &Config, config_path: &Path) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            println!("⚙️  Current Configuration\n");
            println!("Data Directory: {}", config.storage.data_dir.display());
            println!("Uploads Directory: {}", config.storage.uploads_dir.display());
            println!("Extraction Timeout: {}s", config.extraction.timeout_secs);
            println!("Output Format: {:?}", config.output.format);
            println!("Colored Output: {}", config.output.color_output);
            println!("Detailed Output: {}", config.output.detailed);
        }

        Some(ConfigAction::Reset) => {
            println!("🔄 Resetting configuration to defaults...");
            Config::default().save_to(config_path)?;
            println!("✅ Configuration reset successfully!");
        }

        Some(ConfigAction::Path) => {
            println!("{}", config_path.display());
        }
    }
    Ok(())
}
