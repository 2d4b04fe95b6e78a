use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::setup::{configure_thread_pool, get_worker_count};
use crate::config::{load_config, CONFIG_FILE_NAME};
use crate::orchestrator::{run_projects, RunReport};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub no_parallel: bool,
    pub jobs: Option<usize>,
    pub json: bool,
}

pub fn handle_run_command(options: RunOptions) -> Result<()> {
    let mut config = load_config(options.config.as_deref())?;
    if options.dry_run {
        config.run.dry_run = true;
    }
    if options.no_parallel {
        config.run.parallel = false;
    }
    if let Some(jobs) = options.jobs {
        config.run.jobs = jobs;
    }

    configure_thread_pool(config.run.jobs);
    tracing::info!(
        projects = config.projects.len(),
        workers = get_worker_count(config.run.jobs),
        parallel = config.run.parallel,
        "starting run"
    );

    let reports = run_projects(&config)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print!("{}", format_summary(&reports, config.run.dry_run));
    }

    let failed: usize = reports.iter().map(|r| r.failed_partitions.len()).sum();
    if failed > 0 {
        anyhow::bail!("{} partition(s) could not be committed", failed);
    }
    Ok(())
}

pub fn format_summary(reports: &[RunReport], dry_run: bool) -> String {
    let verb = if dry_run { "would fix" } else { "fixed" };
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!(
            "{}: {} {}, {} skipped (no documentation), {} ambiguous, {} artifacts migrated\n",
            report.project,
            verb,
            report.fixed,
            report.skipped_unresolved,
            report.ambiguous,
            report.migrated_artifacts
        ));
        for failure in &report.failed_partitions {
            out.push_str(&format!("  {} edits failed: {}\n", failure.kind, failure.message));
        }
    }
    out
}

const DEFAULT_CONFIG: &str = r#"# docref configuration

# Legacy documentation store, shared by all projects
legacy_docs_root = "docs/legacy"

# Artifact file extension and directory layout ("nested" or "flat")
artifact_extension = "xml"
layout = "nested"

[[projects]]
name = "example"
root = "src/Example"
# JSON declaration feed produced by the source front end
declarations = "obj/declarations.json"
docs_root = "docs/Example"
legacy_namespace = "Example.Legacy"
current_namespace = "Example"

[run]
parallel = true
jobs = 0
dry_run = false
"#;

pub fn handle_init_command(force: bool) -> Result<()> {
    init_config_at(Path::new(CONFIG_FILE_NAME), force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

pub fn init_config_at(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }
    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}
