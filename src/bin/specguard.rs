//! SpecGuard CLI
//!
//! Detects breaking changes between two API schema documents, lints a
//! document against design rules, and scores its consistency.
//!
//! Usage:
//!   specguard diff old.yaml new.yaml --output github
//!   specguard lint openapi.yaml
//!   specguard score openapi.yaml

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use specguard::finding::Severity;
use specguard::score::score_findings;
use specguard::{
    has_breaking, lint, lint_specs, renderer_for, Document, EngineRegistry, Finding,
    OutputFormat, ReportKind, ScoreBand, SpecGuardConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "specguard")]
#[command(about = "Shield API schema breaking changes & enforce design rules")]
struct Cli {
    /// Config file layered over specguard.toml and SPECGUARD__* variables
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect breaking changes between two API specs
    Diff {
        /// Old spec path
        old: PathBuf,
        /// New spec path
        new: PathBuf,
        /// Output format (table, rows, json, github, markdown, auto)
        #[arg(short, long)]
        output: Option<OutputFormat>,
        /// Exit 1 on breaking changes
        #[arg(long, conflicts_with = "no_block")]
        block: bool,
        /// Report breaking changes without failing
        #[arg(long)]
        no_block: bool,
    },

    /// Enforce API design rules on a spec file or a directory of specs
    Lint {
        /// Spec path
        spec_path: PathBuf,
        /// Output format (table, rows, json, github, markdown, auto)
        #[arg(short, long)]
        output: Option<OutputFormat>,
    },

    /// Calculate API design consistency score (0-100)
    Score {
        /// Spec path
        spec_path: PathBuf,
    },

    /// Inspect or create configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write a default configuration file
    Init {
        #[arg(default_value = "specguard.toml")]
        path: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = SpecGuardConfig::load_from(cli.config.as_deref())
        .context("loading configuration")?;

    match cli.command {
        Commands::Diff {
            old,
            new,
            output,
            block,
            no_block,
        } => {
            let block = if no_block {
                false
            } else {
                block || config.diff.block_on_breaking
            };
            let format = output.unwrap_or(config.output.format);
            run_diff(&old, &new, format, block)
        }

        Commands::Lint { spec_path, output } => {
            let format = output.unwrap_or(config.output.format);
            run_lint(&spec_path, format, config.lint.fail_on_error)
        }

        Commands::Score { spec_path } => run_score(&spec_path, config.score.min_score),

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("{}", config.to_toml()?);
                Ok(ExitCode::SUCCESS)
            }
            ConfigAction::Init { path, force } => {
                if Path::new(&path).exists() && !force {
                    bail!("{} already exists (use --force to overwrite)", path);
                }
                SpecGuardConfig::default()
                    .save(&path)
                    .with_context(|| format!("writing {}", path))?;
                println!("✅ Wrote {}", path);
                Ok(ExitCode::SUCCESS)
            }
        },
    }
}

fn run_diff(old: &Path, new: &Path, format: OutputFormat, block: bool) -> anyhow::Result<ExitCode> {
    let changes = EngineRegistry::default().diff_files(old, new)?;
    println!("{}", renderer_for(format, ReportKind::Diff).render(&changes));

    if block && has_breaking(&changes) {
        eprintln!("\nBLOCKED: breaking changes detected");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_lint(
    spec_path: &Path,
    format: OutputFormat,
    fail_on_error: bool,
) -> anyhow::Result<ExitCode> {
    let renderer = renderer_for(format, ReportKind::Lint);

    if !spec_path.is_dir() {
        let doc = Document::from_path(spec_path)?;
        let issues = lint(&doc);
        println!("{}", renderer.render(&issues));
        return Ok(lint_exit_code(&issues, fail_on_error));
    }

    info!(dir = %spec_path.display(), "linting directory");
    let results = lint_specs(spec_path);
    if results.is_empty() {
        println!("{}", renderer.render(&[]));
    }

    let mut load_failures = 0;
    let mut all_issues = Vec::new();
    for (path, outcome) in results {
        println!("📄 {}", path.display());
        match outcome {
            Ok(issues) => {
                println!("{}", renderer.render(&issues));
                all_issues.extend(issues);
            }
            Err(e) => {
                eprintln!("❌ Error: {}", e);
                load_failures += 1;
            }
        }
    }

    if load_failures > 0 {
        eprintln!("\n{} document(s) could not be loaded", load_failures);
        return Ok(ExitCode::FAILURE);
    }
    Ok(lint_exit_code(&all_issues, fail_on_error))
}

fn lint_exit_code(issues: &[Finding], fail_on_error: bool) -> ExitCode {
    let has_errors = issues.iter().any(|issue| issue.severity == Severity::Error);
    if fail_on_error && has_errors {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_score(spec_path: &Path, min_score: u32) -> anyhow::Result<ExitCode> {
    let doc = Document::from_path(spec_path)?;
    let score = score_findings(&lint(&doc));
    println!("API Design Score: {}/100 ({})", score, ScoreBand::of(score));

    if score < min_score {
        eprintln!("Score {} is below the minimum of {}", score, min_score);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
