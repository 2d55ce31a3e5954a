mod criteria;
mod input;
mod logging;
mod methods;
mod model;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};
use clap::{Parser, Subcommand, ValueEnum};

use crate::criteria::{BuiltinCriteriaSource, CriteriaSource, CriteriaStore, JsonCriteriaSource};
use crate::input::{InputPaths, load_inputs};
use crate::pipeline::stage7_report::{RunMode, Stage7Input, write_reports};
use crate::pipeline::{Evaluator, run_evaluation};
use crate::report::{TOOL_NAME, build_report};

#[derive(Debug, Parser)]
#[command(name = "kira-dealgrade", version, about = "Startup investment grading engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate one candidate and write evaluation.json.
    Run(RunArgs),
}

#[derive(Debug, Clone, clap::Args)]
struct RunArgs {
    /// Candidate signal payload (JSON).
    #[arg(long)]
    signals: PathBuf,
    /// Criteria document (JSON); built-in criteria when omitted.
    #[arg(long)]
    criteria: Option<PathBuf>,
    /// Competitor validation outcome (JSON).
    #[arg(long)]
    competitors: Option<PathBuf>,
    #[arg(long)]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = RunModeArg::Standalone)]
    run_mode: RunModeArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RunModeArg {
    Standalone,
    Pipeline,
}

#[derive(Debug, Clone)]
struct RunConfig {
    inputs: InputPaths,
    out_dir: PathBuf,
    run_mode: RunMode,
}

fn main() {
    logging::init_logging();
    if let Err(err) = run() {
        crate::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let config = parse_args(&args)?;
    let out_dir = resolve_output_dir(&config.out_dir, config.run_mode);

    let source: Box<dyn CriteriaSource + Send + Sync> = match config.inputs.criteria.as_deref() {
        Some(path) => Box::new(JsonCriteriaSource::from_path(path)),
        None => Box::new(BuiltinCriteriaSource),
    };
    let store = CriteriaStore::new(source);
    let criteria = store.init();
    let defaulted = criteria
        .provenance
        .iter()
        .filter(|p| p.provenance.is_default_substitution())
        .count();
    if defaulted > 0 {
        crate::warn!("{defaulted} criteria categories fell back to built-in defaults");
    }

    let bundle = load_inputs(&config.inputs).map_err(|e| e.to_string())?;
    let evaluator = Evaluator::new(criteria);
    let outcome = run_evaluation(&evaluator, &bundle.payload, &bundle.competitors)
        .map_err(|e| e.to_string())?;
    let stats = evaluator.cache_stats();
    crate::info!(
        "stage cache: {} entries, {} hits, {} misses",
        stats.entries,
        stats.hits,
        stats.misses
    );

    let report = build_report(
        &outcome,
        evaluator.criteria(),
        &bundle.competitors,
        read_git_hash(Path::new(".")),
    );
    write_reports(
        &Stage7Input {
            report: &report,
            run_mode: config.run_mode,
        },
        &out_dir,
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

fn parse_args(args: &[String]) -> Result<RunConfig, String> {
    let cli = Cli::try_parse_from(std::iter::once(TOOL_NAME.to_string()).chain(args.iter().cloned()))
        .map_err(|e| e.to_string())?;
    let Command::Run(run) = cli.command;
    Ok(RunConfig {
        inputs: InputPaths {
            signals: run.signals,
            criteria: run.criteria,
            competitors: run.competitors,
        },
        out_dir: run.out,
        run_mode: match run.run_mode {
            RunModeArg::Standalone => RunMode::Standalone,
            RunModeArg::Pipeline => RunMode::Pipeline,
        },
    })
}

fn resolve_output_dir(base: &Path, run_mode: RunMode) -> PathBuf {
    match run_mode {
        RunMode::Standalone => base.to_path_buf(),
        RunMode::Pipeline => base.join(TOOL_NAME),
    }
}

fn read_git_hash(repo_root: &Path) -> Option<String> {
    let head = repo_root.join(".git/HEAD");
    let content = std::fs::read_to_string(head).ok()?;
    if let Some(ref_line) = content.strip_prefix("ref: ") {
        let ref_path = repo_root.join(".git").join(ref_line.trim());
        return std::fs::read_to_string(ref_path)
            .ok()
            .map(|s| s.trim().to_string());
    }
    Some(content.trim().to_string())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
