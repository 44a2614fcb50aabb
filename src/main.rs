use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_flexver::cli::{run_workflow, select_outputs, WorkflowArgs};
use git_flexver::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-flexver",
    version,
    about = "Compute a semantic version from git history and branch rules"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = ".", help = "Path inside the repository")]
    path: PathBuf,

    #[arg(short, long, help = "Branch name to use instead of the checked-out one")]
    branch: Option<String>,

    #[arg(short, long = "output", help = "Only print the named output (repeatable)")]
    outputs: Vec<String>,

    #[arg(long, help = "Print outputs as a JSON object")]
    json: bool,

    #[arg(long, help = "Stop reading history after this many commits")]
    max_commits: Option<usize>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("git_flexver={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let workflow_args = WorkflowArgs {
        config_path: args.config,
        repo_path: args.path,
        branch: args.branch,
        max_commits: args.max_commits,
    };

    if args.verbose > 0 {
        ui::display_status(&format!(
            "Resolving version in {}",
            workflow_args.repo_path.display()
        ));
    }

    let result = match run_workflow(&workflow_args) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    for diagnostic in &result.resolution.diagnostics {
        ui::display_diagnostic(diagnostic);
    }

    if args.verbose > 0 {
        ui::display_resolution_summary(&result.resolution.version, &result.branch);
    }

    let selected = match select_outputs(&result.resolution, &args.outputs) {
        Ok(selected) => selected,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(2);
        }
    };

    ui::print_outputs(&selected, args.json, !args.outputs.is_empty())
}
