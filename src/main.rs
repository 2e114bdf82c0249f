//! deptarget - dependency upgrade target resolver CLI tool
//!
//! Reads a package.json and an offline registry snapshot, then prints the
//! declaration each dependency should move to under the chosen target.

use anyhow::Context;
use clap::Parser;
use deptarget::cli::CliArgs;
use deptarget::domain::Dependency;
use deptarget::error::AppError;
use deptarget::manifest::read_dependencies;
use deptarget::orchestrator::Orchestrator;
use deptarget::output::{create_formatter, OutputConfig};
use deptarget::registry::SnapshotRegistry;
use deptarget::update::UpgradeOptions;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            // exit code 2 is reserved for partial failures
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => e.exit(),
    };
    init_tracing(&args);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the log subscriber; logs go to stderr so stdout stays parseable
fn init_tracing(args: &CliArgs) {
    let log_level = if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Resolution options and the declared dependencies
fn load_inputs(args: &CliArgs) -> Result<(UpgradeOptions, Vec<Dependency>), AppError> {
    let options = args.build_options()?;
    let dependencies = read_dependencies(&args.path, &args.sections())?;
    Ok((options, dependencies))
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        manifest = %args.path.display(),
        target = %args.target,
        "starting"
    );

    let (options, dependencies) = load_inputs(&args)?;
    let registry = SnapshotRegistry::load(&args.registry)
        .with_context(|| format!("cannot use registry snapshot {}", args.registry.display()))?;
    debug!(packages = registry.len(), "registry snapshot loaded");

    let orchestrator = Orchestrator::new(Arc::new(registry), options);
    let report = orchestrator.run(dependencies).await;

    let mut output_config =
        OutputConfig::from_cli(args.json, args.json_all, args.verbose, args.quiet);
    if args.no_color {
        output_config = output_config.without_color();
    }
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    if report.has_errors() {
        // Partial success - some dependencies could not be resolved
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
