//! versync - Package version sync CLI tool
//!
//! Syncs the package.json version into the Android and iOS projects of a Capacitor app.

use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use std::process::ExitCode;
use versync::cli::CliArgs;
use versync::domain::Platform;
use versync::orchestrator::Orchestrator;
use versync::output::{create_formatter, OutputConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.android_allow_prerelease {
        eprintln!(
            "{} --android-allow-prerelease is ignored: prerelease identifiers never take part in the version code",
            "warning:".yellow().bold()
        );
    }

    let orchestrator = Orchestrator::from_cli(&args);
    let raw_version = orchestrator.resolve_version()?;

    // Print run info in verbose mode
    if args.verbose {
        eprintln!("versync v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.path.display());
        match &args.set_version {
            Some(_) => eprintln!("Version: {} (--set-version)", raw_version),
            None => eprintln!("Version: {} (package.json)", raw_version),
        }
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
        for platform in orchestrator.options().platforms.platforms() {
            eprintln!("{} files:", platform);
            for target in orchestrator.targets(platform) {
                eprintln!("  {} {}", target.kind, target.path.display());
            }
        }
        eprintln!(
            "iOS build number: {:?}",
            orchestrator.options().build_number
        );
    }

    let report = orchestrator.sync(&raw_version).await?;

    if report.version.is_prerelease() && !args.quiet {
        eprintln!(
            "{} prerelease and build metadata of {} are not synced; native versions use {}",
            "note:".cyan().bold(),
            report.version,
            report.version.release_string()
        );
    }
    if !args.quiet {
        for platform in report.platforms.iter().filter(|p| p.is_skipped()) {
            eprintln!(
                "{} {} project not found, skipped",
                "warning:".yellow().bold(),
                platform.platform
            );
            if platform.platform == Platform::Ios && !args.plist.is_empty() {
                eprintln!("  --plist files were not updated");
            }
        }
    }

    // Create output formatter based on CLI options
    let output_config =
        OutputConfig::from_cli(args.json, args.diff, args.verbose, args.quiet, args.dry_run)
            .with_color(!args.no_color);
    let formatter = create_formatter(output_config);

    // Output results
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    // Print errors in verbose mode
    if args.verbose && report.has_failures() {
        eprintln!();
        eprintln!("Errors encountered:");
        for message in report.error_messages() {
            eprintln!("  - {}", message);
        }
    }

    if report.has_failures() {
        // Partial success - some platform or file failed
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
