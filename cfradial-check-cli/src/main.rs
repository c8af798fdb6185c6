//! cfradial-check CLI - CF/Radial 1.2 conformance checking from the command line.

use cfradial_check::{CfRadialCore, CheckOptions, CheckReport, Diagnostic, DiagnosticKind, SECTIONS};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

const EXIT_CONFORMS: i32 = 0;
const EXIT_VIOLATIONS: i32 = 1;
const EXIT_LOAD_FAILURE: i32 = 2;

#[derive(Parser)]
#[command(name = "cfradial-check")]
#[command(
    about = "CF/Radial 1.2 conformance checker for radar and lidar datasets",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Dataset to check: netCDF (with the `netcdf` feature), CDL or JSON
    #[arg(value_name = "FILE", required_unless_present = "list_sections")]
    file: Option<PathBuf>,

    /// Also report missing optional items as NOTEs
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// List the checked clauses of the standard and exit
    #[arg(long)]
    list_sections: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One line per diagnostic
    Human,
    /// JSON report for CI/CD
    Json,
    /// GitHub Actions annotations
    Github,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // clap only leaves FILE empty when --list-sections was given
    let exit_code = match cli.file {
        Some(file) if !cli.list_sections => handle_check(file, cli.verbose, &cli.format),
        _ => {
            handle_list_sections();
            EXIT_CONFORMS
        }
    };

    process::exit(exit_code);
}

fn handle_check(file: PathBuf, verbose: bool, format: &OutputFormat) -> i32 {
    let options = CheckOptions { verbose };
    tracing::debug!("Checking {} (verbose: {})", file.display(), verbose);

    let report = match CfRadialCore::check_file(&file, options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_LOAD_FAILURE;
        }
    };

    match format {
        OutputFormat::Human => output_human(&report),
        OutputFormat::Json => {
            if let Err(e) = output_json(&report) {
                eprintln!("Error: {}", e);
                return EXIT_LOAD_FAILURE;
            }
        }
        OutputFormat::Github => output_github(&report),
    }

    if report.has_errors() {
        EXIT_VIOLATIONS
    } else {
        EXIT_CONFORMS
    }
}

fn output_human(report: &CheckReport) {
    for diagnostic in &report.diagnostics {
        println!("{}", diagnostic);
    }
}

fn output_json(report: &CheckReport) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn kind_to_github(diagnostic: &Diagnostic) -> &'static str {
    match diagnostic.kind {
        DiagnosticKind::Error => "error",
        DiagnosticKind::Note => "notice",
    }
}

fn output_github(report: &CheckReport) {
    for diagnostic in &report.diagnostics {
        println!(
            "::{} file={},title=CF/Radial {}::{}",
            kind_to_github(diagnostic),
            report.file.display(),
            diagnostic.section,
            diagnostic.message.replace('\n', " ")
        );
    }
}

fn handle_list_sections() {
    println!("Checked clauses of CF/Radial 1.2:\n");
    for section in SECTIONS {
        println!("  {:<6} {}", section.id, section.title);
    }
}
