//! Simple check example: check a CF/Radial dataset and print the diagnostics.

use cfradial_check::prelude::*;
use std::path::Path;

fn main() -> Result<(), CheckError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/compliant_fixed.cdl".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example simple_check [path/to/file.cdl]");
        std::process::exit(1);
    }

    let report = CfRadialCore::check_file(path, CheckOptions { verbose: true })?;

    println!("Conformance results for: {}", report.file.display());
    println!(
        "{} errors, {} notes",
        report.stats.errors, report.stats.notes
    );
    println!();

    for diagnostic in &report.diagnostics {
        println!("  {}", diagnostic);
    }

    if report.has_errors() {
        println!("\nFile does not conform to CF/Radial 1.2.");
        std::process::exit(1);
    }

    println!("\nFile conforms to CF/Radial 1.2.");
    Ok(())
}
