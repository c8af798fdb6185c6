//! Core checking API shared by the CLI and library callers.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::checker::check_cfradial_compliance;
use crate::dataset::{load_dataset, Dataset, LoadError};
use crate::diagnostics::{Diagnostic, DiagnosticKind};

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("{0}")]
    Load(#[from] LoadError),
}

/// Options for a conformance run.
#[derive(Clone, Debug, Default)]
pub struct CheckOptions {
    /// Report NOTEs for missing optional items.
    pub verbose: bool,
}

/// Per-file result with diagnostics and counts.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub file: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: CheckStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CheckStats {
    pub errors: usize,
    pub notes: usize,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        self.stats.errors > 0
    }

    pub fn total(&self) -> usize {
        self.stats.errors + self.stats.notes
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }
}

fn diagnostics_to_stats(diagnostics: &[Diagnostic]) -> CheckStats {
    let mut stats = CheckStats::default();
    for d in diagnostics {
        match d.kind {
            DiagnosticKind::Error => stats.errors += 1,
            DiagnosticKind::Note => stats.notes += 1,
        }
    }
    stats
}

/// Core checking API.
pub struct CfRadialCore;

impl CfRadialCore {
    /// Load a CDL or JSON dataset file and check it.
    pub fn check_file(path: &Path, options: CheckOptions) -> Result<CheckReport, CheckError> {
        let dataset = load_dataset(path)?;
        Ok(Self::check_dataset(path, &dataset, options))
    }

    /// Check an already opened dataset. `path` only labels the report.
    pub fn check_dataset(path: &Path, dataset: &Dataset, options: CheckOptions) -> CheckReport {
        let diagnostics = check_cfradial_compliance(dataset, options.verbose);
        let stats = diagnostics_to_stats(&diagnostics);
        CheckReport {
            file: path.to_path_buf(),
            diagnostics,
            stats,
        }
    }
}
