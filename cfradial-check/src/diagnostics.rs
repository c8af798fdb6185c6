//! Conformance diagnostics.
//!
//! Every check reports into a [`Diagnostics`] sink instead of printing. The
//! caller decides how the collected events are rendered.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// A conformance violation.
    Error,
    /// Informational: a missing optional item (verbose runs only), or a
    /// value check that could not run.
    Note,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Error => "ERROR",
            DiagnosticKind::Note => "NOTE",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    MissingRequired,
    MissingOptional,
    TypeMismatch,
    ShapeMismatch,
    ValueMismatch,
    UnitsMismatch,
    EnumViolation,
    FormatViolation,
    CrossReferenceViolation,
    StructuralViolation,
    /// The values needed by a check were not present in the input.
    Unchecked,
}

/// One reported event, keyed by the clause of the standard it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub category: Category,
    pub section: String,
    pub message: String,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ({}) {}", self.kind, self.section, self.message)
    }
}

/// Ordered collector for diagnostics emitted during one run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    verbose: bool,
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            events: Vec::new(),
        }
    }

    pub fn error(&mut self, section: &str, category: Category, message: impl Into<String>) {
        self.events.push(Diagnostic {
            kind: DiagnosticKind::Error,
            category,
            section: section.to_string(),
            message: message.into(),
        });
    }

    /// Record a missing optional item. Dropped unless the run is verbose.
    pub fn note(&mut self, section: &str, message: impl Into<String>) {
        if !self.verbose {
            return;
        }
        self.events.push(Diagnostic {
            kind: DiagnosticKind::Note,
            category: Category::MissingOptional,
            section: section.to_string(),
            message: message.into(),
        });
    }

    /// Record a value check that was skipped. Kept in every run.
    pub fn unchecked(&mut self, section: &str, message: impl Into<String>) {
        self.events.push(Diagnostic {
            kind: DiagnosticKind::Note,
            category: Category::Unchecked,
            section: section.to_string(),
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    pub fn error_count(&self) -> usize {
        self.events.iter().filter(|d| d.is_error()).count()
    }

    pub fn note_count(&self) -> usize {
        self.events.len() - self.error_count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.events
    }
}
