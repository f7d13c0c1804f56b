//! Diagnostic sink
//!
//! Errors and warnings are reported here with the location of the
//! declaration they concern. Reporting never stops the batch.

use crate::error::{CodegenError, CodegenWarning};
use crate::model::Origin;
use indexmap::IndexMap;
use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use thiserror::Error;

/// Severity level for diagnostic messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Output is still produced
    Warning,
    /// The interface concerned produces no output
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Receives diagnostics from discovery and generation.
pub trait DiagnosticSink {
    /// The current interface failed; its processing is abandoned.
    fn error(&mut self, error: CodegenError, origin: &Origin);

    /// Informational only; output is unaffected.
    fn warn(&mut self, warning: CodegenWarning, origin: &Origin);
}

/// Either side of the taxonomy
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum FacadeDiagnostic {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Error(CodegenError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Warning(CodegenWarning),
}

impl FacadeDiagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            FacadeDiagnostic::Error(_) => Severity::Error,
            FacadeDiagnostic::Warning(_) => Severity::Warning,
        }
    }
}

/// A diagnostic together with where it was reported
#[derive(Error, Debug, Clone)]
#[error("{diagnostic}")]
pub struct LocatedDiagnostic {
    pub diagnostic: FacadeDiagnostic,
    pub origin: Origin,
}

impl LocatedDiagnostic {
    pub fn severity(&self) -> Severity {
        self.diagnostic.severity()
    }

    fn label(&self) -> &'static str {
        match self.diagnostic {
            FacadeDiagnostic::Error(_) => "declared here",
            FacadeDiagnostic::Warning(_) => "while processing this declaration",
        }
    }
}

impl Diagnostic for LocatedDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic.code()
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diagnostic.severity() {
            Severity::Warning => miette::Severity::Warning,
            Severity::Error => miette::Severity::Error,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic.help()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.diagnostic.source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        // Parse errors carry their own labels
        if let Some(labels) = self.diagnostic.labels() {
            return Some(labels);
        }
        let span: SourceSpan = self.origin.span.into();
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label().to_string()),
            span,
        ))))
    }
}

/// Diagnostic collector that accumulates every report of a run
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollector {
    /// Source text per file name, for rendering reports
    sources: IndexMap<String, String>,
    diagnostics: Vec<LocatedDiagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the text of a file so reports can show it
    pub fn add_source(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.sources.insert(name.into(), text.into());
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn diagnostics(&self) -> &[LocatedDiagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics filtered by severity
    pub fn diagnostics_by_severity(&self, severity: Severity) -> Vec<&LocatedDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == severity)
            .collect()
    }

    pub fn errors(&self) -> impl Iterator<Item = &CodegenError> {
        self.diagnostics.iter().filter_map(|d| match &d.diagnostic {
            FacadeDiagnostic::Error(error) => Some(error),
            FacadeDiagnostic::Warning(_) => None,
        })
    }

    pub fn warnings(&self) -> impl Iterator<Item = &CodegenWarning> {
        self.diagnostics.iter().filter_map(|d| match &d.diagnostic {
            FacadeDiagnostic::Warning(warning) => Some(warning),
            FacadeDiagnostic::Error(_) => None,
        })
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics_by_severity(Severity::Error).len()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics_by_severity(Severity::Warning).len()
    }

    pub fn total_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Create miette reports for all diagnostics, attaching source text
    /// where the originating file is known
    pub fn create_reports(&self) -> Vec<miette::Report> {
        self.diagnostics
            .iter()
            .map(|diagnostic| {
                let report = miette::Report::new(diagnostic.clone());
                let source = diagnostic
                    .origin
                    .source_file
                    .as_ref()
                    .and_then(|name| self.sources.get(name).map(|text| (name, text)));
                match source {
                    Some((name, text)) => {
                        report.with_source_code(NamedSource::new(name, text.clone()))
                    }
                    None => report,
                }
            })
            .collect()
    }

    /// Print all diagnostics to stderr
    pub fn print_diagnostics(&self) {
        for report in self.create_reports() {
            eprintln!("{report:?}");
        }
    }

    pub fn summary(&self) -> DiagnosticSummary {
        DiagnosticSummary {
            total: self.total_count(),
            errors: self.error_count(),
            warnings: self.warning_count(),
        }
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn error(&mut self, error: CodegenError, origin: &Origin) {
        tracing::debug!(%error, file = ?origin.source_file, "error reported");
        self.diagnostics.push(LocatedDiagnostic {
            diagnostic: FacadeDiagnostic::Error(error),
            origin: origin.clone(),
        });
    }

    fn warn(&mut self, warning: CodegenWarning, origin: &Origin) {
        tracing::debug!(%warning, file = ?origin.source_file, "warning reported");
        self.diagnostics.push(LocatedDiagnostic {
            diagnostic: FacadeDiagnostic::Warning(warning),
            origin: origin.clone(),
        });
    }
}

/// Summary of diagnostic counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticSummary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl fmt::Display for DiagnosticSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            write!(f, "No diagnostics")
        } else {
            write!(
                f,
                "{} total ({} errors, {} warnings)",
                self.total, self.errors, self.warnings
            )
        }
    }
}
