//! Batch diagnostics.
//!
//! Passes never propagate domain-level problems as `Err` across pass
//! boundaries: they report into the [`ErrorManager`] and locally decide how
//! far to prune (typically by returning `false` from the triggering
//! `enter_*`). Traversal of siblings and later passes continues; overall
//! success is `!has_errors()` after all passes complete. Pipeline-ordering
//! bugs are not diagnostics and panic instead.

use serde::Serialize;
use thiserror::Error;

use crate::ast::Span;

/// User-facing problems a pass can report against the stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StylesheetError {
    #[error("ruleset has an empty selector list")]
    EmptySelectorList,
    #[error("declaration `{property}` has no values")]
    EmptyDeclaration { property: String },
    #[error("reference to undefined constant `{name}`")]
    UndefinedConstant { name: String },
    #[error("invalid value for `{property}`: {detail}")]
    InvalidValue { property: String, detail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One reported problem, rendered for the report.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// Accumulating diagnostics sink shared by all passes in a run.
#[derive(Debug, Default)]
pub struct ErrorManager {
    diagnostics: Vec<Diagnostic>,
}

impl ErrorManager {
    pub fn new() -> Self {
        ErrorManager::default()
    }

    pub fn report(&mut self, error: StylesheetError, span: Option<Span>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            message: error.to_string(),
            span,
        });
    }

    pub fn report_warning(&mut self, warning: StylesheetError, span: Option<Span>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            message: warning.to_string(),
            span,
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Machine-readable report of everything accumulated so far.
    pub fn generate_report(&self) -> String {
        serde_json::to_string_pretty(&self.diagnostics)
            .expect("diagnostics are always serializable")
    }
}
