//! Recoverable diagnostics
//!
//! Pipelines never abort on an unrecognised key or category. They record a
//! [`Diagnostic`] here, log it at `warn` level, and keep going. Fatal
//! conditions are reported through [`crate::Error`] instead.

use std::fmt;

/// What kind of item was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A text-table key matched no classification rule.
    UnclassifiedKey,
    /// A text-table entry had no text in its first two content blocks.
    MissingText,
    /// Two tables disagree on a key; the note says which value was kept.
    DuplicateKey,
    /// A manual override targets a key that already has a value.
    OverrideSkipped,
    /// An actor could not be given a name from any source.
    UnresolvedName,
    /// A location entry has an unexpected number of content blocks.
    UnexpectedContents,
    /// A placement category or shrine could not be looked up.
    UnrecognizedCategory,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnclassifiedKey => "unclassified key",
            Self::MissingText => "missing text",
            Self::DuplicateKey => "duplicate key",
            Self::OverrideSkipped => "override skipped",
            Self::UnresolvedName => "unresolved name",
            Self::UnexpectedContents => "unexpected contents",
            Self::UnrecognizedCategory => "unrecognized category",
        };
        f.write_str(name)
    }
}

/// A single skipped item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub key: String,
    pub detail: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{}: {}", self.kind, self.key)
        } else {
            write!(f, "{}: {} ({})", self.kind, self.key, self.detail)
        }
    }
}

/// Collected diagnostics for one pipeline run
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped item and log it
    pub fn push(&mut self, kind: DiagnosticKind, key: impl Into<String>, detail: impl Into<String>) {
        let diagnostic = Diagnostic {
            kind,
            key: key.into(),
            detail: detail.into(),
        };
        tracing::warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Entries of one kind
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    /// Whether a diagnostic of `kind` was recorded for `key`
    pub fn contains(&self, kind: DiagnosticKind, key: &str) -> bool {
        self.of_kind(kind).any(|d| d.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
