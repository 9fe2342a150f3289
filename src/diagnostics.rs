//! Internal failure reporting.
//!
//! Loading and persisting never fail from the caller's point of view. What
//! went wrong is handed to a [`DiagnosticSink`] instead. The default sink,
//! [`TracingSink`], turns each event into a `tracing` record; plug in your own
//! (any `Fn(&Diagnostic)` works) to collect, count, or escalate them.

use crate::error::Error;
use std::fmt;
use std::path::PathBuf;

/// A failure the store absorbed instead of returning.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The data file was missing or unreadable at construction. The store
    /// started empty.
    ReadFailure {
        /// Data file path.
        path: PathBuf,
        /// Underlying error.
        error: Error,
    },
    /// The data file could not be fully decoded. `kept` records before the
    /// bad element survived; the rest were dropped.
    ParseFailure {
        /// Data file path.
        path: PathBuf,
        /// Number of records loaded before decoding stopped.
        kept: usize,
        /// Underlying error.
        error: Error,
    },
    /// Persisting after a modification failed. Memory is now ahead of disk.
    WriteFailure {
        /// Data file path.
        path: PathBuf,
        /// Underlying error.
        error: Error,
    },
}

impl Diagnostic {
    /// The error carried by this event.
    #[must_use]
    pub fn error(&self) -> &Error {
        match self {
            Diagnostic::ReadFailure { error, .. }
            | Diagnostic::ParseFailure { error, .. }
            | Diagnostic::WriteFailure { error, .. } => error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ReadFailure { path, error } => {
                write!(f, "could not read {}: {error}", path.display())
            }
            Diagnostic::ParseFailure { path, kept, error } => write!(
                f,
                "could not parse {} (kept {kept} records): {error}",
                path.display()
            ),
            Diagnostic::WriteFailure { path, error } => {
                write!(f, "could not write {}: {error}", path.display())
            }
        }
    }
}

/// Receives every failure the store swallows.
pub trait DiagnosticSink: Send + Sync {
    /// Called once per absorbed failure, on the thread that hit it.
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Default sink: logs through `tracing`.
///
/// Read and parse failures are `WARN` (startup degrades to what could be
/// loaded), write failures are `ERROR` (data may be lost).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::ReadFailure { path, error } => {
                tracing::warn!(
                    path = %path.display(),
                    error = %error,
                    "customer data unreadable, starting empty"
                );
            }
            Diagnostic::ParseFailure { path, kept, error } => {
                tracing::warn!(
                    path = %path.display(),
                    kept = *kept,
                    error = %error,
                    "customer data malformed, later records dropped"
                );
            }
            Diagnostic::WriteFailure { path, error } => {
                tracing::error!(
                    path = %path.display(),
                    error = %error,
                    "failed to persist customer data"
                );
            }
        }
    }
}
