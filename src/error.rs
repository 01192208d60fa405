//! Error types for the query runner and its configuration layer.

use rusqlite::ffi;
use std::path::PathBuf;
use thiserror::Error;

/// Error returned by every runner operation.
///
/// Both kinds leave the connection usable; the caller always regains control.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The script or query source could not be read.
    #[error("source unavailable: {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine rejected a statement (constraint violation, type mismatch, syntax error).
    #[error("database error: {message}")]
    Database {
        /// The engine's message, unmodified.
        message: String,
        /// Which constraint fired, when the engine reported a constraint violation.
        constraint: Option<ConstraintKind>,
    },
}

impl ExecutionError {
    /// Returns the message without the error-kind prefix.
    pub fn message(&self) -> String {
        match self {
            Self::SourceUnavailable { path, source } => format!("{}: {source}", path.display()),
            Self::Database { message, .. } => message.clone(),
        }
    }

    /// Returns the violated constraint for database errors.
    pub fn constraint(&self) -> Option<ConstraintKind> {
        match self {
            Self::Database { constraint, .. } => *constraint,
            Self::SourceUnavailable { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for ExecutionError {
    fn from(err: rusqlite::Error) -> Self {
        let constraint = match &err {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Some(ConstraintKind::from_extended_code(failure.extended_code))
            }
            _ => None,
        };
        Self::Database {
            message: err.to_string(),
            constraint,
        }
    }
}

/// Constraint families SQLite distinguishes through extended result codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    Check,
    ForeignKey,
    NotNull,
    Other,
}

impl ConstraintKind {
    fn from_extended_code(code: i32) -> Self {
        match code {
            ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Self::PrimaryKey,
            ffi::SQLITE_CONSTRAINT_UNIQUE => Self::Unique,
            ffi::SQLITE_CONSTRAINT_CHECK => Self::Check,
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Self::ForeignKey,
            ffi::SQLITE_CONSTRAINT_NOTNULL => Self::NotNull,
            _ => Self::Other,
        }
    }
}

/// Errors raised while loading a [`crate::RunnerConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
