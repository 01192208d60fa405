//! SQLite query runner for data-governance scripts.
//!
//! # Intention
//!
//! - Execute SQL scripts and single queries against one owned SQLite connection.
//! - Return results with the engine's native typing and let the engine's constraint
//!   checker be the only judge of what data is valid.
//! - Report progress and outcomes to an injected [`report::Reporter`].
//!
//! # Architectural Boundaries
//!
//! - Only SQLite/database code belongs here.
//! - Schema definitions, sample data and business queries are external SQL resources.
//! - Presentation ([`display`]) is a collaborator of the caller, never of the runner.

pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod report;
pub mod source;
pub mod sqlite;

pub use config::RunnerConfig;
pub use error::{ConfigError, ConstraintKind, ExecutionError};
pub use report::{ConsoleReporter, Event, MemoryReporter, Reporter, TracingReporter};
pub use source::ScriptSource;
pub use sqlite::{QueryResult, QueryRunner, ResultSet, Row, Value};
