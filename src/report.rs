//! Progress and outcome reporting.
//!
//! The runner emits an [`Event`] before and after every operation. Where the events go
//! is up to the [`Reporter`] the caller injects.

use std::fmt;

/// A progress or outcome notification emitted by the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A script is about to be executed.
    ScriptStarted { name: String },
    /// Every statement of the script was applied.
    ScriptSucceeded { name: String },
    /// A statement of the script failed; later statements were not run.
    ScriptFailed { name: String, message: String },
    /// A query produced a result set with this many rows.
    RowsReturned { count: usize },
    /// A statement completed without producing a result set.
    NoResultSet,
    /// A query was rejected by the engine or its source could not be read.
    QueryFailed { message: String },
}

impl Event {
    /// Returns true for failure notifications.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ScriptFailed { .. } | Self::QueryFailed { .. })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScriptStarted { name } => write!(f, "Executing {name}..."),
            Self::ScriptSucceeded { name } => write!(f, "{name} executed successfully"),
            Self::ScriptFailed { name, message } => {
                write!(f, "Error executing {name}: {message}")
            }
            Self::RowsReturned { count: 1 } => write!(f, "Query returned 1 row"),
            Self::RowsReturned { count } => write!(f, "Query returned {count} rows"),
            Self::NoResultSet => write!(f, "Query executed successfully. No results to display."),
            Self::QueryFailed { message } => write!(f, "Query failed: {message}"),
        }
    }
}

/// Sink for runner notifications.
pub trait Reporter {
    fn report(&mut self, event: Event);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, event: Event) {
        (**self).report(event)
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&mut self, event: Event) {
        (**self).report(event)
    }
}

/// Forwards notifications to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, event: Event) {
        if event.is_failure() {
            tracing::warn!("{event}");
        } else {
            tracing::info!("{event}");
        }
    }
}

/// Prints notifications to the terminal: failures to stderr, everything else to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: Event) {
        if event.is_failure() {
            eprintln!("{event}");
        } else {
            println!("{event}");
        }
    }
}

/// Keeps every notification in order.
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    events: Vec<Event>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The rendered text of every notification.
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Reporter for MemoryReporter {
    fn report(&mut self, event: Event) {
        self.events.push(event);
    }
}
