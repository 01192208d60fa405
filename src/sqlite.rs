use crate::config::RunnerConfig;
use crate::error::ExecutionError;
use crate::report::{Event, Reporter};
use crate::source::ScriptSource;
use rusqlite::types::ValueRef;
use rusqlite::{Batch, Connection};
use std::fmt;
use tracing::{debug, info, instrument};

/// Scalar value as returned by SQLite, with its storage class preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Real(v) => Value::Real(v),
            ValueRef::Text(text) => Value::Text(String::from_utf8_lossy(text).into_owned()),
            ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Display form used by the presentation layer only.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
            Value::Blob(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

/// One row of a result set, aligned positionally with the column names.
pub type Row = Vec<Value>;

/// Columns and eagerly fetched rows of one executed query.
///
/// Every row has exactly as many values as there are columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ResultSet {
    /// Returns `None` if any row's width differs from the number of columns.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Option<Self> {
        if rows.iter().any(|row| row.len() != columns.len()) {
            return None;
        }
        Some(Self { columns, rows })
    }

    /// Column names in the order the engine reported them.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column with this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Every value of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }
}

/// Outcome of a single statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// The statement mutated data or schema and produced no result set.
    NoResultSet,
    /// The statement produced a result set, possibly with zero rows.
    Rows(ResultSet),
}

impl QueryResult {
    pub fn is_result_set(&self) -> bool {
        matches!(self, QueryResult::Rows(_))
    }

    pub fn result_set(&self) -> Option<&ResultSet> {
        match self {
            QueryResult::Rows(set) => Some(set),
            QueryResult::NoResultSet => None,
        }
    }

    pub fn into_result_set(self) -> Option<ResultSet> {
        match self {
            QueryResult::Rows(set) => Some(set),
            QueryResult::NoResultSet => None,
        }
    }
}

/// Executes scripts and single queries over one owned SQLite connection.
///
/// Every call runs to completion before returning. `&mut self` receivers keep a runner
/// from executing two statements at once; hosts that share one across threads must wrap
/// it in a mutex.
pub struct QueryRunner<R> {
    conn: Connection,
    reporter: R,
}

impl<R: Reporter> QueryRunner<R> {
    /// Opens the configured database, enables foreign keys if requested and runs the
    /// bootstrap scripts in order.
    pub fn open(config: &RunnerConfig, reporter: R) -> Result<Self, ExecutionError> {
        info!(database = %config.database, "opening sqlite database");
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(&config.database)?
        };
        if config.foreign_keys {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        }

        let mut runner = Self::from_connection(conn, reporter);
        for script in &config.scripts {
            runner.execute_script(&ScriptSource::File(script.clone()))?;
        }
        Ok(runner)
    }

    /// Opens a fresh in-memory database with foreign keys enforced.
    pub fn open_in_memory(reporter: R) -> Result<Self, ExecutionError> {
        Self::open(&RunnerConfig::default(), reporter)
    }

    /// Wraps a connection the caller has already set up.
    pub fn from_connection(conn: Connection, reporter: R) -> Self {
        Self { conn, reporter }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    /// Executes every statement of the script in source order.
    ///
    /// The first failing statement aborts the rest. Statements applied before it stay
    /// applied: the batch is not wrapped in a transaction.
    #[instrument(skip_all, fields(source = %source.name()))]
    pub fn execute_script(&mut self, source: &ScriptSource) -> Result<(), ExecutionError> {
        let name = source.name();
        self.reporter.report(Event::ScriptStarted { name: name.clone() });

        let outcome = match source.load() {
            Ok(text) => {
                debug!(bytes = text.len(), "executing batch");
                self.conn.execute_batch(&text).map_err(ExecutionError::from)
            }
            Err(err) => Err(err),
        };

        match &outcome {
            Ok(()) => {
                info!("script applied");
                self.reporter.report(Event::ScriptSucceeded { name });
            }
            Err(err) => {
                info!(error = %err, "script aborted");
                self.reporter.report(Event::ScriptFailed {
                    name,
                    message: err.message(),
                });
            }
        }
        outcome
    }

    /// Executes one statement and fetches its result set eagerly, if it has one.
    ///
    /// Text holding more than one statement is rejected without running any of it; use
    /// [`Self::execute_script`] for batches. Blank or comment-only text has no result set.
    pub fn execute_query(&mut self, sql: &str) -> Result<QueryResult, ExecutionError> {
        let outcome = self.run_statement(sql);
        let event = match &outcome {
            Ok(QueryResult::Rows(set)) => Event::RowsReturned {
                count: set.row_count(),
            },
            Ok(QueryResult::NoResultSet) => Event::NoResultSet,
            Err(err) => {
                info!(error = %err, "query rejected");
                Event::QueryFailed {
                    message: err.message(),
                }
            }
        };
        self.reporter.report(event);
        outcome
    }

    /// Loads a single statement from `source` and runs it like [`Self::execute_query`].
    pub fn execute_query_from_source(
        &mut self,
        source: &ScriptSource,
    ) -> Result<QueryResult, ExecutionError> {
        match source.load() {
            Ok(text) => self.execute_query(&text),
            Err(err) => {
                self.reporter.report(Event::QueryFailed {
                    message: err.message(),
                });
                Err(err)
            }
        }
    }

    /// Closes the connection, surfacing any error the engine reports on close.
    pub fn close(self) -> Result<(), ExecutionError> {
        self.conn.close().map_err(|(_, err)| ExecutionError::from(err))
    }

    fn run_statement(&self, sql: &str) -> Result<QueryResult, ExecutionError> {
        let mut batch = Batch::new(&self.conn, sql);
        // Empty and comment-only text prepares to no statement at all.
        let Some(mut stmt) = batch.next()? else {
            return Ok(QueryResult::NoResultSet);
        };
        // Anything after the first statement is rejected before the first one runs.
        if !matches!(batch.next(), Ok(None)) {
            return Err(rusqlite::Error::MultipleStatement.into());
        }
        debug!(sql, "executing statement");

        let width = stmt.column_count();
        if width == 0 {
            let changed = stmt.execute([])?;
            debug!(changed, "statement applied");
            return Ok(QueryResult::NoResultSet);
        }

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let values = (0..width)
                .map(|index| row.get_ref(index).map(Value::from))
                .collect::<rusqlite::Result<Row>>()?;
            rows.push(values);
        }
        Ok(QueryResult::Rows(ResultSet { columns, rows }))
    }
}
