//! `sqlgov`: runs SQL scripts and queries against a SQLite database and prints the results.

use anyhow::{Context, Result};
use clap::Parser;
use sqlite_governance::{
    display, logging, ConsoleReporter, QueryRunner, Reporter, RunnerConfig, ScriptSource,
    TracingReporter,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "sqlgov", version, about = "Run data-governance SQL against SQLite")]
struct Cli {
    /// TOML config file (database, foreign_keys, bootstrap scripts).
    #[arg(short, long, env = "SQLGOV_CONFIG")]
    config: Option<PathBuf>,

    /// Database file; overrides the config. Defaults to an in-memory database.
    #[arg(short, long, env = "SQLGOV_DATABASE")]
    database: Option<String>,

    /// Do not enable foreign key enforcement.
    #[arg(long)]
    no_foreign_keys: bool,

    /// Script files to execute, in order.
    #[arg(short, long = "script", value_name = "FILE")]
    scripts: Vec<PathBuf>,

    /// Files holding a single query to run and display, after all scripts.
    #[arg(short, long = "query", value_name = "FILE")]
    queries: Vec<PathBuf>,

    /// Send progress messages to the log instead of the terminal; only tables go to stdout.
    #[arg(long)]
    quiet: bool,

    /// Inline SQL statements to run and display, after query files.
    #[arg(long = "sql", value_name = "SQL")]
    statements: Vec<String>,
}

impl Cli {
    fn runner_config(&self) -> Result<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => RunnerConfig::default(),
        };
        if let Some(database) = &self.database {
            config.database = database.clone();
        }
        if self.no_foreign_keys {
            config.foreign_keys = false;
        }
        Ok(config)
    }
}

fn main() -> Result<ExitCode> {
    logging::init_stderr_logging();
    let cli = Cli::parse();
    let config = cli.runner_config()?;

    let reporter: Box<dyn Reporter> = if cli.quiet {
        Box::new(TracingReporter)
    } else {
        Box::new(ConsoleReporter)
    };
    let mut runner = QueryRunner::open(&config, reporter).context("opening database")?;
    let mut failures = 0usize;

    for script in &cli.scripts {
        if runner.execute_script(&ScriptSource::file(script)).is_err() {
            failures += 1;
        }
    }

    let sources = cli
        .queries
        .iter()
        .map(ScriptSource::file)
        .chain(
            cli.statements
                .iter()
                .enumerate()
                .map(|(i, sql)| ScriptSource::inline(format!("--sql #{}", i + 1), sql.as_str())),
        );
    for source in sources {
        match runner.execute_query_from_source(&source) {
            Ok(result) => {
                if let Some(set) = result.result_set() {
                    println!("{}", display::render_table(set));
                }
            }
            Err(_) => failures += 1,
        }
    }

    runner.close().context("closing database")?;
    info!(failures, "done");
    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
