//! Abacus command-line calculator
//!
//! Reads one command per line from stdin and writes results to stdout.
//! Logs go to stderr, or to the file named by `ABACUS_LOG_FILE`.
//!
//! Environment:
//! - `RUST_LOG`: log filter (default `info`)
//! - `ABACUS_HISTORY_FILE`: default history file (default `calculation_history.csv`)
//! - `ABACUS_LOG_FILE`: append logs to this file instead of stderr

use abacus::{Calculator, Config, Repl};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logging(log_file: Option<&Path>) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let result = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("cannot open log file {}: {}", path.display(), e))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    };
    result.map_err(|e| format!("failed to initialise logging: {}", e))
}

fn main() -> ExitCode {
    let config = Config::from_env();

    if let Err(e) = init_logging(config.log_file.as_deref()) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    info!(
        version = VERSION,
        history = %config.history_path.display(),
        "abacus started"
    );

    let calculator = Calculator::with_standard_plugins(config);
    info!(plugins = calculator.registry().len(), "plugins loaded");

    let mut repl = Repl::new(calculator);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if let Err(e) = repl.run(stdin.lock(), &mut stdout) {
        error!(error = %e, "terminal I/O failed");
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let _ = stdout.flush();
    ExitCode::SUCCESS
}
