//! Logger set-up shared by the command line entry and the task runner.
use chrono::Local;
use log::debug;
use simplelog::*;
use std::fs::File;

/// Level used when neither the command line nor a task sets one.
pub const DEFAULT_LOGLEVEL: LevelFilter = LevelFilter::Warn;

/// Turns a level name into a filter; "off" and "none" disable logging.
pub fn parse_loglevel(level: &str) -> Result<LevelFilter, String> {
    match level.trim().to_lowercase().as_str() {
        "off" | "none" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        other => Err(format!(
            "loglevel must be off, none, error, warn, info, debug or trace, got '{}'",
            other
        )),
    }
}

/// default log file name, stamped with the current date and time
pub fn default_log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Initialize the terminal logger and, if a file name is given, a file logger.
/// A logger that is already installed stays in place and no log file is created.
pub fn init_logger(level: LevelFilter, log_file: Option<&str>) -> Result<(), String> {
    if level == LevelFilter::Off {
        return Ok(());
    }
    // max_level stays Off until a logger is installed
    if log::max_level() != LevelFilter::Off {
        debug!("logger already installed, keeping it");
        return Ok(());
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));
    if let Some(name) = log_file {
        let file = File::create(name)
            .map_err(|e| format!("cannot create log file {}: {}", name, e))?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    CombinedLogger::init(loggers).map_err(|e| format!("cannot install logger: {}", e))
}
