use crate::config::LoggingConfig;
use crate::domains::logger::{DomainLogger, DynLogger, FileLogger};
use std::sync::Arc;

use super::console_logger::init_console_logger;

/// Fans every message out to a primary logger and an optional secondary one.
pub struct TeeLogger {
    primary: DynLogger,
    secondary: Option<DynLogger>,
}

impl TeeLogger {
    pub fn new(primary: DynLogger, secondary: Option<DynLogger>) -> Self {
        Self { primary, secondary }
    }

    fn each(&self, f: impl Fn(&dyn DomainLogger)) {
        f(self.primary.as_ref());
        if let Some(secondary) = &self.secondary {
            f(secondary.as_ref());
        }
    }
}

impl DomainLogger for TeeLogger {
    fn debug(&self, msg: &str) { self.each(|l| l.debug(msg)); }
    fn info(&self, msg: &str) { self.each(|l| l.info(msg)); }
    fn warn(&self, msg: &str) { self.each(|l| l.warn(msg)); }
    fn error(&self, msg: &str) { self.each(|l| l.error(msg)); }
}

/// Installs the `fast_log` file backend and returns a logger writing through it.
pub fn init_file_logger(path: &str, level: log::LevelFilter) -> Result<DynLogger, String> {
    FileLogger::init(path, level).map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(FileLogger))
}

/// Builds the domain logger described by `config`.
///
/// With a `file` configured, messages go to the file and the console. If the
/// file logger cannot be installed the console logger is used alone.
pub fn init_logger(config: &LoggingConfig) -> DynLogger {
    let level = config.level_filter().unwrap_or(log::LevelFilter::Info);
    let console = init_console_logger(level >= log::LevelFilter::Debug);

    let Some(path) = config.file.as_deref() else {
        return console;
    };
    match init_file_logger(path, level) {
        Ok(file) => Arc::new(TeeLogger::new(file, Some(console))) as DynLogger,
        Err(e) => {
            console.warn(&format!("{}; logging to console only", e));
            console
        }
    }
}
