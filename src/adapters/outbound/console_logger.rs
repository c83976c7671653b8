use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Writes to stdout, errors to stderr. Debug output only when `verbose`.
pub struct ConsoleLogger {
    verbose: bool,
}

impl ConsoleLogger {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl DomainLogger for ConsoleLogger {
    fn debug(&self, msg: &str) {
        if self.verbose {
            println!("DEBUG: {}", msg);
        }
    }
    fn info(&self, msg: &str) { println!("{}", msg); }
    fn warn(&self, msg: &str) { println!("WARN: {}", msg); }
    fn error(&self, msg: &str) { eprintln!("ERROR: {}", msg); }
}

pub fn init_console_logger(verbose: bool) -> Arc<dyn DomainLogger> {
    Arc::new(ConsoleLogger::new(verbose))
}
