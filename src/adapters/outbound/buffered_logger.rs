use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy)]
enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

struct Record {
    level: Level,
    msg: String,
}

struct BufferedLogger {
    sender: mpsc::Sender<Record>,
}

impl BufferedLogger {
    fn push(&self, level: Level, msg: &str) {
        // Full buffer: drop rather than stall the signal exchange.
        let _ = self.sender.try_send(Record { level, msg: msg.to_string() });
    }
}

impl DomainLogger for BufferedLogger {
    fn debug(&self, msg: &str) { self.push(Level::Debug, msg); }
    fn info(&self, msg: &str) { self.push(Level::Info, msg); }
    fn warn(&self, msg: &str) { self.push(Level::Warn, msg); }
    fn error(&self, msg: &str) { self.push(Level::Error, msg); }
}

/// Non-blocking logger: records are forwarded to `sink` from a background
/// task. Must be called inside a tokio runtime.
pub fn init_buffered_logger(sink: DynLogger, capacity: usize) -> DynLogger {
    let (sender, mut receiver) = mpsc::channel::<Record>(capacity.max(1));

    tokio::spawn(async move {
        while let Some(record) = receiver.recv().await {
            match record.level {
                Level::Debug => sink.debug(&record.msg),
                Level::Info => sink.info(&record.msg),
                Level::Warn => sink.warn(&record.msg),
                Level::Error => sink.error(&record.msg),
            }
        }
    });

    Arc::new(BufferedLogger { sender })
}
