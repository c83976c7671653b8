pub mod buffered_logger;
pub mod console_logger;
pub mod file_logger;
pub mod memory_channel;
pub mod noop_logger;
pub mod tcp_channel;

pub use buffered_logger::*;
pub use console_logger::*;
pub use file_logger::*;
pub use memory_channel::*;
pub use noop_logger::*;
pub use tcp_channel::*;
