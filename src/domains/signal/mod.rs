pub mod channel;
pub mod codec;
pub mod protocol;
pub mod types;

pub use channel::*;
pub use codec::*;
pub use protocol::*;
pub use types::*;
