pub mod logger;
pub mod signal;
pub mod swarm;

pub use logger::*;
pub use signal::*;
pub use swarm::*;
