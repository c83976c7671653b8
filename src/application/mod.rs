pub mod swarm_service;

pub use swarm_service::*;
