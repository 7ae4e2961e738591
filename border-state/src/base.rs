//! Collaborators of the library: agents and environments.
mod agent;
mod env;
pub use agent::{Agent, ParallelAgent};
pub use env::Environment;
