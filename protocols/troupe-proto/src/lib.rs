// #![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]

//! The values exchanged between the orchestrator and an execution unit.
//!
//! Nothing in here refers to memory on either side: actors travel as
//! [`ActorDescriptor`]s, failures as [`Fault`]s, arguments and results as
//! JSON values.

mod descriptor;
mod fault;

pub use descriptor::{ActorDescriptor, ActorType};
pub use fault::{Fault, FaultKind};

/// Operations understood by a unit's control endpoint.
pub mod control {
    /// `materialize(ActorDescriptor) -> remote object`
    pub const MATERIALIZE: &str = "materialize";
}
