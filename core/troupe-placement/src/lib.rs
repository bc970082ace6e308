// #![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]

//! Deciding which execution unit hosts an actor.

mod error;
mod options;
mod spawner;
mod strategy;

pub use error::{PlacementError, SpawnError};
pub use options::{PoolConfig, SpawnOptions, StrategyOptions};
pub use spawner::Spawner;
pub use strategy::Strategy;
pub use strategy::round_robin::RoundRobinStrategy;
