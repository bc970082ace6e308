// #![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]

//! Execution units and the actor host.
//!
//! An [`ExecutionUnit`](unit::ExecutionUnit) is a thread with a runtime of its
//! own. Its entry point calls [`bootstrap::run_worker`], which installs an
//! [`ActorHost`](host::ActorHost) on the unit's control channel. The
//! orchestrator talks to that host through a [`ControlProxy`], asking it to
//! materialize actors by [descriptor](troupe_proto::ActorDescriptor); each
//! materialized actor comes back as a [`RemoteProxy`].

pub mod actor;
pub mod bootstrap;
pub mod host;
pub mod module;
pub mod registry;
pub mod unit;

mod control;

pub use actor::{Actor, Constructible};
pub use control::{ControlProxy, RemoteProxy};
pub use module::WorkerModule;
pub use registry::ActorRegistry;
pub use unit::{ExecutionUnit, ThreadUnitFactory, UnitConfig, UnitFactory, UnitId, UnitStartError};
