// #![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]

//! Actors placed on a pool of worker threads.
//!
//! An actor is a type the worker threads know how to build by name. Spawning
//! one picks a worker (an *execution unit*), asks it to construct the actor,
//! and hands back a [`RemoteProxy`](actor::RemoteProxy): every call made
//! through it is an asynchronous round-trip to that worker.
//!
//! ```rust,ignore
//! let spawner = Spawner::new(
//!     StrategyOptions::default()
//!         .with_worker_module(WorkerModule::new("calc").with_actor::<Adder>())
//!         .with_max_num_workers(4),
//! );
//! let adder = troupe::spawn::<Adder>(&spawner, &SpawnOptions::default()).await?;
//! let sum: i64 = adder.call("add", (2, 3)).await?;
//! ```

pub mod actor {
    //! Defining actors, and talking to them once spawned.

    /// Method dispatch of an actor, by name, over JSON arguments.
    pub use troupe_host::Actor;
    /// Construction of an actor from its type name alone.
    pub use troupe_host::Constructible;
    /// A handle on a spawned actor.
    pub use troupe_host::RemoteProxy;
    /// The name an actor type is known by inside the units.
    pub use troupe_proto::ActorType;
    /// What travels to a unit to get an actor built there.
    pub use troupe_proto::ActorDescriptor;
    /// Failures raised inside a unit and reported back.
    pub use troupe_proto::{Fault, FaultKind};
    pub use troupe_rpc::{CallError, CallErrorKind, decode_args, encode_value};
}

pub mod unit {
    //! Execution units: the worker threads and what they load.

    pub use troupe_host::bootstrap::{BootstrapError, is_worker, run_worker};
    pub use troupe_host::{
        ActorRegistry, ControlProxy, ExecutionUnit, ThreadUnitFactory, UnitConfig, UnitFactory,
        UnitId, UnitStartError, WorkerModule,
    };
}

pub mod placement {
    //! Choosing a unit for each actor.

    pub use troupe_placement::{
        PlacementError, PoolConfig, RoundRobinStrategy, SpawnError, SpawnOptions, Spawner,
        Strategy, StrategyOptions,
    };
}

pub mod rpc {
    //! The call/response channel underneath the proxies.

    pub use troupe_rpc::{Handler, Inbox, Port, Remote, Reply, channel, expose};
}

pub mod common {
    pub mod error {
        pub use troupe_common::errors::chain::{AnyErrorDisplayChainExt, StdErrorDisplayChainExt};
        pub use troupe_common::errors::error_kind::HasErrorKind;
        pub use troupe_common::errors::error_of::ErrorOf;
        pub use troupe_common::types::{AnyError, StdError};
    }

    pub mod future {
        pub use troupe_common::futures::catch_panic::{CatchPanic, CatchPanicExt};
        pub use troupe_common::futures::timeout::FutureTimeoutExt;
    }

    pub mod log {
        pub use troupe_common::log::*;
    }
}

#[cfg(feature = "logger")]
pub use troupe_logger as logger;

pub use placement::{SpawnOptions, Spawner, StrategyOptions};
pub use unit::WorkerModule;

/// Spawns `A` on the pool behind `spawner`.
pub async fn spawn<A: actor::ActorType>(
    spawner: &Spawner,
    opts: &SpawnOptions,
) -> Result<actor::RemoteProxy<A>, placement::SpawnError> {
    spawner.spawn::<A>(opts).await
}
