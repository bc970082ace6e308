use std::future::Future;

use troupe_host::{ControlProxy, RemoteProxy};
use troupe_proto::ActorType;

use crate::error::{PlacementError, SpawnError};
use crate::options::SpawnOptions;

pub(crate) mod round_robin;

/// Picks the execution unit for each spawn and owns the units it creates.
pub trait Strategy: Send + Sync {
    /// The control proxy of the unit chosen for the next actor; may start that
    /// unit first.
    fn get_worker(
        &self,
        opts: &SpawnOptions,
    ) -> impl Future<Output = Result<ControlProxy, PlacementError>> + Send;

    /// Terminates every live unit and empties the pool. A later spawn starts
    /// over with fresh units.
    fn terminate(&self) -> impl Future<Output = ()> + Send;

    /// True while the pool holds no slots at all.
    fn terminated(&self) -> bool;

    fn spawn<A: ActorType>(
        &self,
        opts: &SpawnOptions,
    ) -> impl Future<Output = Result<RemoteProxy<A>, SpawnError>> + Send {
        async move {
            let control = self.get_worker(opts).await?;
            control
                .materialize::<A>(opts.materialize_timeout)
                .await
                .map_err(SpawnError::from_materialize)
        }
    }
}
