use troupe_host::UnitStartError;
use troupe_proto::Fault;
use troupe_rpc::{CallError, fault_of};

#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    /// The slot the cursor points at does not exist: the pool is zero-sized.
    #[error("no worker available: slot {index} is outside a pool of {pool_size}")]
    PoolExhausted { index: usize, pool_size: usize },
    #[error("failed to start an execution unit")]
    UnitStart(#[source] UnitStartError),
    #[error("the pool was terminated while a unit was being started")]
    Terminated,
}

#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    #[error("placement failed")]
    Placement(#[from] PlacementError),
    #[error("materialization failed")]
    Materialization(#[source] Fault),
    #[error("transport failed")]
    Transport(#[source] CallError),
}

impl SpawnError {
    /// Faults raised by the host mean the actor could not be built; anything
    /// else is the channel failing.
    pub(crate) fn from_materialize(error: CallError) -> Self {
        match fault_of(&error) {
            Some(fault) => Self::Materialization(fault),
            None => Self::Transport(error),
        }
    }
}
