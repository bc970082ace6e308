//! Execution units: isolated threads hosting actors.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use troupe_common::log;
use troupe_common::types::AnyError;
use troupe_rpc::Port;

use crate::module::WorkerModule;

mod config;
mod thread;

pub use config::UnitConfig;
pub use thread::ThreadUnitFactory;

static UNIT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("unit#{}", _0)]
pub struct UnitId(u64);

impl UnitId {
    pub fn next() -> Self {
        Self(UNIT_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UnitStartError {
    #[error("failed to spawn the unit thread")]
    Spawn(#[source] std::io::Error),
    #[error("failed to build the unit runtime")]
    Runtime(#[source] std::io::Error),
    #[error("the unit exited during startup")]
    Aborted,
    #[error("unit factory error")]
    Factory(#[source] AnyError),
}

/// Starts execution units for a [`WorkerModule`].
pub trait UnitFactory: Send + Sync + 'static {
    fn start(&self, module: &WorkerModule) -> BoxFuture<'static, Result<ExecutionUnit, UnitStartError>>;
}

impl<F> UnitFactory for F
where
    F: Fn(&WorkerModule) -> BoxFuture<'static, Result<ExecutionUnit, UnitStartError>>
        + Send
        + Sync
        + 'static,
{
    fn start(&self, module: &WorkerModule) -> BoxFuture<'static, Result<ExecutionUnit, UnitStartError>> {
        self(module)
    }
}

/// A running unit, as seen from the orchestrator: its control port and the
/// means to stop it.
///
/// Dropping the handle stops the unit too.
#[derive(Debug)]
pub struct ExecutionUnit {
    id:        UnitId,
    control:   Port,
    lifecycle: Mutex<Option<Lifecycle>>,
}

#[derive(Debug)]
struct Lifecycle {
    tx_shutdown: oneshot::Sender<()>,
    rx_exited:   oneshot::Receiver<()>,
}

impl ExecutionUnit {
    /// `tx_shutdown` asks the unit to stop; `rx_exited` resolves (with an error,
    /// typically: its sender is just dropped) once it has.
    pub fn new(
        id: UnitId,
        control: Port,
        tx_shutdown: oneshot::Sender<()>,
        rx_exited: oneshot::Receiver<()>,
    ) -> Self {
        Self {
            id,
            control,
            lifecycle: Mutex::new(Some(Lifecycle {
                tx_shutdown,
                rx_exited,
            })),
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn control_port(&self) -> &Port {
        &self.control
    }

    pub fn is_terminated(&self) -> bool {
        self.lifecycle.lock().is_none()
    }

    /// Stops the unit and waits for its thread to wind down. Every actor it
    /// hosts is dropped; calls in flight fail. Repeated calls are no-ops.
    pub async fn terminate(&self) {
        let Some(Lifecycle {
            tx_shutdown,
            rx_exited,
        }) = self.lifecycle.lock().take()
        else {
            return
        };
        let _ = tx_shutdown.send(());
        let _ = rx_exited.await;
        log::debug!(unit = %self.id, "terminated");
    }
}
