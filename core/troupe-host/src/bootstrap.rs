//! Entering a worker context.
//!
//! Nothing happens when this crate is merely linked: a unit's thread entry
//! point has to call [`run_worker`] itself.

use std::cell::Cell;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::instrument;
use troupe_common::log;
use troupe_rpc::{Inbox, expose};

use crate::host::ActorHost;
use crate::module::WorkerModule;

thread_local! {
    static IS_WORKER: Cell<bool> = const { Cell::new(false) };
    static HOST_INSTALLED: Cell<bool> = const { Cell::new(false) };
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("already running as a worker on this thread")]
    AlreadyWorker,
    #[error("not in a worker context")]
    NotAWorker,
    #[error("the actor host is already installed on this thread")]
    AlreadyInstalled,
}

/// Whether the current thread is an execution unit.
pub fn is_worker() -> bool {
    IS_WORKER.with(Cell::get)
}

/// Marks the current thread as a worker context.
pub fn enter_worker_context() -> Result<(), BootstrapError> {
    IS_WORKER.with(|flag| {
        if flag.replace(true) {
            Err(BootstrapError::AlreadyWorker)
        } else {
            Ok(())
        }
    })
}

/// Exposes an [`ActorHost`] for `module` on `inbox`. Succeeds at most once per
/// thread, and only in a worker context.
pub fn install_host(module: &WorkerModule, inbox: Inbox) -> Result<JoinHandle<()>, BootstrapError> {
    if !is_worker() {
        return Err(BootstrapError::NotAWorker)
    }
    if HOST_INSTALLED.with(|flag| flag.replace(true)) {
        return Err(BootstrapError::AlreadyInstalled)
    }
    let registry = module.load();
    log::debug!(module = module.name(), actor_types = registry.len(), "installing actor host");
    Ok(expose(ActorHost::new(registry), inbox))
}

/// The body of an execution unit: enter the worker context, install the host
/// on the control inbox, and serve until `shutdown` fires (or its sender is
/// dropped).
#[instrument(skip_all, fields(module = module.name()))]
pub async fn run_worker(
    module: WorkerModule,
    inbox: Inbox,
    shutdown: oneshot::Receiver<()>,
) -> Result<(), BootstrapError> {
    enter_worker_context()?;
    let _host = install_host(&module, inbox)?;
    log::debug!("serving");

    let _ = shutdown.await;
    log::debug!("shutdown requested");
    Ok(())
}
