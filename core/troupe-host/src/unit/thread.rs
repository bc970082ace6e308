use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::runtime;
use tokio::sync::oneshot;
use tracing::instrument;
use troupe_common::errors::chain::StdErrorDisplayChainExt;
use troupe_common::log;
use troupe_rpc::Inbox;

use crate::bootstrap;
use crate::module::WorkerModule;
use crate::unit::{ExecutionUnit, UnitConfig, UnitFactory, UnitId, UnitStartError};

/// Starts each unit on a dedicated OS thread with a current-thread tokio
/// runtime.
#[derive(Debug, Clone, Default)]
pub struct ThreadUnitFactory {
    config: UnitConfig,
}

impl ThreadUnitFactory {
    pub fn new(config: UnitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UnitConfig {
        &self.config
    }
}

impl UnitFactory for ThreadUnitFactory {
    fn start(&self, module: &WorkerModule) -> BoxFuture<'static, Result<ExecutionUnit, UnitStartError>> {
        start_thread(self.config.clone(), module.clone()).boxed()
    }
}

#[instrument(skip_all, fields(module = module.name()))]
async fn start_thread(
    config: UnitConfig,
    module: WorkerModule,
) -> Result<ExecutionUnit, UnitStartError> {
    let id = UnitId::next();
    let (control, inbox) = troupe_rpc::channel();
    let (tx_shutdown, rx_shutdown) = oneshot::channel();
    let (tx_exited, rx_exited) = oneshot::channel();
    let (tx_ready, rx_ready) = oneshot::channel();

    std::thread::Builder::new()
        .name(format!("{}-{}", config.thread_name_prefix, id.0))
        .stack_size(config.thread_stack_size)
        .spawn(move || {
            let _tx_exited: oneshot::Sender<()> = tx_exited;
            unit_main(id, config, module, inbox, rx_shutdown, tx_ready)
        })
        .map_err(UnitStartError::Spawn)?;

    rx_ready.await.map_err(|_| UnitStartError::Aborted)??;
    log::info!(unit = %id, "unit started");

    Ok(ExecutionUnit::new(id, control, tx_shutdown, rx_exited))
}

fn unit_main(
    id: UnitId,
    config: UnitConfig,
    module: WorkerModule,
    inbox: Inbox,
    rx_shutdown: oneshot::Receiver<()>,
    tx_ready: oneshot::Sender<Result<(), UnitStartError>>,
) {
    let mut builder = runtime::Builder::new_current_thread();
    if config.enable_time {
        builder.enable_time();
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(reason) => {
            let _ = tx_ready.send(Err(UnitStartError::Runtime(reason)));
            return
        },
    };

    // Requests sent before the host is installed wait in the inbox.
    let _ = tx_ready.send(Ok(()));

    if let Err(reason) = rt.block_on(bootstrap::run_worker(module, inbox, rx_shutdown)) {
        log::error!(unit = %id, error = %reason.as_display_chain(), "worker bootstrap failed");
    }
    drop(rt);
    log::info!(unit = %id, "unit stopped");
}
