use std::sync::Arc;

use futures::future;
use parking_lot::Mutex;
use tokio::sync::OnceCell;
use troupe_common::log;
use troupe_host::{ControlProxy, ExecutionUnit};

use crate::error::PlacementError;
use crate::options::{SpawnOptions, StrategyOptions};
use crate::strategy::Strategy;

/// Hands out the pool's slots in turn, starting each slot's unit the first
/// time the cursor reaches it.
///
/// No load tracking and no health checks: a slot whose unit died stays in the
/// rotation and keeps failing until [`terminate`](Strategy::terminate).
#[derive(Debug)]
pub struct RoundRobinStrategy {
    options: StrategyOptions,
    pool:    Mutex<Pool>,
}

#[derive(Debug)]
struct Pool {
    slots:  Vec<Slot>,
    cursor: usize,
}

/// Initialized at most once; concurrent callers wait for the same unit.
type Slot = Arc<OnceCell<UnitRecord>>;

#[derive(Debug)]
struct UnitRecord {
    unit:    ExecutionUnit,
    control: ControlProxy,
}

impl RoundRobinStrategy {
    pub fn new(options: StrategyOptions) -> Self {
        let pool = Mutex::new(Pool::armed(options.max_num_workers));
        Self { options, pool }
    }

    pub fn options(&self) -> &StrategyOptions {
        &self.options
    }

    /// Units started and not yet terminated.
    pub fn live_units(&self) -> usize {
        self.pool
            .lock()
            .slots
            .iter()
            .filter(|slot| slot.initialized())
            .count()
    }

    /// Takes the slot under the cursor and moves the cursor on. A pool emptied
    /// by `terminate` is re-armed first.
    fn claim(&self) -> Result<(usize, Slot), PlacementError> {
        let mut pool = self.pool.lock();
        if pool.slots.is_empty() && self.options.max_num_workers > 0 {
            log::debug!(size = self.options.max_num_workers, "re-arming the pool");
            *pool = Pool::armed(self.options.max_num_workers);
        }

        let index = pool.cursor;
        let pool_size = pool.slots.len();
        let slot = pool
            .slots
            .get(index)
            .cloned()
            .ok_or(PlacementError::PoolExhausted { index, pool_size })?;
        pool.cursor = (index + 1) % pool_size;
        Ok((index, slot))
    }

    /// Undoes a claim whose unit failed to start, unless the cursor has moved
    /// on since or the pool was replaced.
    fn unclaim(&self, index: usize, slot: &Slot) {
        let mut pool = self.pool.lock();
        let pool_size = pool.slots.len();
        if pool.holds(index, slot) && pool.cursor == (index + 1) % pool_size {
            pool.cursor = index;
        }
    }

    async fn start_unit(&self, index: usize) -> Result<UnitRecord, PlacementError> {
        let unit = self
            .options
            .new_worker
            .start(&self.options.worker_module)
            .await
            .map_err(PlacementError::UnitStart)?;
        let control = ControlProxy::for_unit(&unit);
        log::info!(slot = index, unit = %unit.id(), "slot initialized");
        Ok(UnitRecord { unit, control })
    }
}

impl Strategy for RoundRobinStrategy {
    async fn get_worker(&self, _opts: &SpawnOptions) -> Result<ControlProxy, PlacementError> {
        let (index, slot) = self.claim()?;

        let record = match slot.get_or_try_init(|| self.start_unit(index)).await {
            Ok(record) => record,
            Err(reason) => {
                self.unclaim(index, &slot);
                return Err(reason)
            },
        };

        let still_pooled = self.pool.lock().holds(index, &slot);
        if !still_pooled {
            log::debug!(slot = index, unit = %record.unit.id(), "pool terminated meanwhile");
            record.unit.terminate().await;
            return Err(PlacementError::Terminated)
        }

        log::trace!(slot = index, unit = %record.control.unit_id(), "placing");
        Ok(record.control.clone())
    }

    async fn terminate(&self) {
        let slots = {
            let mut pool = self.pool.lock();
            pool.cursor = 0;
            std::mem::take(&mut pool.slots)
        };
        let live = slots.iter().filter_map(|slot| slot.get()).collect::<Vec<_>>();
        log::debug!(live_units = live.len(), "terminating");
        future::join_all(live.into_iter().map(|record| record.unit.terminate())).await;
    }

    fn terminated(&self) -> bool {
        self.pool.lock().slots.is_empty()
    }
}

impl Pool {
    fn armed(size: usize) -> Self {
        Self {
            slots:  (0..size).map(|_| Default::default()).collect(),
            cursor: 0,
        }
    }

    fn holds(&self, index: usize, slot: &Slot) -> bool {
        self.slots
            .get(index)
            .is_some_and(|pooled| Arc::ptr_eq(pooled, slot))
    }
}
