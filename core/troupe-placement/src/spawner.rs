use std::sync::OnceLock;

use troupe_common::log;
use troupe_host::RemoteProxy;
use troupe_proto::ActorType;

use crate::error::SpawnError;
use crate::options::{SpawnOptions, StrategyOptions};
use crate::strategy::Strategy;
use crate::strategy::round_robin::RoundRobinStrategy;

/// A round-robin strategy built on first use.
///
/// Meant to be created once by the application and handed to whoever needs
/// to spawn; there is no process-wide instance.
#[derive(Debug, Default)]
pub struct Spawner {
    options:  StrategyOptions,
    strategy: OnceLock<RoundRobinStrategy>,
}

impl Spawner {
    pub fn new(options: StrategyOptions) -> Self {
        Self {
            options,
            strategy: OnceLock::new(),
        }
    }

    /// Uses an already constructed strategy.
    pub fn with_strategy(strategy: RoundRobinStrategy) -> Self {
        Self {
            options:  strategy.options().clone(),
            strategy: OnceLock::from(strategy),
        }
    }

    pub fn strategy(&self) -> &RoundRobinStrategy {
        self.strategy.get_or_init(|| {
            log::debug!(options = ?self.options, "constructing the default strategy");
            RoundRobinStrategy::new(self.options.clone())
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.strategy.get().is_some()
    }

    pub async fn spawn<A: ActorType>(&self, opts: &SpawnOptions) -> Result<RemoteProxy<A>, SpawnError> {
        self.strategy().spawn::<A>(opts).await
    }

    /// Terminates the strategy's units, if it was ever constructed.
    pub async fn terminate(&self) {
        if let Some(strategy) = self.strategy.get() {
            strategy.terminate().await
        }
    }
}
