use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use troupe_host::{ThreadUnitFactory, UnitConfig, UnitFactory, WorkerModule};

/// Fixed at strategy construction.
#[derive(Clone)]
pub struct StrategyOptions {
    /// Loaded by every unit the strategy starts.
    pub worker_module:   WorkerModule,
    /// Upper bound on live units.
    pub max_num_workers: usize,
    pub new_worker:      Arc<dyn UnitFactory>,
}

impl StrategyOptions {
    pub fn with_worker_module(self, worker_module: WorkerModule) -> Self {
        Self {
            worker_module,
            ..self
        }
    }

    pub fn with_max_num_workers(self, max_num_workers: usize) -> Self {
        Self {
            max_num_workers,
            ..self
        }
    }

    pub fn with_new_worker(self, new_worker: impl UnitFactory) -> Self {
        Self {
            new_worker: Arc::new(new_worker),
            ..self
        }
    }
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self {
            worker_module:   Default::default(),
            max_num_workers: defaults::max_num_workers(),
            new_worker:      Arc::new(ThreadUnitFactory::default()),
        }
    }
}

impl fmt::Debug for StrategyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyOptions")
            .field("worker_module", &self.worker_module)
            .field("max_num_workers", &self.max_num_workers)
            .finish_non_exhaustive()
    }
}

/// Per-spawn knobs.
#[derive(Debug, Clone, Default)]
pub struct SpawnOptions {
    /// Gives up on materialization after this long. No limit by default.
    pub materialize_timeout: Option<Duration>,
}

/// The deserializable part of [`StrategyOptions`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PoolConfig {
    #[serde(default = "defaults::max_num_workers")]
    pub max_num_workers: usize,
    #[serde(default)]
    pub unit:            UnitConfig,
}

impl PoolConfig {
    pub fn into_options(self, worker_module: WorkerModule) -> StrategyOptions {
        StrategyOptions {
            worker_module,
            max_num_workers: self.max_num_workers,
            new_worker: Arc::new(ThreadUnitFactory::new(self.unit)),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_num_workers: defaults::max_num_workers(),
            unit:            Default::default(),
        }
    }
}

mod defaults {
    pub(super) fn max_num_workers() -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(PoolConfig::default(), "{}" ; "defaults")]
    #[test_case(
        PoolConfig {
            max_num_workers: 4,
            unit: UnitConfig {
                thread_name_prefix: "calc".into(),
                ..Default::default()
            },
        },
        r#"
            max_num_workers: 4
            unit:
              thread_name_prefix: calc
        "#
        ; "four named units"
    )]
    #[test_case(
        PoolConfig {
            max_num_workers: 0,
            ..Default::default()
        },
        "max_num_workers: 0"
        ; "zero-sized pool parses"
    )]
    fn should_deserialize(expected: PoolConfig, yaml: &str) {
        assert_eq!(serde_yaml::from_str::<PoolConfig>(yaml).unwrap(), expected);
    }

    #[test]
    fn overrides_merge_over_defaults() {
        let options = StrategyOptions::default().with_max_num_workers(3);
        assert_eq!(options.max_num_workers, 3);
        assert_eq!(options.worker_module.name(), WorkerModule::default().name());

        let options = PoolConfig::default().into_options(WorkerModule::new("calc"));
        assert_eq!(options.max_num_workers, 1);
        assert_eq!(options.worker_module.name(), "calc");
    }
}
