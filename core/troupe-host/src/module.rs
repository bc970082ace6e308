use std::fmt;
use std::sync::Arc;

use crate::actor::Constructible;
use crate::registry::ActorRegistry;

const DEFAULT_MODULE_NAME: &str = "troupe-host";

type Registration = fn(&mut ActorRegistry);

/// What a fresh execution unit loads: a name (used for its thread) and the
/// actor types its registry will know about.
///
/// Registrations are plain function pointers, so a module carries no state
/// from the orchestrator into the unit.
#[derive(Clone)]
pub struct WorkerModule {
    name:          Arc<str>,
    registrations: Vec<Registration>,
}

impl WorkerModule {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name:          name.into(),
            registrations: vec![],
        }
    }

    pub fn with_actor<A: Constructible>(mut self) -> Self {
        self.registrations.push(register_one::<A>);
        self
    }

    pub fn with_registration(mut self, registration: Registration) -> Self {
        self.registrations.push(registration);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builds the registry. Runs inside the unit.
    pub fn load(&self) -> ActorRegistry {
        let mut registry = ActorRegistry::new();
        for register in &self.registrations {
            register(&mut registry);
        }
        registry
    }
}

impl Default for WorkerModule {
    fn default() -> Self {
        Self::new(DEFAULT_MODULE_NAME)
    }
}

impl fmt::Debug for WorkerModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerModule")
            .field("name", &self.name)
            .field("registrations", &self.registrations.len())
            .finish()
    }
}

fn register_one<A: Constructible>(registry: &mut ActorRegistry) {
    registry.register::<A>();
}
