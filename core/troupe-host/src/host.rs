use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use troupe_common::log;
use troupe_proto::{ActorDescriptor, Fault, control};
use troupe_rpc::{Handler, Reply, decode_args};

use crate::actor::Hosted;
use crate::registry::ActorRegistry;

/// The handler installed on a unit's control channel. It knows a single
/// operation: [`control::MATERIALIZE`].
///
/// Constructors run with every privilege the unit's thread has; nothing is
/// sandboxed or validated beyond the type-name lookup.
#[derive(Debug)]
pub struct ActorHost {
    registry:     ActorRegistry,
    materialized: u64,
}

impl ActorHost {
    pub fn new(registry: ActorRegistry) -> Self {
        Self {
            registry,
            materialized: 0,
        }
    }

    pub fn materialized(&self) -> u64 {
        self.materialized
    }

    fn materialize(&mut self, descriptor: ActorDescriptor) -> Result<Reply, Fault> {
        let actor = self.registry.materialize(&descriptor)?;
        self.materialized += 1;
        log::debug!(%descriptor, count = self.materialized, "materialized");
        Ok(Reply::object(Hosted(actor)))
    }
}

impl Handler for ActorHost {
    fn handle<'a>(
        &'a mut self,
        method: &'a str,
        args: Value,
    ) -> BoxFuture<'a, Result<Reply, Fault>> {
        async move {
            match method {
                control::MATERIALIZE => {
                    let descriptor: ActorDescriptor = decode_args(args)?;
                    self.materialize(descriptor)
                },
                _ => Err(Fault::unknown_method(method)),
            }
        }
        .boxed()
    }
}
