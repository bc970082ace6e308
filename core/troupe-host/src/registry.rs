use std::borrow::Cow;
use std::collections::HashMap;

use troupe_common::errors::chain::AnyErrorDisplayChainExt;
use troupe_common::log;
use troupe_common::types::AnyError;
use troupe_proto::{ActorDescriptor, Fault, FaultKind};

use crate::actor::{Actor, Constructible};

type Constructor = fn() -> Result<Box<dyn Actor>, AnyError>;

/// Per-unit table of constructible actor types.
#[derive(Default)]
pub struct ActorRegistry {
    constructors: HashMap<Cow<'static, str>, Constructor>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers `A` under its type name, replacing a previous registration of
    /// the same name.
    pub fn register<A: Constructible>(&mut self) -> &mut Self {
        if self
            .constructors
            .insert(Cow::Borrowed(A::TYPE_NAME), construct_boxed::<A>)
            .is_some()
        {
            log::warn!(type_name = A::TYPE_NAME, "actor type registered twice");
        }
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    pub fn materialize(&self, descriptor: &ActorDescriptor) -> Result<Box<dyn Actor>, Fault> {
        let construct = self
            .constructors
            .get(&*descriptor.type_name)
            .ok_or_else(|| {
                Fault::new(
                    FaultKind::Materialization,
                    format!("unknown actor type: {:?}", descriptor.type_name),
                )
            })?;
        construct().map_err(|reason| {
            Fault::new(
                FaultKind::Materialization,
                format!("{}: {}", descriptor, reason.as_display_chain()),
            )
        })
    }
}

impl std::fmt::Debug for ActorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}

fn construct_boxed<A: Constructible>() -> Result<Box<dyn Actor>, AnyError> {
    let actor = A::construct()?;
    Ok(Box::new(actor))
}
