use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use troupe_proto::{ActorDescriptor, ActorType, control};
use troupe_rpc::{CallError, Remote};

use crate::unit::{ExecutionUnit, UnitId};

/// The orchestrator's handle on a unit's [`ActorHost`](crate::host::ActorHost).
#[derive(Debug, Clone)]
pub struct ControlProxy {
    unit:   UnitId,
    remote: Remote,
}

impl ControlProxy {
    pub fn for_unit(unit: &ExecutionUnit) -> Self {
        Self {
            unit:   unit.id(),
            remote: Remote::wrap(unit.control_port().clone()),
        }
    }

    pub fn unit_id(&self) -> UnitId {
        self.unit
    }

    pub async fn materialize<A: ActorType>(
        &self,
        timeout: Option<Duration>,
    ) -> Result<RemoteProxy<A>, CallError> {
        let remote = self
            .materialize_descriptor(ActorDescriptor::of::<A>(), timeout)
            .await?;
        Ok(RemoteProxy {
            unit: self.unit,
            remote,
            _actor: PhantomData,
        })
    }

    pub async fn materialize_descriptor(
        &self,
        descriptor: ActorDescriptor,
        timeout: Option<Duration>,
    ) -> Result<Remote, CallError> {
        match timeout {
            None => self.remote.call_object(control::MATERIALIZE, descriptor).await,
            Some(timeout) => {
                self.remote
                    .call_object_timeout(control::MATERIALIZE, descriptor, timeout)
                    .await
            },
        }
    }
}

/// A hosted actor of type `A`. Every call is a round-trip to its unit.
///
/// Clones share the actor; it is dropped inside the unit once the last clone
/// is gone.
pub struct RemoteProxy<A> {
    unit:   UnitId,
    remote: Remote,
    _actor: PhantomData<fn() -> A>,
}

impl<A> RemoteProxy<A> {
    pub fn unit_id(&self) -> UnitId {
        self.unit
    }

    pub async fn call<Args, R>(&self, method: &str, args: Args) -> Result<R, CallError>
    where
        Args: Serialize,
        R: DeserializeOwned,
    {
        self.remote.call(method, args).await
    }

    pub async fn call_timeout<Args, R>(
        &self,
        method: &str,
        args: Args,
        timeout: Duration,
    ) -> Result<R, CallError>
    where
        Args: Serialize,
        R: DeserializeOwned,
    {
        self.remote.call_timeout(method, args, timeout).await
    }

    pub async fn call_value(&self, method: &str, args: Value) -> Result<Value, CallError> {
        self.remote.call_value(method, args).await
    }

    pub fn into_remote(self) -> Remote {
        self.remote
    }
}

impl<A> Clone for RemoteProxy<A> {
    fn clone(&self) -> Self {
        Self {
            unit:   self.unit,
            remote: self.remote.clone(),
            _actor: PhantomData,
        }
    }
}

impl<A: ActorType> fmt::Debug for RemoteProxy<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteProxy")
            .field("actor", &A::TYPE_NAME)
            .field("unit", &self.unit)
            .finish()
    }
}
