use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use troupe_common::types::AnyError;
use troupe_proto::{ActorType, Fault};
use troupe_rpc::{Handler, Reply};

/// Behaviour living inside an execution unit.
///
/// Every method is reached by name with JSON arguments; see
/// [`decode_args`](troupe_rpc::decode_args) and
/// [`encode_value`](troupe_rpc::encode_value) for the usual plumbing.
pub trait Actor: Send + 'static {
    fn invoke<'a>(&'a mut self, method: &'a str, args: Value) -> BoxFuture<'a, Result<Value, Fault>>;
}

/// An actor that can be built from nothing but its type name.
pub trait Constructible: Actor + ActorType + Sized {
    fn construct() -> Result<Self, AnyError>;
}

pub(crate) struct Hosted(pub(crate) Box<dyn Actor>);

impl Handler for Hosted {
    fn handle<'a>(
        &'a mut self,
        method: &'a str,
        args: Value,
    ) -> BoxFuture<'a, Result<Reply, Fault>> {
        self.0
            .invoke(method, args)
            .map(|outcome| outcome.map(Reply::Value))
            .boxed()
    }
}
