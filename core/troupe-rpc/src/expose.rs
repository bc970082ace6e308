use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;
use troupe_common::futures::catch_panic::CatchPanicExt;
use troupe_common::log;
use troupe_proto::{Fault, FaultKind};

use crate::channel::{self, Inbox, Response};
use crate::codec;

/// An object whose methods can be called through a [`Port`](crate::Port).
///
/// Calls are handled one at a time, in arrival order.
pub trait Handler: Send + 'static {
    fn handle<'a>(&'a mut self, method: &'a str, args: Value)
    -> BoxFuture<'a, Result<Reply, Fault>>;
}

pub enum Reply {
    Value(Value),
    /// Expose this handler on a new channel and hand its port to the caller.
    Object(Box<dyn Handler>),
}

impl Reply {
    pub fn value<T: Serialize + ?Sized>(value: &T) -> Result<Self, Fault> {
        codec::encode_value(value).map(Self::Value)
    }

    pub fn object(handler: impl Handler) -> Self {
        Self::Object(Box::new(handler))
    }
}

impl std::fmt::Debug for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Object(_) => f.write_str("Object(..)"),
        }
    }
}

/// Serves `handler` on `inbox` until every [`Port`](crate::Port) of the
/// channel is dropped. Must be called from within a tokio runtime; the serve
/// loop (and any object it hands out) lives on that runtime.
pub fn expose(handler: impl Handler, inbox: Inbox) -> JoinHandle<()> {
    tokio::spawn(serve(Box::new(handler), inbox))
}

fn serve(mut handler: Box<dyn Handler>, mut inbox: Inbox) -> BoxFuture<'static, ()> {
    async move {
        while let Some(request) = inbox.recv().await {
            let channel::Request {
                method,
                args,
                reply_to,
            } = request;

            let outcome = handler.handle(&method, args).catch_panic().await;
            let response = match outcome {
                Ok(Ok(Reply::Value(value))) => Response::Value(value),
                Ok(Ok(Reply::Object(object))) => {
                    let (port, object_inbox) = channel::channel();
                    tokio::spawn(serve(object, object_inbox));
                    Response::Object(port)
                },
                Ok(Err(fault)) => {
                    log::debug!(%method, %fault, "call failed");
                    Response::Fault(fault)
                },
                Err(panic_message) => {
                    log::warn!(%method, panic = %panic_message, "handler panicked");
                    Response::Fault(Fault::new(FaultKind::Panicked, panic_message))
                },
            };

            if reply_to.send(response).is_err() {
                log::trace!(%method, "caller went away before the reply");
            }
        }
        log::trace!("all ports dropped, serve loop done");
    }
    .boxed()
}
