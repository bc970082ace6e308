use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::oneshot;
use troupe_common::errors::error_of::ErrorOf;
use troupe_common::futures::timeout::FutureTimeoutExt;
use troupe_common::impl_error_kind;
use troupe_proto::{Fault, FaultKind};

use crate::channel::{Port, Request, Response};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallErrorKind {
    /// The serving side is gone (its unit terminated, or it never existed).
    Closed,
    /// The call was accepted but the reply was never sent.
    Dropped,
    Codec,
    Timeout,
    UnexpectedReply,
    Fault(FaultKind),
}

impl_error_kind!(CallErrorKind);

pub type CallError = ErrorOf<CallErrorKind>;

/// A proxy for an object exposed on the other end of a [`Port`].
#[derive(Debug, Clone)]
pub struct Remote {
    port: Port,
}

impl Remote {
    pub fn wrap(port: Port) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &Port {
        &self.port
    }

    pub async fn call<A, R>(&self, method: &str, args: A) -> Result<R, CallError>
    where
        A: Serialize,
        R: DeserializeOwned,
    {
        let value = self.call_value(method, encode(&args)?).await?;
        serde_json::from_value(value).map_err(|e| ErrorOf::new(CallErrorKind::Codec, e.to_string()))
    }

    pub async fn call_timeout<A, R>(
        &self,
        method: &str,
        args: A,
        timeout: Duration,
    ) -> Result<R, CallError>
    where
        A: Serialize,
        R: DeserializeOwned,
    {
        self.call(method, args)
            .timeout(timeout)
            .await
            .map_err(|_elapsed| timed_out(method, timeout))?
    }

    pub async fn call_value(&self, method: &str, args: Value) -> Result<Value, CallError> {
        match self.round_trip(method, args).await? {
            Response::Value(value) => Ok(value),
            Response::Object(_) => {
                Err(ErrorOf::new(
                    CallErrorKind::UnexpectedReply,
                    format!("{} returned an object, a value was expected", method),
                ))
            },
            Response::Fault(fault) => Err(from_fault(fault)),
        }
    }

    /// Calls a method that replies with an object and wraps that object.
    pub async fn call_object<A>(&self, method: &str, args: A) -> Result<Remote, CallError>
    where
        A: Serialize,
    {
        match self.round_trip(method, encode(&args)?).await? {
            Response::Object(port) => Ok(Remote::wrap(port)),
            Response::Value(_) => {
                Err(ErrorOf::new(
                    CallErrorKind::UnexpectedReply,
                    format!("{} returned a value, an object was expected", method),
                ))
            },
            Response::Fault(fault) => Err(from_fault(fault)),
        }
    }

    pub async fn call_object_timeout<A>(
        &self,
        method: &str,
        args: A,
        timeout: Duration,
    ) -> Result<Remote, CallError>
    where
        A: Serialize,
    {
        self.call_object(method, args)
            .timeout(timeout)
            .await
            .map_err(|_elapsed| timed_out(method, timeout))?
    }

    async fn round_trip(&self, method: &str, args: Value) -> Result<Response, CallError> {
        let (reply_to, reply) = oneshot::channel();
        let request = Request {
            method: method.to_owned(),
            args,
            reply_to,
        };
        self.port.post(request).map_err(|rejected| {
            ErrorOf::new(
                CallErrorKind::Closed,
                format!("{}: the remote side is closed", rejected.method),
            )
        })?;
        reply.await.map_err(|_| {
            ErrorOf::new(
                CallErrorKind::Dropped,
                format!("{}: the remote side went away before replying", method),
            )
        })
    }
}

/// Recovers the remote [`Fault`] from a call error, if that is what it was.
pub fn fault_of(error: &CallError) -> Option<Fault> {
    match error.kind {
        CallErrorKind::Fault(kind) => Some(Fault::new(kind, error.message.to_string())),
        _ => None,
    }
}

fn encode<A: Serialize>(args: &A) -> Result<Value, CallError> {
    serde_json::to_value(args).map_err(|e| ErrorOf::new(CallErrorKind::Codec, e.to_string()))
}

fn from_fault(fault: Fault) -> CallError {
    ErrorOf::new(CallErrorKind::Fault(fault.kind), fault.message)
}

fn timed_out(method: &str, timeout: Duration) -> CallError {
    ErrorOf::new(
        CallErrorKind::Timeout,
        format!("{}: no reply within {:?}", method, timeout),
    )
}
