use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use troupe_proto::Fault;

pub(crate) struct Request {
    pub(crate) method:   String,
    pub(crate) args:     Value,
    pub(crate) reply_to: oneshot::Sender<Response>,
}

#[derive(Debug)]
pub(crate) enum Response {
    Value(Value),
    Object(Port),
    Fault(Fault),
}

/// The calling end of a channel. Cloning it shares the same remote object;
/// once every clone is gone the object's serve loop ends.
#[derive(Debug, Clone)]
pub struct Port {
    tx: mpsc::UnboundedSender<Request>,
}

/// The serving end of a channel.
#[derive(Debug)]
pub struct Inbox {
    rx: mpsc::UnboundedReceiver<Request>,
}

pub fn channel() -> (Port, Inbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Port { tx }, Inbox { rx })
}

impl Port {
    pub(crate) fn post(&self, request: Request) -> Result<(), Request> {
        self.tx.send(request).map_err(|e| e.0)
    }

    /// True once the serving side has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub fn same_channel(&self, other: &Port) -> bool {
        self.tx.same_channel(&other.tx)
    }
}

impl Inbox {
    pub(crate) async fn recv(&mut self) -> Option<Request> {
        self.rx.recv().await
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}
