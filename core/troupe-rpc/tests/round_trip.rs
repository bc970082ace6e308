use std::future;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use troupe_common::errors::error_kind::HasErrorKind;
use troupe_proto::{Fault, FaultKind};
use troupe_rpc::{CallErrorKind, Handler, Remote, Reply, channel, decode_args, expose, fault_of};

#[derive(Default)]
struct Counter {
    total: i64,
}

impl Handler for Counter {
    fn handle<'a>(
        &'a mut self,
        method: &'a str,
        args: Value,
    ) -> BoxFuture<'a, Result<Reply, Fault>> {
        async move {
            match method {
                "add" => {
                    let (delta,): (i64,) = decode_args(args)?;
                    self.total += delta;
                    Reply::value(&self.total)
                },
                "fork" => Ok(Reply::object(Counter { total: self.total })),
                "explode" => panic!("counter exploded"),
                "hang" => future::pending().await,
                _ => Err(Fault::unknown_method(method)),
            }
        }
        .boxed()
    }
}

fn exposed() -> Remote {
    let (port, inbox) = channel();
    expose(Counter::default(), inbox);
    Remote::wrap(port)
}

#[tokio::test]
async fn calls_are_answered_in_order() {
    let remote = exposed();
    assert_eq!(remote.call::<_, i64>("add", (2,)).await.unwrap(), 2);
    assert_eq!(remote.call::<_, i64>("add", (3,)).await.unwrap(), 5);
}

#[tokio::test]
async fn objects_get_their_own_channel() {
    let remote = exposed();
    let _: i64 = remote.call("add", (10,)).await.unwrap();

    let forked = remote.call_object("fork", ()).await.unwrap();
    assert!(!forked.port().same_channel(remote.port()));

    assert_eq!(forked.call::<_, i64>("add", (1,)).await.unwrap(), 11);
    assert_eq!(remote.call::<_, i64>("add", (0,)).await.unwrap(), 10);
}

#[tokio::test]
async fn faults_come_back_as_errors() {
    let remote = exposed();

    let err = remote.call::<_, i64>("sub", (1,)).await.unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::Fault(FaultKind::UnknownMethod));
    assert_eq!(fault_of(&err).map(|f| f.kind), Some(FaultKind::UnknownMethod));

    let err = remote.call::<_, i64>("add", ("one",)).await.unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::Fault(FaultKind::BadArguments));
}

#[tokio::test]
async fn a_panic_does_not_end_the_serve_loop() {
    let remote = exposed();

    let err = remote.call::<_, ()>("explode", ()).await.unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::Fault(FaultKind::Panicked));
    assert!(err.message.contains("counter exploded"));

    assert_eq!(remote.call::<_, i64>("add", (1,)).await.unwrap(), 1);
}

#[tokio::test]
async fn value_and_object_replies_are_not_interchangeable() {
    let remote = exposed();
    let err = remote.call::<_, Value>("fork", ()).await.unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::UnexpectedReply);

    let err = remote.call_object("add", (1,)).await.unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::UnexpectedReply);
}

#[tokio::test]
async fn closed_and_dropped() {
    let (port, inbox) = channel();
    drop(inbox);
    let remote = Remote::wrap(port);
    assert!(remote.port().is_closed());
    let err = remote.call::<_, i64>("add", (1,)).await.unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::Closed);

    let (port, inbox) = channel();
    let serving = expose(Counter::default(), inbox);
    let remote = Remote::wrap(port);
    let pending = tokio::spawn({
        let remote = remote.clone();
        async move { remote.call::<_, ()>("hang", ()).await }
    });
    tokio::task::yield_now().await;
    serving.abort();
    let err = pending.await.unwrap().unwrap_err();
    assert!(matches!(
        err.kind(),
        CallErrorKind::Dropped | CallErrorKind::Closed
    ));
}

#[tokio::test(start_paused = true)]
async fn call_timeout() {
    let remote = exposed();
    let err = remote
        .call_timeout::<_, ()>("hang", (), Duration::from_secs(5))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::Timeout);
}
