use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use serde_json::Value;
use troupe::actor::{
    Actor, ActorType, CallErrorKind, Constructible, Fault, FaultKind, decode_args, encode_value,
};
use troupe::common::error::{AnyError, HasErrorKind};
use troupe::common::future::FutureTimeoutExt;
use troupe::logger::{LoggingConfig, init as init_logging};
use troupe::placement::{PoolConfig, SpawnError, Strategy};
use troupe::{SpawnOptions, Spawner, StrategyOptions, WorkerModule};

#[derive(Default)]
struct Tally {
    entries: Vec<String>,
}

impl ActorType for Tally {
    const TYPE_NAME: &'static str = "tally";
}

impl Constructible for Tally {
    fn construct() -> Result<Self, AnyError> {
        Ok(Default::default())
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
struct Summary {
    count: usize,
    last:  Option<String>,
    on:    Option<String>,
}

impl Actor for Tally {
    fn invoke<'a>(&'a mut self, method: &'a str, args: Value) -> BoxFuture<'a, Result<Value, Fault>> {
        async move {
            match method {
                "push" => {
                    let (entry,): (String,) = decode_args(args)?;
                    self.entries.push(entry);
                    encode_value(&self.entries.len())
                },
                "summary" => {
                    encode_value(&Summary {
                        count: self.entries.len(),
                        last:  self.entries.last().cloned(),
                        on:    std::thread::current().name().map(ToOwned::to_owned),
                    })
                },
                "nap" => {
                    let (millis,): (u64,) = decode_args(args)?;
                    tokio::time::sleep(Duration::from_millis(millis)).await;
                    encode_value(&())
                },
                "fail" => Err(Fault::failed("asked to fail")),
                "panic" => panic!("asked to panic"),
                _ => Err(Fault::unknown_method(method)),
            }
        }
        .boxed()
    }
}

struct Ghost;

impl ActorType for Ghost {
    const TYPE_NAME: &'static str = "ghost";
}

fn spawner(config: &str) -> Spawner {
    let _ = init_logging(&LoggingConfig::default());
    let config: PoolConfig = serde_yaml::from_str(config).expect("parse-config error");
    Spawner::new(config.into_options(WorkerModule::new("facade-tests").with_actor::<Tally>()))
}

#[tokio::test]
async fn spawn_through_the_facade() {
    let spawner = spawner(
        r#"
            max_num_workers: 3
            unit:
              thread_name_prefix: tally
        "#,
    );

    let mut tallies = vec![];
    for _ in 0..6 {
        tallies.push(
            troupe::spawn::<Tally>(&spawner, &SpawnOptions::default())
                .await
                .expect("spawn"),
        );
    }
    let units = tallies.iter().map(|t| t.unit_id()).collect::<BTreeSet<_>>();
    assert_eq!(units.len(), 3);
    for (i, tally) in tallies.iter().enumerate() {
        assert_eq!(tally.unit_id(), tallies[i % 3].unit_id());
    }

    for (i, tally) in tallies.iter().enumerate() {
        for j in 0..=i {
            let _: usize = tally.call("push", (format!("{}-{}", i, j),)).await.unwrap();
        }
    }
    for (i, tally) in tallies.iter().enumerate() {
        let summary: Summary = tally.call("summary", ()).await.unwrap();
        assert_eq!(summary.count, i + 1);
        assert_eq!(summary.last, Some(format!("{}-{}", i, i)));
        assert!(summary.on.unwrap().starts_with("tally-"));
    }

    spawner.terminate().await;
    assert!(spawner.strategy().terminated());
}

#[tokio::test]
async fn calls_on_different_units_run_in_parallel() {
    let spawner = spawner("max_num_workers: 2");
    let a = troupe::spawn::<Tally>(&spawner, &SpawnOptions::default())
        .await
        .unwrap();
    let b = troupe::spawn::<Tally>(&spawner, &SpawnOptions::default())
        .await
        .unwrap();
    assert_ne!(a.unit_id(), b.unit_id());

    let started = tokio::time::Instant::now();
    let (ra, rb) = future::join(
        a.call::<_, ()>("nap", (300,)),
        b.call::<_, ()>("nap", (300,)),
    )
    .await;
    ra.unwrap();
    rb.unwrap();
    assert!(started.elapsed() < Duration::from_millis(590));

    spawner.terminate().await;
}

#[tokio::test]
async fn actor_failures_are_reported_not_fatal() {
    let spawner = spawner("{}");
    let tally = troupe::spawn::<Tally>(&spawner, &SpawnOptions::default())
        .await
        .unwrap();

    let err = tally.call::<_, ()>("fail", ()).await.unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::Fault(FaultKind::Failed));

    let err = tally.call::<_, ()>("panic", ()).await.unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::Fault(FaultKind::Panicked));

    let err = tally.call::<_, ()>("frobnicate", ()).await.unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::Fault(FaultKind::UnknownMethod));

    assert_eq!(tally.call::<_, usize>("push", ("still here",)).await.unwrap(), 1);

    let err = tally
        .call_timeout::<_, ()>("nap", (10_000,), Duration::from_millis(50))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::Timeout);

    spawner.terminate().await;
}

#[tokio::test]
async fn unknown_actors_and_materialize_timeout() {
    let spawner = spawner("max_num_workers: 1");

    let err = troupe::spawn::<Ghost>(&spawner, &SpawnOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SpawnError::Materialization(ref fault) if fault.kind == FaultKind::Materialization));

    let opts = SpawnOptions {
        materialize_timeout: Some(Duration::from_secs(10)),
    };
    let tally = troupe::spawn::<Tally>(&spawner, &opts).await.unwrap();
    assert_eq!(tally.call::<_, usize>("push", ("x",)).await.unwrap(), 1);

    spawner.terminate().await;
}

static DROPPED: AtomicUsize = AtomicUsize::new(0);

struct Mayfly;

impl ActorType for Mayfly {
    const TYPE_NAME: &'static str = "mayfly";
}

impl Constructible for Mayfly {
    fn construct() -> Result<Self, AnyError> {
        Ok(Self)
    }
}

impl Actor for Mayfly {
    fn invoke<'a>(&'a mut self, method: &'a str, _args: Value) -> BoxFuture<'a, Result<Value, Fault>> {
        async move {
            match method {
                "ping" => encode_value("pong"),
                _ => Err(Fault::unknown_method(method)),
            }
        }
        .boxed()
    }
}

impl Drop for Mayfly {
    fn drop(&mut self) {
        DROPPED.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn dropping_every_proxy_drops_the_actor() {
    let _ = init_logging(&LoggingConfig::default());
    let spawner = Spawner::new(
        StrategyOptions::default()
            .with_worker_module(WorkerModule::new("mayflies").with_actor::<Mayfly>()),
    );
    let mayfly = troupe::spawn::<Mayfly>(&spawner, &SpawnOptions::default())
        .await
        .unwrap();
    let twin = mayfly.clone();
    assert_eq!(twin.call::<_, String>("ping", ()).await.unwrap(), "pong");

    drop(mayfly);
    assert_eq!(twin.call::<_, String>("ping", ()).await.unwrap(), "pong");
    assert_eq!(DROPPED.load(Ordering::SeqCst), 0);

    drop(twin);
    async {
        while DROPPED.load(Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
    .timeout(Duration::from_secs(5))
    .await
    .expect("the actor outlived its proxies");

    // the unit is unaffected
    let again = troupe::spawn::<Mayfly>(&spawner, &SpawnOptions::default())
        .await
        .unwrap();
    assert_eq!(again.call::<_, String>("ping", ()).await.unwrap(), "pong");
    spawner.terminate().await;
}
