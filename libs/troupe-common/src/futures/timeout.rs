use std::future::IntoFuture;
use std::time::Duration;

use tokio::time;

pub trait FutureTimeoutExt: IntoFuture + Sized {
    fn timeout(self, duration: Duration) -> time::Timeout<Self::IntoFuture> {
        time::timeout(duration, self)
    }
}

impl<F> FutureTimeoutExt for F where F: IntoFuture {}

#[cfg(test)]
mod tests {
    use std::future;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn elapses_on_pending_future() {
        let outcome = future::pending::<()>()
            .timeout(Duration::from_secs(1))
            .await;
        assert!(outcome.is_err());
    }
}
