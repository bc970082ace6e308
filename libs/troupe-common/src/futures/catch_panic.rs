use std::future::Future;
use std::panic;
use std::pin::Pin;
use std::task::{Context, Poll};

/// The panic payload, rendered as text when it was a string.
pub type PanicMessage = Box<str>;

pub trait CatchPanicExt: Future + Sized {
    fn catch_panic(self) -> CatchPanic<Self> {
        CatchPanic(self)
    }
}

impl<F> CatchPanicExt for F where F: Future + Sized {}

/// Resolves to `Err` instead of unwinding when the inner future panics.
#[pin_project::pin_project]
pub struct CatchPanic<F>(#[pin] F);

impl<F> Future for CatchPanic<F>
where
    F: Future,
{
    type Output = Result<F::Output, PanicMessage>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let inner = self.project().0;
        match panic::catch_unwind(panic::AssertUnwindSafe(|| inner.poll(cx))) {
            Ok(Poll::Pending) => Poll::Pending,
            Ok(Poll::Ready(output)) => Poll::Ready(Ok(output)),
            Err(payload) => {
                let message: PanicMessage = if let Some(s) = payload.downcast_ref::<&'static str>() {
                    (*s).into()
                } else if let Ok(s) = payload.downcast::<String>() {
                    (*s).into()
                } else {
                    "<non-string panic payload>".into()
                };
                Poll::Ready(Err(message))
            },
        }
    }
}
