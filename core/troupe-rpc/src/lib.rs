// #![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]

//! An asynchronous call/response channel.
//!
//! One side [`expose`]s a [`Handler`] on an [`Inbox`]; the other side wraps the
//! matching [`Port`] into a [`Remote`] and awaits calls on it. A handler may
//! reply with another handler ([`Reply::Object`]), which gets exposed on a
//! fresh channel and travels back to the caller as a new [`Port`].
//!
//! Arguments and results are `serde_json::Value`s: owned data, moved between
//! threads, never shared.

mod channel;
mod codec;
mod expose;
mod remote;

pub use channel::{Inbox, Port, channel};
pub use codec::{decode_args, encode_value};
pub use expose::{Handler, Reply, expose};
pub use remote::{CallError, CallErrorKind, Remote, fault_of};
