use std::fmt;

use troupe_common::errors::error_kind::HasErrorKind;
use troupe_common::impl_error_kind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    UnknownMethod,
    BadArguments,
    Materialization,
    Failed,
    Panicked,
}

impl_error_kind!(FaultKind);

/// A failure raised on the remote side of a call and sent back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
#[error("{}: {}", kind, message)]
pub struct Fault {
    pub kind:    FaultKind,
    pub message: String,
}

impl Fault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unknown_method(method: &str) -> Self {
        Self::new(FaultKind::UnknownMethod, format!("no such method: {:?}", method))
    }

    pub fn bad_arguments(reason: impl fmt::Display) -> Self {
        Self::new(FaultKind::BadArguments, reason.to_string())
    }

    pub fn failed(reason: impl fmt::Display) -> Self {
        Self::new(FaultKind::Failed, reason.to_string())
    }
}

impl HasErrorKind<FaultKind> for Fault {
    fn kind(&self) -> FaultKind {
        self.kind
    }
}
