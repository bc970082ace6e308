use std::sync::Arc;

use crate::errors::error_kind::{ErrorKind, HasErrorKind};

/// A kind plus a human-readable message.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}: {}", kind, message)]
pub struct ErrorOf<Kind: ErrorKind> {
    pub kind:    Kind,
    pub message: Arc<str>,
}

impl<K: ErrorKind> ErrorOf<K> {
    pub fn new(kind: K, message: impl Into<Arc<str>>) -> Self {
        let message = message.into();
        Self { kind, message }
    }

    pub fn map_kind<K1>(self, map: impl FnOnce(K) -> K1) -> ErrorOf<K1>
    where
        K1: ErrorKind,
    {
        let ErrorOf { kind, message } = self;
        ErrorOf {
            kind: map(kind),
            message,
        }
    }
}

impl<Kind: ErrorKind> HasErrorKind<Kind> for ErrorOf<Kind> {
    fn kind(&self) -> Kind {
        self.kind
    }
}
