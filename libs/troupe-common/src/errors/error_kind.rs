use std::fmt;

use crate::types::Never;

/// An error that can tell what kind of failure it carries.
pub trait HasErrorKind<Kind: ErrorKind> {
    fn kind(&self) -> Kind;
}

pub trait ErrorKind: fmt::Debug + fmt::Display + Eq + Copy + Send + Sync + 'static {}

impl<K> ErrorKind for K where K: fmt::Debug + fmt::Display + Eq + Copy + Send + Sync + 'static {}

impl<AnyKind> HasErrorKind<AnyKind> for Never
where
    AnyKind: ErrorKind,
{
    fn kind(&self) -> AnyKind {
        match *self {}
    }
}

/// Turns a field-less `Copy` enum into an error kind: `Display` delegates to
/// `Debug`, and the kind is its own `HasErrorKind`.
#[macro_export]
macro_rules! impl_error_kind {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Debug::fmt(self, f)
            }
        }
        impl std::error::Error for $ty {}
        impl $crate::errors::error_kind::HasErrorKind<Self> for $ty {
            fn kind(&self) -> Self {
                *self
            }
        }
    };
}
