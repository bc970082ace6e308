pub type Never = std::convert::Infallible;
pub type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub use std::error::Error as StdError;
