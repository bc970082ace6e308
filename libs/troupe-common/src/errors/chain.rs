use std::fmt;

use crate::types::{AnyError, StdError};

/// Renders an error together with its `source()` chain: `outer << inner`.
pub trait StdErrorDisplayChainExt: StdError + Sized {
    fn as_display_chain(&self) -> impl fmt::Display + fmt::Debug {
        let e: &dyn StdError = self;
        Chain(e)
    }
}

impl<E> StdErrorDisplayChainExt for E where E: StdError {}

pub trait AnyErrorDisplayChainExt {
    fn as_display_chain(&self) -> impl fmt::Display + fmt::Debug;
}

impl AnyErrorDisplayChainExt for AnyError {
    fn as_display_chain(&self) -> impl fmt::Display + fmt::Debug {
        let e: &dyn StdError = self.as_ref();
        Chain(e)
    }
}

struct Chain<'a>(&'a dyn StdError);

impl fmt::Display for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut e = self.0;
        write!(f, "{}", e)?;
        while let Some(source) = e.source() {
            write!(f, " << {}", source)?;
            e = source;
        }
        Ok(())
    }
}

impl fmt::Debug for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
