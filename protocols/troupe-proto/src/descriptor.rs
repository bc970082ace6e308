use std::borrow::Cow;
use std::fmt;

/// A type that can be named across the unit boundary.
///
/// The name is resolved inside the unit against the registry built by its
/// worker module; it must therefore be unique within a module.
pub trait ActorType {
    const TYPE_NAME: &'static str;
}

/// How to construct an actor on the other side: a registered type name, and
/// nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ActorDescriptor {
    pub type_name: Cow<'static, str>,
}

impl ActorDescriptor {
    pub fn new(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    pub fn of<A: ActorType>() -> Self {
        Self::new(A::TYPE_NAME)
    }
}

impl fmt::Display for ActorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor<{}>", self.type_name)
    }
}
