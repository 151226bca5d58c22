//! Type-safe identifier wrappers.
//!
//! Three families of identifiers flow through the scoring engine:
//!
//! - Runtime instances (items, agents, policies) use UUID v7 newtypes so the
//!   host can mint them without coordination.
//! - Scorable definitions (attributes, activities) are resolved once from
//!   their definition names into dense [`u32`] handles by the registries in
//!   `outfit-policy`. Scoring never touches the names again.
//! - Other host definitions (materials, item definitions, body-part groups,
//!   titles, body types) are opaque to the engine and are carried by name.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Generates a dense index handle issued by a definition registry.
macro_rules! define_handle {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw registry index.
            pub const fn from_index(index: u32) -> Self {
                Self(index)
            }

            /// Return the raw registry index.
            pub const fn index(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

/// Generates a name-keyed newtype for a host definition.
macro_rules! define_def {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from a definition name.
            pub fn named(name: &str) -> Self {
                Self(name.to_owned())
            }

            /// Return the definition name.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::named(name)
            }
        }
    };
}

define_id! {
    /// Unique identifier for a concrete item instance (one piece of apparel).
    ItemId
}

define_id! {
    /// Unique identifier for an agent that wears apparel.
    AgentId
}

define_id! {
    /// Unique identifier for an outfit policy.
    PolicyId
}

define_handle! {
    /// Handle of a scorable attribute resolved by the attribute registry.
    AttributeId
}

define_handle! {
    /// Handle of an activity (work category) resolved by the activity registry.
    ActivityId
}

define_def! {
    /// Material an item is made from.
    MaterialId
}

define_def! {
    /// Item definition an instance was created from.
    ItemDefId
}

define_def! {
    /// Group of body parts an item covers.
    BodyPartGroupId
}

define_def! {
    /// Status title an agent may hold.
    TitleId
}

define_def! {
    /// Body type of an agent, used for wear-compatibility checks.
    BodyId
}
