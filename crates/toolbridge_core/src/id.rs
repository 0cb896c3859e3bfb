//! Identifiers for stored toolbridge records.
//!
//! Records live in a relational store, so every id is the store's `i64`
//! primary key wrapped in a newtype to keep the kinds apart.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store key
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the raw store key
            #[must_use]
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Application identifier - owns interfaces and custom types
    AppId,
    "app"
);

define_id!(
    /// Custom type identifier
    TypeId,
    "type"
);

define_id!(
    /// Custom type field identifier
    FieldId,
    "field"
);

define_id!(
    /// Interface identifier - one described HTTP endpoint
    InterfaceId,
    "iface"
);

define_id!(
    /// Interface parameter identifier
    ParameterId,
    "param"
);
