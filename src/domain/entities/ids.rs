//! Typed entity identifiers.
//!
//! Identifiers are assigned by storage and never change. Each entity gets its own
//! newtype so a `NeighborhoodId` cannot be passed where a `RouteId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identifier of a collection route.
    RouteId
);
entity_id!(
    /// Identifier of a neighborhood.
    NeighborhoodId
);
entity_id!(
    /// Identifier of an ecopoint.
    EcopointId
);
entity_id!(
    /// Identifier of a subscriber.
    SubscriberId
);
entity_id!(
    /// Identifier of a problem report.
    ProblemReportId
);
entity_id!(
    /// Identifier of an administrator.
    AdministratorId
);
