//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `CustomerId` where a
//! `TransactionId` is expected. IDs are opaque strings rather than raw UUIDs:
//! the CSV backup format must round-trip caller-supplied identifiers exactly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Wraps an existing identifier.
            #[must_use]
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the identifier is empty.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

typed_id!(TeamId, "Unique identifier for a team.");
typed_id!(UserId, "Unique identifier for a user.");
typed_id!(CustomerId, "Unique identifier for a customer.");
typed_id!(TransactionId, "Unique identifier for a transaction.");
typed_id!(PaymentId, "Unique identifier for a payment.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(CustomerId::new(), CustomerId::new());
        assert_ne!(TransactionId::new(), TransactionId::new());
    }

    #[test]
    fn test_round_trips_caller_supplied_value() {
        let id = CustomerId::from_string("legacy-0042");
        assert_eq!(id.as_str(), "legacy-0042");
        assert_eq!(id.to_string(), "legacy-0042");
    }

    #[test]
    fn test_empty_detection() {
        assert!(CustomerId::from_string("").is_empty());
        assert!(!CustomerId::new().is_empty());
    }

    #[test]
    fn test_serde_transparent() {
        let id = PaymentId::from_string("p-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"p-1\"");
        let back: PaymentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
