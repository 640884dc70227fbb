//! Typed IDs for type-safe entity references.
//!
//! Asset identifiers are handed to unauthenticated clients, so they are
//! random (UUID v4) rather than time-ordered: knowing one id must not make
//! its neighbours guessable.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
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

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(AssetId, "Unique identifier for an asset.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_asset_id_is_random_v4() {
        let id = AssetId::new();
        assert_eq!(id.into_inner().get_version_num(), 4);
        assert_ne!(AssetId::new(), AssetId::new());
    }

    #[test]
    fn test_asset_id_display_matches_uuid() {
        let uuid = Uuid::new_v4();
        let id = AssetId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn test_asset_id_from_str() {
        let id = AssetId::from_str("9784c04d-598c-4e69-87f6-0f2eae377fba").expect("valid uuid");
        assert_eq!(id.to_string(), "9784c04d-598c-4e69-87f6-0f2eae377fba");

        assert!(AssetId::from_str("not-a-uuid").is_err());
        assert!(AssetId::from_str("").is_err());
    }

    #[test]
    fn test_asset_id_serde_transparent() {
        let id = AssetId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{id}\""));
        let back: AssetId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
