//! Strongly-typed identifiers wrapping UUID v7 (time-sortable).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new id using UUID v7.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a user account.
    UserId
);
entity_id!(
    /// Unique identifier for an agent record.
    AgentId
);
entity_id!(
    /// Unique identifier for a tool record.
    ToolId
);
entity_id!(
    /// Unique identifier for a problem log entry.
    ProblemId
);
entity_id!(
    /// Unique identifier for an issued bearer token.
    TokenId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_parse() {
        let id = AgentId::new();
        let parsed: AgentId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }

    #[test]
    fn test_invalid_id_rejected() {
        assert!("not-a-uuid".parse::<ToolId>().is_err());
    }

    #[test]
    fn test_ids_are_time_sortable() {
        let first = ProblemId::new();
        let second = ProblemId::new();
        assert!(first.0 <= second.0);
    }
}
