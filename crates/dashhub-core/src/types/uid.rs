//! Newtype wrappers around backend-assigned UID strings.
//!
//! Using distinct types prevents accidentally passing a `DashboardUid`
//! where a `FolderUid` is expected. UIDs are opaque strings minted by the
//! backend; the client never generates one, so these types deliberately
//! offer no random constructor — only conversions from existing strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype UID wrapper around `String`.
macro_rules! define_uid {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Return the UID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner string.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<$name> for String {
            fn from(uid: $name) -> String {
                uid.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_uid!(
    /// Unique identifier for a folder.
    FolderUid
);

define_uid!(
    /// Unique identifier for a dashboard.
    DashboardUid
);

define_uid!(
    /// Unique identifier for a panel within a dashboard.
    PanelUid
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        let uid = FolderUid::from("gen-folder-1");
        assert_eq!(uid.to_string(), "gen-folder-1");
        assert_eq!(uid.as_str(), "gen-folder-1");
    }

    #[test]
    fn test_from_str() {
        let uid: DashboardUid = "db-42".parse().expect("infallible");
        assert_eq!(uid, DashboardUid::from("db-42"));
    }

    #[test]
    fn test_serde_transparent() {
        let uid = PanelUid::from("panel-7");
        let json = serde_json::to_string(&uid).expect("serialize");
        assert_eq!(json, "\"panel-7\"");
        let parsed: PanelUid = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(uid, parsed);
    }
}
