//! Small enums shared by the data warehouse records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;

/// Lifecycle state of a data cluster as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataClusterState {
    Pending,
    Available,
    Rebooting,
    Resizing,
    Modifying,
    Deleting,
    Deleted,
    Failed,
    /// The provider reported a state with no mapping.
    Unknown,
}

impl DataClusterState {
    const ALL: [DataClusterState; 9] = [
        DataClusterState::Pending,
        DataClusterState::Available,
        DataClusterState::Rebooting,
        DataClusterState::Resizing,
        DataClusterState::Modifying,
        DataClusterState::Deleting,
        DataClusterState::Deleted,
        DataClusterState::Failed,
        DataClusterState::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataClusterState::Pending => "PENDING",
            DataClusterState::Available => "AVAILABLE",
            DataClusterState::Rebooting => "REBOOTING",
            DataClusterState::Resizing => "RESIZING",
            DataClusterState::Modifying => "MODIFYING",
            DataClusterState::Deleting => "DELETING",
            DataClusterState::Deleted => "DELETED",
            DataClusterState::Failed => "FAILED",
            DataClusterState::Unknown => "UNKNOWN",
        }
    }

    /// Returns true once the cluster can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DataClusterState::Deleted | DataClusterState::Failed)
    }

    /// Returns true if the cluster accepts client connections.
    pub fn is_usable(&self) -> bool {
        matches!(
            self,
            DataClusterState::Available | DataClusterState::Resizing | DataClusterState::Modifying
        )
    }
}

impl fmt::Display for DataClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataClusterState {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataClusterState::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("data cluster state", s))
    }
}

/// Protocols a data cluster exposes for client connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterQueryProtocol {
    Jdbc,
    Odbc,
    /// PostgreSQL wire protocol.
    Psql,
    /// A vendor-specific client protocol.
    Native,
}

impl ClusterQueryProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterQueryProtocol::Jdbc => "JDBC",
            ClusterQueryProtocol::Odbc => "ODBC",
            ClusterQueryProtocol::Psql => "PSQL",
            ClusterQueryProtocol::Native => "NATIVE",
        }
    }
}

impl fmt::Display for ClusterQueryProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusterQueryProtocol {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            ClusterQueryProtocol::Jdbc,
            ClusterQueryProtocol::Odbc,
            ClusterQueryProtocol::Psql,
            ClusterQueryProtocol::Native,
        ]
        .into_iter()
        .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| ParseEnumError::new("query protocol", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_parse_and_display() {
        for state in DataClusterState::ALL {
            assert_eq!(state.to_string().parse::<DataClusterState>().unwrap(), state);
        }
        assert_eq!(
            "available".parse::<DataClusterState>().unwrap(),
            DataClusterState::Available
        );
    }

    #[test]
    fn test_state_parse_error() {
        let err = "melting".parse::<DataClusterState>().unwrap_err();
        assert_eq!(err.to_string(), "unknown data cluster state: melting");
    }

    #[test]
    fn test_state_predicates() {
        assert!(DataClusterState::Deleted.is_terminal());
        assert!(DataClusterState::Failed.is_terminal());
        assert!(!DataClusterState::Available.is_terminal());
        assert!(DataClusterState::Available.is_usable());
        assert!(!DataClusterState::Pending.is_usable());
    }

    #[test]
    fn test_protocol_parse() {
        assert_eq!(
            " jdbc ".parse::<ClusterQueryProtocol>().unwrap(),
            ClusterQueryProtocol::Jdbc
        );
        assert!("ftp".parse::<ClusterQueryProtocol>().is_err());
    }

    #[test]
    fn test_protocol_serde_names() {
        let json = serde_json::to_string(&ClusterQueryProtocol::Odbc).unwrap();
        assert_eq!(json, "\"ODBC\"");
        let state: DataClusterState = serde_json::from_str("\"REBOOTING\"").unwrap();
        assert_eq!(state, DataClusterState::Rebooting);
    }
}
