//! Correlation identifier for comparison runs
//!
//! A `RunId` ties together every log event and error produced by a single
//! folder comparison. It is never written into exported documents, so
//! export output stays byte-identical across runs.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Time-ordered (UUIDv7) identifier of one comparison run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_runs_sort_after_earlier_ones() {
        let first = RunId::new();
        let second = RunId::new();
        assert_ne!(first, second);
        assert!(first <= second);
    }

    #[test]
    fn test_display_parses_back() {
        let id = RunId::new();
        let parsed: RunId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-run".parse::<RunId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = RunId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        assert_eq!(serde_json::from_str::<RunId>(&json).unwrap(), id);
    }
}
