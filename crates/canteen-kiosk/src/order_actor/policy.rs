use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// How the order collection treats status changes outside the transition table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Reject them.
    #[default]
    Strict,
    /// Write them anyway and log a warning.
    Unchecked,
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(TransitionPolicy::Strict),
            "unchecked" => Ok(TransitionPolicy::Unchecked),
            other => Err(format!("expected strict or unchecked, got {other:?}")),
        }
    }
}

impl Display for TransitionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionPolicy::Strict => f.write_str("strict"),
            TransitionPolicy::Unchecked => f.write_str("unchecked"),
        }
    }
}
