//! Team - Competitor records supplied by the caller

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Stable team identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        TeamId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        TeamId(s.to_string())
    }
}

impl From<String> for TeamId {
    fn from(s: String) -> Self {
        TeamId(s)
    }
}

/// Strength ranking, lower is stronger. Any JSON number is accepted,
/// including fractional and negative values.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(pub f64);

impl Seed {
    pub fn value(&self) -> f64 {
        self.0
    }
}

// Total order so seeds can be sorted and compared even when NaN slips in
impl PartialEq for Seed {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Seed {}

impl PartialOrd for Seed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Seed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<u32> for Seed {
    fn from(seed: u32) -> Self {
        Seed(f64::from(seed))
    }
}

impl From<i32> for Seed {
    fn from(seed: i32) -> Self {
        Seed(f64::from(seed))
    }
}

impl From<f64> for Seed {
    fn from(seed: f64) -> Self {
        Seed(seed)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A competitor. The engine only ever references teams, it never edits them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<Seed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_label: Option<String>,
}

impl Team {
    /// Create an unseeded team
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: TeamId(id.into()),
            name: name.into(),
            seed: None,
            custom_label: None,
        }
    }

    /// Set the seed
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Set a display label overriding the name
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.custom_label = Some(label.into());
        self
    }

    /// Label if present, otherwise the name
    pub fn display_name(&self) -> &str {
        self.custom_label.as_deref().unwrap_or(&self.name)
    }
}
