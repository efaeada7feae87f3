//! Course and assignment shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier as sent by the API, numeric or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        ResourceId::Number(id)
    }
}

/// A course from the course listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Course {
    pub id: ResourceId,
    #[serde(default)]
    pub name: Option<String>,
}

impl Course {
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Course {}", self.id))
    }
}

/// An assignment as returned by the per-course listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawAssignment {
    pub id: ResourceId,
    #[serde(default)]
    pub name: Option<String>,
    /// ISO 8601 timestamp, absent for undated assignments.
    #[serde(default)]
    pub due_at: Option<String>,
    #[serde(default)]
    pub points_possible: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Normalized assignment handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRecord {
    pub id: ResourceId,
    pub name: String,
    pub course_name: String,
    pub course_id: ResourceId,
    pub due_at: DateTime<Utc>,
    /// Points possible; the assignment's weight.
    pub points_possible: Option<f64>,
    pub description: Option<String>,
}
