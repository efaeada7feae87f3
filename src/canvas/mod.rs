//! Canvas course/assignment aggregation.
//!
//! # Data Flow
//! ```text
//! fetch_assignments(base_url, credential)
//!     → FetchClient::fetch(courses endpoint)          (errors propagate)
//!     → join_all(FetchClient::fetch(assignments of c)) (errors → empty batch)
//!     → normalize_assignments (filter due > now, project, sort)
//! ```

pub mod aggregate;
pub mod types;

pub use aggregate::{fetch_assignments, normalize_assignments, AssignmentAggregator};
pub use types::{AssignmentRecord, Course, RawAssignment, ResourceId};
