//! Course → assignment fan-out.
//!
//! # Responsibilities
//! - Fetch the active course list
//! - Fetch every course's assignments concurrently
//! - Isolate per-course failures (logged, contribute nothing)
//! - Skip individual malformed assignments without losing the rest of the course
//! - Keep only assignments due in the future, normalize, sort by due date

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde_json::Value;
use std::sync::Arc;

use crate::canvas::types::{AssignmentRecord, Course, RawAssignment};
use crate::client::clock::Clock;
use crate::client::error::{FetchError, FetchResult};
use crate::client::fetch::FetchClient;
use crate::config::schema::ApiConfig;
use crate::observability::metrics;

/// Substitute a course id into the assignments endpoint template.
pub fn assignments_endpoint(template: &str, course: &Course) -> String {
    template.replace("{course_id}", &course.id.to_string())
}

/// Issues the course and assignment fetches for one instance.
#[derive(Debug, Clone)]
pub struct AssignmentAggregator {
    client: FetchClient,
    api: ApiConfig,
    clock: Arc<dyn Clock>,
}

impl AssignmentAggregator {
    /// Uses the client's cache clock as the reference for due dates.
    pub fn new(client: FetchClient, api: ApiConfig) -> Self {
        let clock = client.cache().clock().clone();
        Self { client, api, clock }
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    /// Fetch the active course list. Errors propagate.
    pub async fn fetch_courses(&self, base_url: &str, credential: &str) -> FetchResult<Vec<Course>> {
        let payload = self
            .client
            .fetch(&self.api.courses_endpoint, base_url, credential)
            .await?;
        serde_json::from_value(payload)
            .map_err(|e| FetchError::UnexpectedPayload(format!("course list: {}", e)))
    }

    /// Fetch all upcoming assignments across active courses, sorted by due date.
    pub async fn fetch_assignments(
        &self,
        base_url: &str,
        credential: &str,
    ) -> FetchResult<Vec<AssignmentRecord>> {
        let now = self.clock.now();
        let courses = self.fetch_courses(base_url, credential).await?;
        tracing::info!(courses = courses.len(), "Fetching assignments for courses");

        let branches = courses.into_iter().map(|course| async move {
            let assignments = match self.course_assignments(&course, base_url, credential).await {
                Ok(assignments) => assignments,
                Err(e) => {
                    metrics::record_branch_failure();
                    tracing::warn!(
                        course_id = %course.id,
                        error = %e,
                        "Failed to fetch assignments for course, skipping"
                    );
                    Vec::new()
                }
            };
            (course, assignments)
        });
        let batches = join_all(branches).await;

        let records = normalize_assignments(batches, now);
        tracing::info!(assignments = records.len(), "Upcoming assignments collected");
        Ok(records)
    }

    async fn course_assignments(
        &self,
        course: &Course,
        base_url: &str,
        credential: &str,
    ) -> FetchResult<Vec<RawAssignment>> {
        let endpoint = assignments_endpoint(&self.api.assignments_endpoint, course);
        let payload = self.client.fetch(&endpoint, base_url, credential).await?;
        let items: Vec<Value> = serde_json::from_value(payload).map_err(|e| {
            FetchError::UnexpectedPayload(format!("assignments for course {}: {}", course.id, e))
        })?;
        Ok(parse_assignments(course, items))
    }
}

/// Fetch upcoming assignments with the default endpoint paths.
pub async fn fetch_assignments(
    client: &FetchClient,
    base_url: &str,
    credential: &str,
) -> FetchResult<Vec<AssignmentRecord>> {
    AssignmentAggregator::new(client.clone(), ApiConfig::default())
        .fetch_assignments(base_url, credential)
        .await
}

/// Decode each item on its own; malformed items are logged and skipped.
fn parse_assignments(course: &Course, items: Vec<Value>) -> Vec<RawAssignment> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawAssignment>(item) {
            Ok(raw) => Some(raw),
            Err(e) => {
                tracing::warn!(course_id = %course.id, error = %e, "Skipping malformed assignment");
                None
            }
        })
        .collect()
}

/// Parse an RFC 3339 due date.
fn parse_due(due_at: Option<&str>) -> Option<DateTime<Utc>> {
    due_at
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
}

/// Flatten per-course batches, drop undated or past-due items, project and sort.
pub fn normalize_assignments(
    batches: Vec<(Course, Vec<RawAssignment>)>,
    now: DateTime<Utc>,
) -> Vec<AssignmentRecord> {
    let mut records: Vec<AssignmentRecord> = batches
        .into_iter()
        .flat_map(|(course, assignments)| {
            let course_name = course.display_name();
            assignments.into_iter().filter_map(move |raw| {
                let due_at = parse_due(raw.due_at.as_deref()).filter(|due| *due > now)?;
                Some(AssignmentRecord {
                    name: raw
                        .name
                        .unwrap_or_else(|| format!("Assignment {}", raw.id)),
                    id: raw.id,
                    course_name: course_name.clone(),
                    course_id: course.id.clone(),
                    due_at,
                    points_possible: raw.points_possible,
                    description: raw.description,
                })
            })
        })
        .collect();

    records.sort_by_key(|r| r.due_at);
    records
}
