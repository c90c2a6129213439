use serde::{Deserialize, Serialize};

use crate::models::Exercise;

/// A workout with its exercise list hydrated by the persistence layer.
///
/// `date_completed` is only non-empty when the instance represents a row of a
/// user's completed-workout view; plain listings and favorites leave it `""`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Completion date (`YYYY-MM-DD`) in the completed-workout view, else empty.
    pub date_completed: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// Scalar fields for a workout insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkout {
    pub title: String,
    pub description: String,
}
