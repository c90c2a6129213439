use serde::{Deserialize, Serialize};

/// A single exercise. Exercises are leaves: nothing is hydrated onto them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub instructions: String,
}

/// Scalar fields for an exercise insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExercise {
    pub name: String,
    pub instructions: String,
}
