use std::sync::Arc;

use sqlx::PgPool;
use tracing::error;

use crate::models::{Exercise, Workout};
use crate::persistence::mapper::{
    completed_workout_from_row, exercise_from_row, map_rows, workout_from_row,
};
use crate::persistence::queries::Queries;
use crate::persistence::PersistenceError;

/// Materializes the child side of each relationship for one parent id.
///
/// All public methods absorb query failures: the failure is logged and the
/// caller sees an empty `Vec`, exactly as it would for a parent with no
/// children. The log is the only place the two cases differ.
#[derive(Clone)]
pub struct RelationshipLoader {
    db: PgPool,
    queries: Arc<Queries>,
}

impl RelationshipLoader {
    pub fn new(db: PgPool, queries: Arc<Queries>) -> Self {
        Self { db, queries }
    }

    /// Exercises linked to the workout through `workout_exercises`, in
    /// query order.
    pub async fn exercises_for_workout(&self, workout_id: i64) -> Vec<Exercise> {
        match self.try_exercises_for_workout(workout_id).await {
            Ok(exercises) => exercises,
            Err(e) => {
                error!(workout_id, error = %e, "failed to load exercises for workout");
                Vec::new()
            }
        }
    }

    /// Workouts the user has favorited, each fully hydrated with its
    /// exercises. `date_completed` stays empty on these.
    pub async fn favorite_workouts(&self, user_id: i64) -> Vec<Workout> {
        match self.try_favorite_workouts(user_id).await {
            Ok(workouts) => workouts,
            Err(e) => {
                error!(user_id, error = %e, "failed to load favorite workouts");
                Vec::new()
            }
        }
    }

    /// Workouts the user has completed, each carrying the completion date
    /// from the join row and fully hydrated with its exercises.
    pub async fn completed_workouts(&self, user_id: i64) -> Vec<Workout> {
        match self.try_completed_workouts(user_id).await {
            Ok(workouts) => workouts,
            Err(e) => {
                error!(user_id, error = %e, "failed to load completed workouts");
                Vec::new()
            }
        }
    }

    async fn try_exercises_for_workout(
        &self,
        workout_id: i64,
    ) -> Result<Vec<Exercise>, PersistenceError> {
        let rows = sqlx::query(self.queries.select_workout_exercises)
            .bind(workout_id)
            .fetch_all(&self.db)
            .await?;
        map_rows(&rows, exercise_from_row)
    }

    async fn try_favorite_workouts(&self, user_id: i64) -> Result<Vec<Workout>, PersistenceError> {
        let rows = sqlx::query(self.queries.select_user_favorites)
            .bind(user_id)
            .fetch_all(&self.db)
            .await?;
        let mut workouts = map_rows(&rows, workout_from_row)?;
        self.hydrate_exercises(&mut workouts).await;
        Ok(workouts)
    }

    async fn try_completed_workouts(&self, user_id: i64) -> Result<Vec<Workout>, PersistenceError> {
        let rows = sqlx::query(self.queries.select_user_completed)
            .bind(user_id)
            .fetch_all(&self.db)
            .await?;
        let mut workouts = map_rows(&rows, completed_workout_from_row)?;
        self.hydrate_exercises(&mut workouts).await;
        Ok(workouts)
    }

    /// One fan-out query per workout. A failed fan-out leaves that workout
    /// with no exercises and is logged by `exercises_for_workout`.
    pub(crate) async fn hydrate_exercises(&self, workouts: &mut [Workout]) {
        for workout in workouts {
            workout.exercises = self.exercises_for_workout(workout.id).await;
        }
    }
}
