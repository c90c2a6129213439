use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::error;

use crate::models::{CreateExercise, CreateUser, CreateWorkout};
use crate::persistence::queries::Queries;
use crate::persistence::PersistenceError;

/// Single-statement writes. Entity inserts hand back the store-assigned id
/// (`INSERT ... RETURNING id`); link inserts report success. Failures are
/// logged here and collapse to `None`/`false` — callers never learn the
/// cause, and nothing is rolled back because nothing spans two statements.
#[derive(Clone)]
pub struct WriteGateway {
    db: PgPool,
    queries: Arc<Queries>,
}

impl WriteGateway {
    pub fn new(db: PgPool, queries: Arc<Queries>) -> Self {
        Self { db, queries }
    }

    pub async fn insert_user(&self, user: &CreateUser) -> Option<i64> {
        match self.try_insert_user(user).await {
            Ok(id) => Some(id),
            Err(e) => {
                error!(error = %e, "user insert failed");
                None
            }
        }
    }

    pub async fn insert_workout(&self, workout: &CreateWorkout) -> Option<i64> {
        match self.try_insert_workout(workout).await {
            Ok(id) => Some(id),
            Err(e) => {
                error!(error = %e, "workout insert failed");
                None
            }
        }
    }

    pub async fn insert_exercise(&self, exercise: &CreateExercise) -> Option<i64> {
        match self.try_insert_exercise(exercise).await {
            Ok(id) => Some(id),
            Err(e) => {
                error!(error = %e, "exercise insert failed");
                None
            }
        }
    }

    pub async fn link_workout_exercise(&self, workout_id: i64, exercise_id: i64) -> bool {
        match self
            .try_link(self.queries.insert_workout_exercise, workout_id, exercise_id)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                error!(workout_id, exercise_id, error = %e, "workout-exercise link failed");
                false
            }
        }
    }

    pub async fn link_user_favorite_workout(&self, user_id: i64, workout_id: i64) -> bool {
        match self
            .try_link(self.queries.insert_user_favorite_workout, user_id, workout_id)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                error!(user_id, workout_id, error = %e, "favorite-workout link failed");
                false
            }
        }
    }

    async fn try_insert_user(&self, user: &CreateUser) -> Result<i64, PersistenceError> {
        let row = sqlx::query(self.queries.insert_user)
            .bind(&user.first_name)
            .bind(&user.middle_name)
            .bind(&user.last_name)
            .bind(parse_date(&user.birthday)?)
            .bind(&user.gender)
            .fetch_one(&self.db)
            .await?;
        generated_id(&row)
    }

    async fn try_insert_workout(&self, workout: &CreateWorkout) -> Result<i64, PersistenceError> {
        let row = sqlx::query(self.queries.insert_workout)
            .bind(&workout.title)
            .bind(&workout.description)
            .fetch_one(&self.db)
            .await?;
        generated_id(&row)
    }

    async fn try_insert_exercise(&self, exercise: &CreateExercise) -> Result<i64, PersistenceError> {
        let row = sqlx::query(self.queries.insert_exercise)
            .bind(&exercise.name)
            .bind(&exercise.instructions)
            .fetch_one(&self.db)
            .await?;
        generated_id(&row)
    }

    async fn try_link(
        &self,
        query: &str,
        left_id: i64,
        right_id: i64,
    ) -> Result<(), PersistenceError> {
        sqlx::query(query)
            .bind(left_id)
            .bind(right_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

fn generated_id(row: &PgRow) -> Result<i64, PersistenceError> {
    Ok(row.try_get(0)?)
}

fn parse_date(value: &str) -> Result<NaiveDate, PersistenceError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| PersistenceError::InvalidDate(value.to_string()))
}
