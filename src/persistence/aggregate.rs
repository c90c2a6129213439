use std::sync::Arc;

use sqlx::PgPool;
use tracing::error;

use crate::models::{Exercise, User, Workout};
use crate::persistence::loader::RelationshipLoader;
use crate::persistence::mapper::{exercise_from_row, map_rows, user_from_row, workout_from_row};
use crate::persistence::queries::Queries;
use crate::persistence::PersistenceError;

/// Builds the fully nested object graphs callers expect, one flat query
/// plus one fan-out query per relationship per parent. The three reads are
/// independent of one another.
#[derive(Clone)]
pub struct AggregateBuilder {
    db: PgPool,
    queries: Arc<Queries>,
    loader: RelationshipLoader,
}

impl AggregateBuilder {
    pub fn new(db: PgPool, queries: Arc<Queries>, loader: RelationshipLoader) -> Self {
        Self { db, queries, loader }
    }

    /// All users, each with completed and favorite workouts attached.
    pub async fn all_users(&self) -> Vec<User> {
        let mut users = match self.try_all_users().await {
            Ok(users) => users,
            Err(e) => {
                error!(error = %e, "failed to load users");
                return Vec::new();
            }
        };
        for user in &mut users {
            user.completed_workouts = self.loader.completed_workouts(user.id).await;
            user.favorite_workouts = self.loader.favorite_workouts(user.id).await;
        }
        users
    }

    /// All workouts, each with its exercises attached.
    pub async fn all_workouts(&self) -> Vec<Workout> {
        let mut workouts = match self.try_all_workouts().await {
            Ok(workouts) => workouts,
            Err(e) => {
                error!(error = %e, "failed to load workouts");
                return Vec::new();
            }
        };
        self.loader.hydrate_exercises(&mut workouts).await;
        workouts
    }

    /// All exercises. Leaves, so nothing further to hydrate.
    pub async fn all_exercises(&self) -> Vec<Exercise> {
        match self.try_all_exercises().await {
            Ok(exercises) => exercises,
            Err(e) => {
                error!(error = %e, "failed to load exercises");
                Vec::new()
            }
        }
    }

    async fn try_all_users(&self) -> Result<Vec<User>, PersistenceError> {
        let rows = sqlx::query(self.queries.select_all_users)
            .fetch_all(&self.db)
            .await?;
        map_rows(&rows, user_from_row)
    }

    async fn try_all_workouts(&self) -> Result<Vec<Workout>, PersistenceError> {
        let rows = sqlx::query(self.queries.select_all_workouts)
            .fetch_all(&self.db)
            .await?;
        map_rows(&rows, workout_from_row)
    }

    async fn try_all_exercises(&self) -> Result<Vec<Exercise>, PersistenceError> {
        let rows = sqlx::query(self.queries.select_all_exercises)
            .fetch_all(&self.db)
            .await?;
        map_rows(&rows, exercise_from_row)
    }
}
