use std::sync::Arc;

use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::models::{CreateExercise, CreateUser, CreateWorkout, Exercise, User, Workout};
use crate::persistence::{
    pool, AggregateBuilder, PersistenceError, Queries, RelationshipLoader, WriteGateway,
};

/// Service façade over the persistence layer.
///
/// Reads always return a collection (or its JSON rendering) and writes a
/// boolean; persistence failures never cross this boundary, they are logged
/// below and surface as empty results. The one exception is [`connect`]:
/// a pool that cannot be built is fatal at startup.
///
/// [`connect`]: AppService::connect
#[derive(Clone)]
pub struct AppService {
    builder: AggregateBuilder,
    loader: RelationshipLoader,
    gateway: WriteGateway,
}

impl AppService {
    pub fn new(db: PgPool) -> Self {
        let queries = Arc::new(Queries::new());
        let loader = RelationshipLoader::new(db.clone(), queries.clone());
        Self {
            builder: AggregateBuilder::new(db.clone(), queries.clone(), loader.clone()),
            loader,
            gateway: WriteGateway::new(db, queries),
        }
    }

    /// Build the connection pool from configuration and wire the service up.
    pub async fn connect(config: &AppConfig) -> Result<Self, PersistenceError> {
        match pool::connect(&config.database).await {
            Ok(db) => {
                info!(database = %config.database.connection.summary(), "connection pool ready");
                Ok(Self::new(db))
            }
            Err(e) => {
                error!(
                    database = %config.database.connection.summary(),
                    pool = %config.database.pool.name,
                    size = config.database.pool.size,
                    error = %e,
                    "failed to create connection pool"
                );
                Err(e)
            }
        }
    }

    // Reads

    pub async fn get_all_users(&self) -> Vec<User> {
        debug!("get_all_users");
        self.builder.all_users().await
    }

    pub async fn get_all_workouts(&self) -> Vec<Workout> {
        debug!("get_all_workouts");
        self.builder.all_workouts().await
    }

    pub async fn get_all_exercises(&self) -> Vec<Exercise> {
        debug!("get_all_exercises");
        self.builder.all_exercises().await
    }

    // Serialized reads

    pub async fn get_all_users_as_json(&self) -> String {
        json_array(&self.get_all_users().await)
    }

    pub async fn get_all_workouts_as_json(&self) -> String {
        json_array(&self.get_all_workouts().await)
    }

    pub async fn get_workout_exercises_as_json(&self, workout_id: i64) -> String {
        debug!(workout_id, "get_workout_exercises_as_json");
        json_array(&self.loader.exercises_for_workout(workout_id).await)
    }

    pub async fn get_user_favorites_as_json(&self, user_id: i64) -> String {
        debug!(user_id, "get_user_favorites_as_json");
        json_array(&self.loader.favorite_workouts(user_id).await)
    }

    pub async fn get_user_completed_as_json(&self, user_id: i64) -> String {
        debug!(user_id, "get_user_completed_as_json");
        json_array(&self.loader.completed_workouts(user_id).await)
    }

    // Writes

    pub async fn add_user(&self, user: CreateUser) -> bool {
        debug!("add_user");
        self.gateway.insert_user(&user).await.is_some()
    }

    /// Insert a workout, link the existing exercises, then insert and link
    /// the new ones. Each statement commits on its own: a link or exercise
    /// failure after the workout insert is logged and skipped, and whatever
    /// was already written stays written.
    pub async fn add_workout(
        &self,
        workout: CreateWorkout,
        existing_exercise_ids: &[i64],
        new_exercises: &[CreateExercise],
    ) -> bool {
        debug!("add_workout");
        let Some(workout_id) = self.gateway.insert_workout(&workout).await else {
            return false;
        };

        for &exercise_id in existing_exercise_ids {
            self.gateway
                .link_workout_exercise(workout_id, exercise_id)
                .await;
        }

        for exercise in new_exercises {
            if let Some(exercise_id) = self.gateway.insert_exercise(exercise).await {
                self.gateway
                    .link_workout_exercise(workout_id, exercise_id)
                    .await;
            }
        }

        true
    }

    pub async fn favorite_workout(&self, user_id: i64, workout_id: i64) -> bool {
        debug!(user_id, workout_id, "favorite_workout");
        self.gateway
            .link_user_favorite_workout(user_id, workout_id)
            .await
    }
}

fn json_array<T: Serialize>(items: &[T]) -> String {
    match serde_json::to_string(items) {
        Ok(json) => json,
        Err(e) => {
            error!(error = %e, "serialization failed");
            "[]".to_string()
        }
    }
}
