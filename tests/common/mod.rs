//! Shared setup for the database integration tests: schema, truncation and
//! sample data. The connection string comes from `FITNESS_DATABASE_URL`.

use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

use fitness_app::models::{CreateExercise, CreateUser, CreateWorkout};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    first_name TEXT NOT NULL,
    middle_name TEXT NOT NULL DEFAULT '',
    last_name TEXT NOT NULL,
    birthday DATE NOT NULL,
    gender TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS workouts (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS exercises (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    instructions TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS workout_exercises (
    workout_id BIGINT NOT NULL REFERENCES workouts (id),
    exercise_id BIGINT NOT NULL REFERENCES exercises (id),
    PRIMARY KEY (workout_id, exercise_id)
);

CREATE TABLE IF NOT EXISTS user_favorite_workouts (
    user_id BIGINT NOT NULL REFERENCES users (id),
    workout_id BIGINT NOT NULL REFERENCES workouts (id),
    PRIMARY KEY (user_id, workout_id)
);

CREATE TABLE IF NOT EXISTS user_completed_workouts (
    user_id BIGINT NOT NULL REFERENCES users (id),
    workout_id BIGINT NOT NULL REFERENCES workouts (id),
    date_completed DATE NOT NULL,
    PRIMARY KEY (user_id, workout_id, date_completed)
);
"#;

/// Connect, apply the schema and start from empty tables.
pub async fn test_database() -> PgPool {
    let url = std::env::var("FITNESS_DATABASE_URL")
        .expect("set FITNESS_DATABASE_URL to run the database integration tests");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("failed to connect to the test database");

    pool.execute(SCHEMA)
        .await
        .expect("failed to apply the test schema");
    pool.execute(
        "TRUNCATE user_completed_workouts, user_favorite_workouts, workout_exercises, \
         exercises, workouts, users RESTART IDENTITY CASCADE",
    )
    .await
    .expect("failed to truncate test tables");

    pool
}

pub fn sample_user(first_name: &str) -> CreateUser {
    CreateUser {
        first_name: first_name.to_string(),
        middle_name: String::new(),
        last_name: "Tester".to_string(),
        birthday: "1991-04-02".to_string(),
        gender: "female".to_string(),
    }
}

pub fn sample_workout(title: &str, description: &str) -> CreateWorkout {
    CreateWorkout {
        title: title.to_string(),
        description: description.to_string(),
    }
}

pub fn sample_exercise(name: &str, instructions: &str) -> CreateExercise {
    CreateExercise {
        name: name.to_string(),
        instructions: instructions.to_string(),
    }
}

/// Completion records are read-only through the crate's public surface, so
/// the tests seed them directly.
pub async fn seed_completed_workout(pool: &PgPool, user_id: i64, workout_id: i64, date: &str) {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("bad seed date");
    sqlx::query(
        "INSERT INTO user_completed_workouts (user_id, workout_id, date_completed) \
         VALUES ($1, $2, $3)",
    )
    .bind(user_id)
    .bind(workout_id)
    .bind(date)
    .execute(pool)
    .await
    .expect("failed to seed completed workout");
}
