//! Row-to-entity mapping.
//!
//! Every function takes one flat row and reads it through the column
//! positions declared next to the query that produced it (see
//! [`crate::persistence::queries`]). Pure transformation, no side effects.

use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::models::{Exercise, User, Workout};
use crate::persistence::queries::{
    completed_workout_columns, exercise_columns, user_columns, workout_columns,
};
use crate::persistence::PersistenceError;

pub(crate) fn user_from_row(row: &PgRow) -> Result<User, PersistenceError> {
    Ok(User {
        id: row.try_get(user_columns::ID)?,
        first_name: row.try_get(user_columns::FIRST_NAME)?,
        middle_name: optional_text(row, user_columns::MIDDLE_NAME)?,
        last_name: row.try_get(user_columns::LAST_NAME)?,
        birthday: date_string(row, user_columns::BIRTHDAY)?,
        gender: row.try_get(user_columns::GENDER)?,
        completed_workouts: Vec::new(),
        favorite_workouts: Vec::new(),
    })
}

pub(crate) fn workout_from_row(row: &PgRow) -> Result<Workout, PersistenceError> {
    Ok(Workout {
        id: row.try_get(workout_columns::ID)?,
        title: row.try_get(workout_columns::TITLE)?,
        description: optional_text(row, workout_columns::DESCRIPTION)?,
        date_completed: String::new(),
        exercises: Vec::new(),
    })
}

/// Same shape as [`workout_from_row`] plus the `date_completed` payload the
/// completed-workouts join carries.
pub(crate) fn completed_workout_from_row(row: &PgRow) -> Result<Workout, PersistenceError> {
    let mut workout = workout_from_row(row)?;
    workout.date_completed = date_string(row, completed_workout_columns::DATE_COMPLETED)?;
    Ok(workout)
}

pub(crate) fn exercise_from_row(row: &PgRow) -> Result<Exercise, PersistenceError> {
    Ok(Exercise {
        id: row.try_get(exercise_columns::ID)?,
        name: row.try_get(exercise_columns::NAME)?,
        instructions: optional_text(row, exercise_columns::INSTRUCTIONS)?,
    })
}

/// Map a whole result set. An empty result set maps to an empty `Vec`.
pub(crate) fn map_rows<T>(
    rows: &[PgRow],
    map: fn(&PgRow) -> Result<T, PersistenceError>,
) -> Result<Vec<T>, PersistenceError> {
    rows.iter().map(map).collect()
}

/// Nullable text columns surface as the empty string on the entity.
fn optional_text(row: &PgRow, index: usize) -> Result<String, PersistenceError> {
    Ok(row.try_get::<Option<String>, _>(index)?.unwrap_or_default())
}

/// `DATE` columns render as `YYYY-MM-DD`.
fn date_string(row: &PgRow, index: usize) -> Result<String, PersistenceError> {
    let date: NaiveDate = row.try_get(index)?;
    Ok(date.format("%Y-%m-%d").to_string())
}
