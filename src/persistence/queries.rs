//! Query catalog and the column-position tables that go with it.
//!
//! Each SELECT below has a companion `*_columns` module listing its
//! projection as `(column, position)` pairs. The mapper reads rows through
//! those positions, and the tests at the bottom of this file parse every
//! SELECT list and assert it matches its table, so the query text and the
//! positions cannot drift apart silently.

/// Positions of the `users` projection in [`Queries::select_all_users`].
pub mod user_columns {
    pub const ID: usize = 0;
    pub const FIRST_NAME: usize = 1;
    pub const MIDDLE_NAME: usize = 2;
    pub const LAST_NAME: usize = 3;
    pub const BIRTHDAY: usize = 4;
    pub const GENDER: usize = 5;

    pub const PROJECTION: &[(&str, usize)] = &[
        ("id", ID),
        ("first_name", FIRST_NAME),
        ("middle_name", MIDDLE_NAME),
        ("last_name", LAST_NAME),
        ("birthday", BIRTHDAY),
        ("gender", GENDER),
    ];
}

/// Positions of the `workouts` projection, shared by the flat workout
/// listing and the favorites join.
pub mod workout_columns {
    pub const ID: usize = 0;
    pub const TITLE: usize = 1;
    pub const DESCRIPTION: usize = 2;

    pub const PROJECTION: &[(&str, usize)] = &[
        ("id", ID),
        ("title", TITLE),
        ("description", DESCRIPTION),
    ];
}

/// The completed-workouts join projects the workout columns plus the
/// `date_completed` payload of the join row.
pub mod completed_workout_columns {
    pub use super::workout_columns::{DESCRIPTION, ID, TITLE};

    pub const DATE_COMPLETED: usize = 3;

    pub const PROJECTION: &[(&str, usize)] = &[
        ("id", ID),
        ("title", TITLE),
        ("description", DESCRIPTION),
        ("date_completed", DATE_COMPLETED),
    ];
}

/// Positions of the `exercises` projection, shared by the flat exercise
/// listing and the workout-exercises join.
pub mod exercise_columns {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const INSTRUCTIONS: usize = 2;

    pub const PROJECTION: &[(&str, usize)] = &[
        ("id", ID),
        ("name", NAME),
        ("instructions", INSTRUCTIONS),
    ];
}

/// The full set of statements the persistence components issue, built once
/// with the components and handed around immutably.
#[derive(Debug, Clone)]
pub struct Queries {
    pub select_all_users: &'static str,
    pub select_all_workouts: &'static str,
    pub select_all_exercises: &'static str,
    pub select_workout_exercises: &'static str,
    pub select_user_favorites: &'static str,
    pub select_user_completed: &'static str,
    pub insert_user: &'static str,
    pub insert_workout: &'static str,
    pub insert_exercise: &'static str,
    pub insert_workout_exercise: &'static str,
    pub insert_user_favorite_workout: &'static str,
}

impl Queries {
    pub fn new() -> Self {
        Self {
            select_all_users: "SELECT id, first_name, middle_name, last_name, birthday, gender \
                 FROM users",

            select_all_workouts: "SELECT id, title, description \
                 FROM workouts",

            select_all_exercises: "SELECT id, name, instructions \
                 FROM exercises",

            select_workout_exercises: "SELECT e.id, e.name, e.instructions \
                 FROM exercises e \
                 JOIN workout_exercises we ON we.exercise_id = e.id \
                 WHERE we.workout_id = $1",

            select_user_favorites: "SELECT w.id, w.title, w.description \
                 FROM workouts w \
                 JOIN user_favorite_workouts f ON f.workout_id = w.id \
                 WHERE f.user_id = $1",

            select_user_completed: "SELECT w.id, w.title, w.description, c.date_completed \
                 FROM workouts w \
                 JOIN user_completed_workouts c ON c.workout_id = w.id \
                 WHERE c.user_id = $1",

            insert_user: "INSERT INTO users (first_name, middle_name, last_name, birthday, gender) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING id",

            insert_workout: "INSERT INTO workouts (title, description) \
                 VALUES ($1, $2) RETURNING id",

            insert_exercise: "INSERT INTO exercises (name, instructions) \
                 VALUES ($1, $2) RETURNING id",

            insert_workout_exercise: "INSERT INTO workout_exercises (workout_id, exercise_id) \
                 VALUES ($1, $2)",

            insert_user_favorite_workout: "INSERT INTO user_favorite_workouts (user_id, workout_id) \
                 VALUES ($1, $2)",
        }
    }
}

impl Default for Queries {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Column names of a query's SELECT list in projection order, table
    /// aliases stripped.
    fn projection_of(query: &str) -> Vec<String> {
        let upper = query.to_uppercase();
        let start = upper.find("SELECT ").expect("no SELECT clause") + "SELECT ".len();
        let end = upper.find(" FROM ").expect("no FROM clause");
        query[start..end]
            .split(',')
            .map(|column| {
                let column = column.trim();
                match column.split_once('.') {
                    Some((_alias, name)) => name.to_string(),
                    None => column.to_string(),
                }
            })
            .collect()
    }

    fn assert_projection_matches(query: &str, table: &[(&str, usize)]) {
        let projected = projection_of(query);
        let expected: Vec<String> = table.iter().map(|(name, _)| name.to_string()).collect();
        assert_eq!(projected, expected, "projection drifted for: {query}");
        for (position, (name, index)) in table.iter().enumerate() {
            assert_eq!(position, *index, "position table out of order at '{name}'");
        }
    }

    #[test]
    fn user_projection_matches_column_table() {
        let queries = Queries::new();
        assert_projection_matches(queries.select_all_users, user_columns::PROJECTION);
    }

    #[test]
    fn workout_projection_matches_column_table() {
        let queries = Queries::new();
        assert_projection_matches(queries.select_all_workouts, workout_columns::PROJECTION);
        assert_projection_matches(queries.select_user_favorites, workout_columns::PROJECTION);
    }

    #[test]
    fn completed_workout_projection_matches_column_table() {
        let queries = Queries::new();
        assert_projection_matches(
            queries.select_user_completed,
            completed_workout_columns::PROJECTION,
        );
    }

    #[test]
    fn exercise_projection_matches_column_table() {
        let queries = Queries::new();
        assert_projection_matches(queries.select_all_exercises, exercise_columns::PROJECTION);
        assert_projection_matches(queries.select_workout_exercises, exercise_columns::PROJECTION);
    }

    #[test]
    fn join_queries_filter_on_one_parent_parameter() {
        let queries = Queries::new();
        for query in [
            queries.select_workout_exercises,
            queries.select_user_favorites,
            queries.select_user_completed,
        ] {
            assert!(query.contains("WHERE"), "missing filter: {query}");
            assert!(query.contains("$1"), "missing parent parameter: {query}");
            assert!(!query.contains("$2"), "join query takes exactly one parameter: {query}");
        }
    }

    #[test]
    fn entity_inserts_return_the_generated_id() {
        let queries = Queries::new();
        for query in [
            queries.insert_user,
            queries.insert_workout,
            queries.insert_exercise,
        ] {
            assert!(query.ends_with("RETURNING id"), "id must come back with the insert: {query}");
        }
    }

    #[test]
    fn link_inserts_take_exactly_two_parameters() {
        let queries = Queries::new();
        for query in [
            queries.insert_workout_exercise,
            queries.insert_user_favorite_workout,
        ] {
            assert!(query.contains("($1, $2)"), "bad link statement: {query}");
            assert!(!query.contains("RETURNING"), "join rows have no identity of their own: {query}");
        }
    }
}
