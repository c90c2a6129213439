use serde::{Deserialize, Serialize};

use crate::models::Workout;

/// A registered user together with the workouts hydrated onto it.
///
/// `completed_workouts` and `favorite_workouts` are populated by the
/// persistence layer, never stored as columns of the `users` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    /// Birthday rendered as `YYYY-MM-DD`.
    pub birthday: String,
    pub gender: String,
    #[serde(default)]
    pub completed_workouts: Vec<Workout>,
    #[serde(default)]
    pub favorite_workouts: Vec<Workout>,
}

impl User {
    pub fn full_name(&self) -> String {
        if self.middle_name.is_empty() {
            format!("{} {}", self.first_name, self.last_name)
        } else {
            format!("{} {} {}", self.first_name, self.middle_name, self.last_name)
        }
    }
}

/// Scalar fields for a user insert. Relationship collections are never
/// written through this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub birthday: String,
    pub gender: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_skips_empty_middle_name() {
        let user = User {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            ..Default::default()
        };
        assert_eq!(user.full_name(), "Ada Lovelace");

        let user = User {
            middle_name: "King".to_string(),
            ..user
        };
        assert_eq!(user.full_name(), "Ada King Lovelace");
    }
}
