//! Console menu. Thin collaborator over [`AppService`]: everything it
//! renders or submits goes through the façade's public operations.

use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use prettytable::{row, Table};
use tracing::debug;

use crate::models::{CreateExercise, CreateUser, CreateWorkout};
use crate::services::AppService;

pub struct ConsoleUi {
    services: AppService,
    theme: ColorfulTheme,
}

impl ConsoleUi {
    pub fn new(services: AppService) -> Self {
        Self {
            services,
            theme: ColorfulTheme::default(),
        }
    }

    pub async fn run(&self) -> Result<()> {
        debug!("console ui started");
        loop {
            self.display_menu();
            let choice: String = Input::with_theme(&self.theme)
                .with_prompt("Menu choice")
                .interact_text()?;

            match choice.trim() {
                "1" => self.list_users().await,
                "2" => self.list_workouts().await,
                "3" => self.add_user().await?,
                "4" => self.favorite_workout().await?,
                "5" => self.add_workout().await?,
                "6" => {
                    println!("Goodbye!");
                    return Ok(());
                }
                other => println!("{}", style(format!("Invalid menu choice: {other}")).red()),
            }
        }
    }

    fn display_menu(&self) {
        println!();
        println!("\tFitness App Menu");
        println!();
        println!("\t1. List Users");
        println!("\t2. List Workouts");
        println!("\t3. Add User");
        println!("\t4. Favorite Workout");
        println!("\t5. Add Workout");
        println!("\t6. Exit");
        println!();
    }

    async fn list_users(&self) {
        let users = self.services.get_all_users().await;

        let mut user_table = Table::new();
        user_table.set_titles(row![
            "ID",
            "First Name",
            "Middle Name",
            "Last Name",
            "Gender",
            "Birthday",
            "Completed Workouts"
        ]);

        for user in &users {
            let mut workout_table = Table::new();
            workout_table.set_titles(row!["Workout", "Exercises", "Completed On"]);
            for workout in &user.completed_workouts {
                let exercise_names: Vec<&str> =
                    workout.exercises.iter().map(|e| e.name.as_str()).collect();
                workout_table.add_row(row![
                    workout.title,
                    exercise_names.join(", "),
                    workout.date_completed
                ]);
            }

            user_table.add_row(row![
                user.id,
                user.first_name,
                user.middle_name,
                user.last_name,
                user.gender,
                user.birthday,
                workout_table.to_string()
            ]);
        }

        user_table.printstd();
    }

    async fn list_workouts(&self) {
        println!("{}", self.services.get_all_workouts_as_json().await);
    }

    async fn add_user(&self) -> Result<()> {
        let first_name: String = self.required_input("First name")?;
        let middle_name: String = self.optional_input("Middle name")?;
        let last_name: String = self.required_input("Last name")?;
        let birthday: String = self.required_input("Birthday (YYYY-MM-DD)")?;
        let gender: String = self.optional_input("Gender")?;

        let created = self
            .services
            .add_user(CreateUser {
                first_name,
                middle_name,
                last_name,
                birthday,
                gender,
            })
            .await;

        self.report(created, "User added.", "Could not add user.");
        Ok(())
    }

    async fn favorite_workout(&self) -> Result<()> {
        let Some(user_id) = self.prompt_id("User id")? else {
            return Ok(());
        };
        let Some(workout_id) = self.prompt_id("Workout id")? else {
            return Ok(());
        };

        let linked = self.services.favorite_workout(user_id, workout_id).await;
        self.report(linked, "Workout favorited.", "Could not favorite workout.");
        Ok(())
    }

    async fn add_workout(&self) -> Result<()> {
        let title: String = self.required_input("Title")?;
        let description: String = self.optional_input("Description")?;

        let raw_ids: String =
            self.optional_input("Existing exercise ids (comma separated, empty for none)")?;
        let Some(existing_exercise_ids) = parse_id_list(&raw_ids) else {
            println!("{}", style("Exercise ids must be numeric.").red());
            return Ok(());
        };

        let mut new_exercises = Vec::new();
        loop {
            let name: String = self.optional_input("New exercise name (empty to finish)")?;
            if name.is_empty() {
                break;
            }
            let instructions: String = self.optional_input("Instructions")?;
            new_exercises.push(CreateExercise { name, instructions });
        }

        let created = self
            .services
            .add_workout(
                CreateWorkout { title, description },
                &existing_exercise_ids,
                &new_exercises,
            )
            .await;

        self.report(created, "Workout added.", "Could not add workout.");
        Ok(())
    }

    /// Prompt for an identifier; non-numeric input is rejected here, before
    /// anything reaches the persistence layer.
    fn prompt_id(&self, prompt: &str) -> Result<Option<i64>> {
        let raw: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact_text()?;
        match parse_id(&raw) {
            Some(id) => Ok(Some(id)),
            None => {
                println!("{}", style(format!("Not a numeric id: {}", raw.trim())).red());
                Ok(None)
            }
        }
    }

    fn required_input(&self, prompt: &str) -> Result<String> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(|input: &String| {
                if input.trim().is_empty() {
                    Err("a value is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    fn optional_input(&self, prompt: &str) -> Result<String> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    fn report(&self, ok: bool, success: &str, failure: &str) {
        if ok {
            println!("{}", style(success).green());
        } else {
            println!("{}", style(failure).red());
        }
    }
}

fn parse_id(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

/// Comma-separated id list; empty input is an empty list, any non-numeric
/// entry rejects the whole input.
fn parse_id_list(input: &str) -> Option<Vec<i64>> {
    if input.trim().is_empty() {
        return Some(Vec::new());
    }
    input.split(',').map(parse_id).collect()
}
