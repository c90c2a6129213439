use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
