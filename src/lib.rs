pub mod config;
pub mod models;
pub mod persistence;
pub mod services;
pub mod ui;
