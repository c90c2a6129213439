pub mod app;

pub use app::{AppConfig, ConnectionConfig, DatabaseConfig, MetaConfig, PoolConfig};
