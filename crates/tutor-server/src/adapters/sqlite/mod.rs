//! SQLite Repository Implementations

mod user_repository;

pub use user_repository::{connect, SqliteUserRepository};
