pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod foods;
pub mod import;
pub mod logs;
pub mod meals;
pub mod nutrition;
pub mod recipes;
pub mod state;
pub mod validate;

pub use error::{AppError, AppResult};
pub use state::AppState;
