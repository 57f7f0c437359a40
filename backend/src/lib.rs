//! Cat Box Planner - backend
//!
//! Order storage, configuration and command implementations around the
//! shared planning engine.

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
