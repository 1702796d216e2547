// Library interface for ruckrs
// The binary and the integration tests both build on these modules

pub mod config;
pub mod draft;
pub mod error;
pub mod format;
pub mod gear;
pub mod logging;
pub mod models;
pub mod routes;
pub mod session;
pub mod store;
pub mod workouts;

// Re-export commonly used types for convenience
pub use models::*;
pub use draft::WorkoutDraft;
pub use gear::GearCatalog;
pub use routes::RouteCatalog;
pub use store::{RuckStore, SharedStore};
pub use workouts::{calculate_calories, WorkoutLog};
pub use error::{RuckError, Result};
pub use logging::{LogConfig, LogLevel, LogFormat};
