//! Shared types for the roster workspace
//!
//! Data models and DTOs used by the server and by API clients.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
