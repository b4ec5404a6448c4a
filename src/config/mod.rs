//! Configuration module for ClearSpend
//!
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ClearSpendPaths;
pub use settings::Settings;
