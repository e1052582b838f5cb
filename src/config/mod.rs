//! Configuration module for fundbook
//!
//! This module provides:
//! - base directory resolution
//! - settings persistence
//! - loading of the item category list

pub mod categories;
pub mod paths;
pub mod settings;

pub use categories::load_categories;
pub use paths::FundbookPaths;
pub use settings::{IdMode, Settings};
