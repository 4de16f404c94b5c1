//! Configuration module for splitbook
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SplitbookPaths;
pub use settings::{SettlementOrder, Settings};
