//! splitbook - Terminal-based shared expense tracker
//!
//! This library provides the core functionality for splitbook. Members of a
//! group record shared expenses, and the settlement engine turns everyone's
//! net balance into a short list of "A pays B" transfers that settles the
//! group.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (groups, members, expenses, payments)
//! - `storage`: JSON file storage layer
//! - `settle`: Balance computation, settlement suggestions, member removal cascade
//! - `services`: Business logic layer
//! - `reports`: Group analytics and the cross-group overview
//! - `export`: CSV, JSON and YAML export
//! - `audit`: Audit logging system
//!
//! # Example
//!
//! ```rust,ignore
//! use splitbook::config::{SplitbookPaths, Settings};
//! use splitbook::storage::Storage;
//!
//! let paths = SplitbookPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod settle;
pub mod storage;

pub use error::{SplitbookError, SplitbookResult};
