//! Path management for splitbook
//!
//! ## Path Resolution Order
//!
//! 1. `SPLITBOOK_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/splitbook` on Linux, `%APPDATA%\splitbook` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SplitbookError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SPLITBOOK_DATA_DIR";

/// Manages all paths used by splitbook
#[derive(Debug, Clone)]
pub struct SplitbookPaths {
    /// Base directory for all splitbook data
    base_dir: PathBuf,
}

impl SplitbookPaths {
    /// Create a new SplitbookPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SplitbookError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SplitbookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the default export directory (<base>/exports/)
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to groups.json
    pub fn groups_file(&self) -> PathBuf {
        self.data_dir().join("groups.json")
    }

    /// Get the path to members.json
    pub fn members_file(&self) -> PathBuf {
        self.data_dir().join("members.json")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Get the path to settlements.json (recorded payments)
    pub fn settlements_file(&self) -> PathBuf {
        self.data_dir().join("settlements.json")
    }

    /// Ensure the base, data and export directories exist
    pub fn ensure_directories(&self) -> Result<(), SplitbookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SplitbookError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SplitbookError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir()).map_err(|e| {
            SplitbookError::Io(format!("Failed to create export directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if splitbook has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, SplitbookError> {
    ProjectDirs::from("", "", "splitbook")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SplitbookError::Config("Could not determine home directory".into()))
}
