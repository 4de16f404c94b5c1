//! Group repository for JSON storage
//!
//! Manages loading and saving groups to groups.json

use std::path::PathBuf;

use crate::error::SplitbookError;
use crate::models::{Group, GroupId};

use super::file_io::{read_json, stage_json, StagedWrite};
use super::table::{Keyed, Table};

impl Keyed for Group {
    type Key = GroupId;

    fn key(&self) -> GroupId {
        self.id
    }
}

/// Serializable group data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GroupData {
    groups: Vec<Group>,
}

/// Repository for group persistence
pub struct GroupRepository {
    path: PathBuf,
    table: Table<Group>,
}

impl GroupRepository {
    /// Create a new group repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: Table::new(),
        }
    }

    /// Load groups from disk
    pub fn load(&self) -> Result<(), SplitbookError> {
        let file_data: GroupData = read_json(&self.path)?;
        self.table.replace_all(file_data.groups)
    }

    /// Save groups to disk
    pub fn save(&self) -> Result<(), SplitbookError> {
        self.stage()?.commit()
    }

    /// Write groups to a temp file, leaving groups.json in place until commit
    pub fn stage(&self) -> Result<StagedWrite, SplitbookError> {
        let file_data = GroupData {
            groups: self.table.all()?,
        };
        stage_json(&self.path, &file_data)
    }

    /// Get a group by ID
    pub fn get(&self, id: GroupId) -> Result<Option<Group>, SplitbookError> {
        self.table.get(id)
    }

    /// Get all groups, newest first
    pub fn get_all(&self) -> Result<Vec<Group>, SplitbookError> {
        let mut groups = self.table.all()?;
        groups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(groups)
    }

    /// Get a group by exact name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Group>, SplitbookError> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .table
            .filter(|g| g.name.trim().to_lowercase() == wanted)?
            .into_iter()
            .next())
    }

    /// Insert or update a group
    pub fn upsert(&self, group: Group) -> Result<(), SplitbookError> {
        self.table.upsert(group)
    }

    /// Delete a group
    pub fn delete(&self, id: GroupId) -> Result<bool, SplitbookError> {
        Ok(self.table.remove(id)?.is_some())
    }

    /// Count groups
    pub fn count(&self) -> Result<usize, SplitbookError> {
        self.table.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, GroupRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = GroupRepository::new(temp_dir.path().join("groups.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_get_by_name() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Group::new("Lisbon Trip")).unwrap();

        assert!(repo.get_by_name("lisbon trip").unwrap().is_some());
        assert!(repo.get_by_name("Porto").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let group = Group::new("Flat");
        let id = group.id;
        repo.upsert(group).unwrap();
        repo.save().unwrap();

        let repo2 = GroupRepository::new(temp_dir.path().join("groups.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().name, "Flat");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let group = Group::new("Flat");
        let id = group.id;
        repo.upsert(group).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
    }
}
