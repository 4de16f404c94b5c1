//! Member repository for JSON storage
//!
//! Manages loading and saving members to members.json. Members are kept in
//! the order they were added, which is the order settlement suggestions
//! pair debtors with creditors.

use std::path::PathBuf;

use crate::error::SplitbookError;
use crate::models::{GroupId, Member, MemberId};

use super::file_io::{read_json, stage_json, StagedWrite};
use super::table::{Keyed, Table};

impl Keyed for Member {
    type Key = MemberId;

    fn key(&self) -> MemberId {
        self.id
    }
}

/// Serializable member data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MemberData {
    members: Vec<Member>,
}

/// Repository for member persistence
pub struct MemberRepository {
    path: PathBuf,
    table: Table<Member>,
}

impl MemberRepository {
    /// Create a new member repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: Table::new(),
        }
    }

    /// Load members from disk
    pub fn load(&self) -> Result<(), SplitbookError> {
        let file_data: MemberData = read_json(&self.path)?;
        self.table.replace_all(file_data.members)
    }

    /// Save members to disk, preserving insertion order
    pub fn save(&self) -> Result<(), SplitbookError> {
        self.stage()?.commit()
    }

    /// Write members to a temp file, leaving members.json in place until commit
    pub fn stage(&self) -> Result<StagedWrite, SplitbookError> {
        let file_data = MemberData {
            members: self.table.all()?,
        };
        stage_json(&self.path, &file_data)
    }

    /// Get a member by ID
    pub fn get(&self, id: MemberId) -> Result<Option<Member>, SplitbookError> {
        self.table.get(id)
    }

    /// Get the members of a group in insertion order
    pub fn get_by_group(&self, group_id: GroupId) -> Result<Vec<Member>, SplitbookError> {
        self.table.filter(|m| m.group_id == group_id)
    }

    /// Get a member of a group by name (case-insensitive)
    pub fn get_by_name(
        &self,
        group_id: GroupId,
        name: &str,
    ) -> Result<Option<Member>, SplitbookError> {
        Ok(self
            .table
            .filter(|m| m.group_id == group_id && m.matches_name(name))?
            .into_iter()
            .next())
    }

    /// Insert or update a member
    pub fn upsert(&self, member: Member) -> Result<(), SplitbookError> {
        self.table.upsert(member)
    }

    /// Delete a member
    pub fn delete(&self, id: MemberId) -> Result<bool, SplitbookError> {
        Ok(self.table.remove(id)?.is_some())
    }

    /// Delete every member of a group, returning the removed members
    pub fn delete_by_group(&self, group_id: GroupId) -> Result<Vec<Member>, SplitbookError> {
        self.table.remove_where(|m| m.group_id == group_id)
    }

    /// Count members across all groups
    pub fn count(&self) -> Result<usize, SplitbookError> {
        self.table.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, MemberRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = MemberRepository::new(temp_dir.path().join("members.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_group_members_keep_insertion_order() {
        let (_temp_dir, repo) = create_test_repo();
        let group_id = GroupId::new();
        let other_group = GroupId::new();

        for name in ["Zoe", "Adam", "Mia"] {
            repo.upsert(Member::new(group_id, name)).unwrap();
        }
        repo.upsert(Member::new(other_group, "Bob")).unwrap();

        let names: Vec<_> = repo
            .get_by_group(group_id)
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Zoe", "Adam", "Mia"]);
    }

    #[test]
    fn test_order_survives_reload() {
        let (temp_dir, repo) = create_test_repo();
        let group_id = GroupId::new();
        for name in ["Zoe", "Adam", "Mia"] {
            repo.upsert(Member::new(group_id, name)).unwrap();
        }
        repo.save().unwrap();

        let repo2 = MemberRepository::new(temp_dir.path().join("members.json"));
        repo2.load().unwrap();
        let names: Vec<_> = repo2
            .get_by_group(group_id)
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Zoe", "Adam", "Mia"]);
    }

    #[test]
    fn test_get_by_name_is_scoped_to_group() {
        let (_temp_dir, repo) = create_test_repo();
        let group_id = GroupId::new();
        repo.upsert(Member::new(group_id, "Alice")).unwrap();

        assert!(repo.get_by_name(group_id, "alice").unwrap().is_some());
        assert!(repo.get_by_name(GroupId::new(), "alice").unwrap().is_none());
    }
}
