//! Expense service
//!
//! Recording, listing and deleting shared expenses. Every payer and
//! participant must belong to the expense's group, so the settlement engine
//! never sees a dangling reference.

use chrono::NaiveDate;
use tracing::debug;

use crate::audit::EntityType;
use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{Expense, ExpenseId, GroupId, MemberId, Money};
use crate::storage::Storage;

/// Input for a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub group_id: GroupId,
    pub description: String,
    pub amount: Money,
    pub category: Option<String>,
    pub paid_by: MemberId,
    pub split_between: Vec<MemberId>,
    pub date: NaiveDate,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense
    ///
    /// Expenses without a category get `default_category`.
    pub fn create(&self, input: NewExpense, default_category: &str) -> SplitbookResult<Expense> {
        self.storage
            .groups
            .get(input.group_id)?
            .ok_or_else(|| SplitbookError::group_not_found(input.group_id.to_string()))?;

        let members = self.storage.members.get_by_group(input.group_id)?;
        let is_member = |id: &MemberId| members.iter().any(|m| m.id == *id);

        if !is_member(&input.paid_by) {
            return Err(SplitbookError::Validation(format!(
                "Payer {} is not a member of the group",
                input.paid_by
            )));
        }

        if let Some(outsider) = input.split_between.iter().find(|id| !is_member(id)) {
            return Err(SplitbookError::Validation(format!(
                "Participant {} is not a member of the group",
                outsider
            )));
        }

        let category = input
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| default_category.to_string());

        let expense = Expense::new(
            input.group_id,
            input.description.trim(),
            input.amount,
            input.paid_by,
            input.split_between,
            input.date,
        )
        .with_category(category);

        expense
            .validate()
            .map_err(|e| SplitbookError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        debug!(expense = %expense.id, group = %expense.group_id, "expense recorded");
        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> SplitbookResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Expenses of a group in the order they were recorded
    pub fn list(&self, group_id: GroupId) -> SplitbookResult<Vec<Expense>> {
        self.storage.expenses.get_by_group(group_id)
    }

    /// Find an expense of a group by ID
    pub fn resolve(&self, group_id: GroupId, identifier: &str) -> SplitbookResult<Expense> {
        self.storage
            .expenses
            .get_by_group(group_id)?
            .into_iter()
            .find(|e| e.id.matches(identifier))
            .ok_or_else(|| SplitbookError::expense_not_found(identifier))
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> SplitbookResult<Expense> {
        let expense = self
            .storage
            .expenses
            .delete(id)?
            .ok_or_else(|| SplitbookError::expense_not_found(id.to_string()))?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SplitbookPaths;
    use crate::models::Member;
    use crate::services::{GroupService, MemberService};
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        storage: Storage,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        Fixture {
            _temp_dir: temp_dir,
            storage,
        }
    }

    fn setup(storage: &Storage) -> (GroupId, Member, Member) {
        let group = GroupService::new(storage).create("Flat", None).unwrap();
        let members = MemberService::new(storage);
        let ann = members.add(group.id, "Ann").unwrap();
        let ben = members.add(group.id, "Ben").unwrap();
        (group.id, ann, ben)
    }

    fn input(group_id: GroupId, payer: MemberId, split: Vec<MemberId>) -> NewExpense {
        NewExpense {
            group_id,
            description: "Groceries".into(),
            amount: Money::from_cents(4_250),
            category: None,
            paid_by: payer,
            split_between: split,
            date: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
        }
    }

    #[test]
    fn test_create_applies_default_category() {
        let f = fixture();
        let (group_id, ann, ben) = setup(&f.storage);
        let service = ExpenseService::new(&f.storage);

        let expense = service
            .create(input(group_id, ann.id, vec![ann.id, ben.id]), "General")
            .unwrap();
        assert_eq!(expense.category.as_deref(), Some("General"));

        let mut tagged = input(group_id, ben.id, vec![ann.id]);
        tagged.category = Some(" Food ".into());
        let expense = service.create(tagged, "General").unwrap();
        assert_eq!(expense.category.as_deref(), Some("Food"));

        assert_eq!(service.list(group_id).unwrap().len(), 2);
    }

    #[test]
    fn test_create_rejects_outsiders_and_bad_input() {
        let f = fixture();
        let (group_id, ann, ben) = setup(&f.storage);
        let service = ExpenseService::new(&f.storage);
        let stranger = MemberId::new();

        let cases = vec![
            input(group_id, stranger, vec![ann.id]),
            input(group_id, ann.id, vec![ann.id, stranger]),
            input(group_id, ann.id, vec![]),
            input(group_id, ann.id, vec![ben.id, ben.id]),
        ];
        for case in cases {
            assert!(service.create(case, "Misc").unwrap_err().is_validation());
        }

        let mut free = input(group_id, ann.id, vec![ann.id]);
        free.amount = Money::zero();
        assert!(service.create(free, "Misc").unwrap_err().is_validation());

        let mut blank = input(group_id, ann.id, vec![ann.id]);
        blank.description = "  ".into();
        assert!(service.create(blank, "Misc").unwrap_err().is_validation());

        assert!(service
            .create(input(GroupId::new(), ann.id, vec![ann.id]), "Misc")
            .unwrap_err()
            .is_not_found());
        assert!(service.list(group_id).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_and_delete() {
        let f = fixture();
        let (group_id, ann, _) = setup(&f.storage);
        let service = ExpenseService::new(&f.storage);

        let expense = service
            .create(input(group_id, ann.id, vec![ann.id]), "Misc")
            .unwrap();
        let found = service.resolve(group_id, &expense.id.to_string()).unwrap();
        assert_eq!(found.id, expense.id);

        service.delete(expense.id).unwrap();
        assert!(service.get(expense.id).unwrap().is_none());
        assert!(service.delete(expense.id).unwrap_err().is_not_found());
    }
}
