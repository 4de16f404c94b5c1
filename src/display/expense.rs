//! Expense display formatting

use crate::models::{Expense, MemberId};

/// Format expenses as a table, resolving member names through `name_of`
pub fn format_expense_list<F>(
    expenses: &[Expense],
    name_of: F,
    symbol: &str,
    date_format: &str,
) -> String
where
    F: Fn(MemberId) -> String,
{
    if expenses.is_empty() {
        return "  No expenses recorded.\n".to_string();
    }

    let rows: Vec<[String; 6]> = expenses
        .iter()
        .map(|e| {
            [
                e.id.to_string(),
                e.date.format(date_format).to_string(),
                e.description.clone(),
                e.category_or_fallback().to_string(),
                name_of(e.paid_by),
                e.split_between
                    .iter()
                    .map(|id| name_of(*id))
                    .collect::<Vec<_>>()
                    .join(", "),
            ]
        })
        .collect();

    let width = |col: usize, title: &str| {
        rows.iter()
            .map(|r| r[col].len())
            .max()
            .unwrap_or(0)
            .max(title.len())
    };
    let date_w = width(1, "Date");
    let desc_w = width(2, "Description");
    let cat_w = width(3, "Category");
    let payer_w = width(4, "Paid By");

    let mut output = String::new();
    output.push_str(&format!(
        "  {:<12}  {:<date_w$}  {:<desc_w$}  {:<cat_w$}  {:>12}  {:<payer_w$}  {}\n",
        "ID", "Date", "Description", "Category", "Amount", "Paid By", "Split Between",
    ));

    for (expense, row) in expenses.iter().zip(&rows) {
        output.push_str(&format!(
            "  {:<12}  {:<date_w$}  {:<desc_w$}  {:<cat_w$}  {:>12}  {:<payer_w$}  {}\n",
            row[0],
            row[1],
            row[2],
            row[3],
            expense.amount.format_with_symbol(symbol),
            row[4],
            row[5],
        ));
    }

    output
}
