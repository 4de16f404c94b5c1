//! Settlement display formatting
//!
//! Balances, the suggestion board and the recorded payment history.

use crate::models::{MemberId, Money, SettlementRecord};
use crate::settle::{MemberBalance, SuggestionBoard};

/// Format member balances, owed amounts positive
pub fn format_balances(balances: &[MemberBalance], symbol: &str) -> String {
    if balances.is_empty() {
        return "No members in this group.\n".to_string();
    }

    let name_width = balances
        .iter()
        .map(|b| b.name.len())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>12}  {:>12}\n",
        "Member", "Paid", "Share", "Balance",
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:->12}  {:->12}\n",
        "", "", "", "",
    ));

    for balance in balances {
        let fmt = |units: f64| Money::from_units_rounded(units).format_with_symbol(symbol);
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>12}  {:>12}\n",
            balance.name,
            fmt(balance.paid),
            fmt(balance.share),
            fmt(balance.net()),
        ));
    }

    output
}

/// Format suggested transfers in display order
pub fn format_suggestion_board<F>(board: &SuggestionBoard, name_of: F, symbol: &str) -> String
where
    F: Fn(MemberId) -> String,
{
    if board.is_empty() {
        return "All settled up. No transfers needed.\n".to_string();
    }

    let mut output = String::new();
    for entry in board.entries() {
        let mark = if entry.settled { "[x]" } else { "[ ]" };
        output.push_str(&format!(
            "{} #{:<3} {} pays {} {}\n",
            mark,
            entry.id,
            name_of(entry.suggestion.from),
            name_of(entry.suggestion.to),
            entry.suggestion.amount.format_with_symbol(symbol)
        ));
    }

    output.push_str(&format!(
        "\n{} of {} transfer(s) outstanding\n",
        board.unsettled_count(),
        board.len()
    ));
    output
}

/// Format recorded payments, newest first
pub fn format_settlement_history<F>(
    records: &[SettlementRecord],
    name_of: F,
    symbol: &str,
    date_format: &str,
) -> String
where
    F: Fn(MemberId) -> String,
{
    if records.is_empty() {
        return "No payments recorded.\n".to_string();
    }

    records
        .iter()
        .map(|r| {
            format!(
                "{}  {}  {} paid {} {}\n",
                r.id,
                r.created_at.format(date_format),
                name_of(r.from),
                name_of(r.to),
                r.amount.format_with_symbol(symbol)
            )
        })
        .collect()
}
