//! Audit log CLI command

use clap::Args;

use crate::error::SplitbookResult;
use crate::storage::Storage;

/// Arguments for `splitbook log`
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Print the most recent audit entries, oldest first
pub fn handle_log_command(storage: &Storage, args: LogArgs) -> SplitbookResult<()> {
    let entries = storage.audit().read_recent(args.limit)?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
