use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use splitbook::cli::{
    handle_expense_command, handle_export_command, handle_group_command, handle_log_command,
    handle_member_command, handle_report_command, handle_settle_command,
};
use splitbook::config::{Settings, SplitbookPaths};
use splitbook::logging::init_logging;
use splitbook::storage::Storage;

#[derive(Parser)]
#[command(
    name = "splitbook",
    version,
    about = "Terminal-based shared expense tracker",
    long_about = "splitbook tracks shared expenses within groups of people and \
                  suggests the transfers that settle everyone's balances."
)]
struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Group management commands
    #[command(subcommand)]
    Group(splitbook::cli::GroupCommands),

    /// Member management commands
    #[command(subcommand)]
    Member(splitbook::cli::MemberCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(splitbook::cli::ExpenseCommands),

    /// Balances, settlement suggestions and recorded payments
    #[command(subcommand)]
    Settle(splitbook::cli::SettleCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(splitbook::cli::ReportCommands),

    /// Export a group to a file
    Export(splitbook::cli::ExportArgs),

    /// Show recent changes from the audit log
    Log(splitbook::cli::LogArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = SplitbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "Resolved data paths");

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing splitbook at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Create a group with: splitbook group create \"Trip\"");
        }
        Some(Commands::Config) => {
            println!("splitbook Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Date format:          {}", settings.date_format);
            println!("  Default category:     {}", settings.default_category);
            println!("  Settlement order:     {:?}", settings.settlement_order);
            println!("  Recent expense limit: {}", settings.recent_expense_limit);
            println!("  Top group limit:      {}", settings.top_group_limit);
        }
        Some(Commands::Group(cmd)) => handle_group_command(&storage, &settings, cmd)?,
        Some(Commands::Member(cmd)) => handle_member_command(&storage, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Settle(cmd)) => handle_settle_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Log(args)) => handle_log_command(&storage, args)?,
        None => {
            println!("splitbook - Terminal-based shared expense tracker");
            println!();
            println!("Run 'splitbook --help' for usage information.");
        }
    }

    Ok(())
}
