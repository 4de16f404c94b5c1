//! CLI commands for data export
//!
//! Writes one group to a file as CSV, JSON or YAML.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::error::{SplitbookError, SplitbookResult};
use crate::export::{export_expenses_csv, export_group_json, export_group_yaml};
use crate::services::GroupService;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (expenses only)
    Csv,
    /// JSON format (the whole group)
    Json,
    /// YAML format (the whole group, human-readable)
    Yaml,
}

/// Arguments for `splitbook export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Group name or ID
    pub group: String,

    /// Output file path
    pub output: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

fn create_output(output: &Path) -> SplitbookResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        SplitbookError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> SplitbookResult<()> {
    let group = GroupService::new(storage).resolve(&args.group)?;
    let mut writer = create_output(&args.output)?;

    match args.format {
        ExportFormat::Csv => {
            let count = export_expenses_csv(storage, group.id, &mut writer)?;
            println!(
                "Exported {} expense(s) from {} to: {}",
                count,
                group.name,
                args.output.display()
            );
        }
        ExportFormat::Json => {
            export_group_json(storage, group.id, &mut writer, args.pretty)?;
            println!("Exported {} to: {}", group.name, args.output.display());
        }
        ExportFormat::Yaml => {
            export_group_yaml(storage, group.id, &mut writer)?;
            println!("Exported {} to: {}", group.name, args.output.display());
        }
    }

    writer
        .flush()
        .map_err(|e| SplitbookError::Export(format!("Failed to write export: {}", e)))
}
