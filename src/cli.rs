use std::path::{Path, PathBuf};

use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use crate::{
    config::app_config::AppConfig,
    sheets::{sheet_service::SheetService, values_api::ValuesApi},
};

pub const USAGE: &str = "\
Usage: sheets-table-writer [--spreadsheet <id>] <command>

Commands:
  send <top-left-cell> <csv-file>   Write a headerless CSV file starting at the given cell
  clear <range>                     Clear the values in a range
  read <range>                      Print a range as tab separated rows";

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid command: {details}")]
    InvalidCommand { details: String },
    #[error("Command execution failed")]
    ExecutionFailed,
}

impl CommandError {
    fn invalid_command<S: Into<String>>(details: S) -> Self {
        CommandError::InvalidCommand {
            details: details.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send {
        top_left_cell: String,
        csv_path: PathBuf,
    },
    Clear {
        range: String,
    },
    Read {
        range: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Overrides `sheets.spreadsheet_id` from the config.
    pub spreadsheet_id: Option<String>,
    pub command: Command,
}

/// Parses `args` as given by `std::env::args`, program name included.
pub fn parse_args(args: &[String]) -> Result<Invocation, CommandError> {
    let mut spreadsheet_id = None;
    let mut positional = Vec::new();

    let mut args = args.iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--spreadsheet" => {
                let id = args
                    .next()
                    .ok_or_else(|| CommandError::invalid_command("--spreadsheet requires an id"))?;
                spreadsheet_id = Some(id.clone());
            }
            _ => positional.push(arg.as_str()),
        }
    }

    let command = match positional.as_slice() {
        ["send", top_left_cell, csv_path] => Command::Send {
            top_left_cell: top_left_cell.to_string(),
            csv_path: PathBuf::from(csv_path),
        },
        ["clear", range] => Command::Clear {
            range: range.to_string(),
        },
        ["read", range] => Command::Read {
            range: range.to_string(),
        },
        [] => return Err(CommandError::invalid_command("Command required")),
        [name, ..] => {
            return Err(CommandError::invalid_command(format!(
                "Unknown command or wrong arguments for '{name}'"
            )))
        }
    };

    Ok(Invocation {
        spreadsheet_id,
        command,
    })
}

/// Connects to the spreadsheet named by the invocation (or the config) and runs its command.
#[instrument(skip(config))]
pub async fn run(
    config: &AppConfig,
    invocation: Invocation,
) -> error_stack::Result<String, CommandError> {
    let spreadsheet_id = invocation
        .spreadsheet_id
        .map(Into::into)
        .or_else(|| config.sheets.spreadsheet_id.clone())
        .ok_or_else(|| {
            report!(CommandError::invalid_command(
                "No spreadsheet id given; pass --spreadsheet or set sheets.spreadsheet_id"
            ))
        })?;

    let service = SheetService::connect(&config.sheets, spreadsheet_id)
        .await
        .change_context(CommandError::ExecutionFailed)?;

    execute(&service, invocation.command).await
}

#[instrument(skip(service))]
pub async fn execute<A: ValuesApi>(
    service: &SheetService<A>,
    command: Command,
) -> error_stack::Result<String, CommandError> {
    match command {
        Command::Send {
            top_left_cell,
            csv_path,
        } => {
            let table = read_csv_table(&csv_path)?;
            service
                .send_data_table(&top_left_cell, &table)
                .await
                .change_context(CommandError::ExecutionFailed)?;
            Ok(format!("Sent {} rows to {}", table.len(), top_left_cell))
        }
        Command::Clear { range } => {
            service
                .clear_table_area(&range)
                .await
                .change_context(CommandError::ExecutionFailed)?;
            Ok(format!("Cleared {range}"))
        }
        Command::Read { range } => {
            let table = service
                .read_table(&range)
                .await
                .change_context(CommandError::ExecutionFailed)?;
            Ok(format_table(&table))
        }
    }
}

/// Reads a CSV file without a header row. Rows keep their own length.
pub fn read_csv_table(path: &Path) -> error_stack::Result<Vec<Vec<String>>, CommandError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .change_context(CommandError::ExecutionFailed)
        .attach_printable_lazy(|| format!("Unable to open {}", path.display()))?;

    reader
        .records()
        .map(|record| {
            record
                .map(|record| record.iter().map(str::to_owned).collect::<Vec<_>>())
                .change_context(CommandError::ExecutionFailed)
                .attach_printable_lazy(|| format!("Malformed CSV in {}", path.display()))
        })
        .collect()
}

/// Reports the outcome of [`run`] exactly once and returns the process exit status.
pub fn finish(result: error_stack::Result<String, CommandError>) -> u8 {
    match result {
        Ok(output) => {
            println!("{output}");
            0
        }
        Err(report) => {
            tracing::error!("Command failed: {:?}", report);
            1
        }
    }
}

pub fn format_table(table: &[Vec<String>]) -> String {
    table
        .iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}
