//! # Operator Menu
//!
//! Line-oriented menu over any reader and writer. Action failures are
//! printed and the menu keeps running; only I/O errors end it.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use cc_04_query_client::QueryResult;
use shared_types::Partition;
use thiserror::Error;

use crate::app::CustodyApp;

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    CreateBatch,
    UpdateAll,
    VerifyAll,
    ReadStage,
    ReadMainChain,
    Quit,
}

impl MenuAction {
    pub const ENTRIES: [MenuAction; 5] = [
        MenuAction::CreateBatch,
        MenuAction::UpdateAll,
        MenuAction::VerifyAll,
        MenuAction::ReadStage,
        MenuAction::ReadMainChain,
    ];
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MenuAction::CreateBatch => "1: Create logs on the partitions",
            MenuAction::UpdateAll => "2: Update all records",
            MenuAction::VerifyAll => "3: Verify main chain records",
            MenuAction::ReadStage => "4: Get logs from a partition",
            MenuAction::ReadMainChain => "5: Get logs from the main chain",
            MenuAction::Quit => "q: Quit",
        };
        f.write_str(text)
    }
}

/// Unrecognized menu input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid choice: {0:?}")]
pub struct InvalidChoice(pub String);

impl FromStr for MenuAction {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuAction::CreateBatch),
            "2" => Ok(MenuAction::UpdateAll),
            "3" => Ok(MenuAction::VerifyAll),
            "4" => Ok(MenuAction::ReadStage),
            "5" => Ok(MenuAction::ReadMainChain),
            "q" | "Q" | "quit" | "exit" => Ok(MenuAction::Quit),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}

/// All records, or one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    All,
    ById,
}

impl FromStr for ReadMode {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(ReadMode::All),
            "2" => Ok(ReadMode::ById),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}

/// Interactive session over `input` and `output`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next trimmed line, `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Run until `q` or end of input.
    pub async fn run(&mut self, app: &CustodyApp) -> Result<()> {
        loop {
            writeln!(self.output)?;
            for entry in MenuAction::ENTRIES {
                writeln!(self.output, "{entry}")?;
            }
            writeln!(self.output, "{}", MenuAction::Quit)?;
            let Some(choice) = self.prompt("> ")? else {
                return Ok(());
            };
            let action = match choice.parse::<MenuAction>() {
                Ok(action) => action,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };
            if action == MenuAction::Quit {
                return Ok(());
            }
            if !self.dispatch(app, action).await? {
                return Ok(());
            }
        }
    }

    /// Run one action. Returns `false` when input ended mid-action.
    async fn dispatch(&mut self, app: &CustodyApp, action: MenuAction) -> Result<bool> {
        match action {
            MenuAction::CreateBatch => match app.create_batch().await {
                Ok(report) => writeln!(self.output, "{report}")?,
                Err(err) => writeln!(self.output, "Error: {err:#}")?,
            },
            MenuAction::UpdateAll => match app.update_all().await {
                Ok(report) => writeln!(self.output, "{report}")?,
                Err(err) => writeln!(self.output, "Error: {err:#}")?,
            },
            MenuAction::VerifyAll => match app.verify_all().await {
                Ok(report) => write!(self.output, "{report}")?,
                Err(err) => writeln!(self.output, "Error: {err:#}")?,
            },
            MenuAction::ReadStage => {
                writeln!(self.output, "\nChoose the partition to read")?;
                for partition in Partition::ALL {
                    writeln!(self.output, "{}: {}", partition.number(), partition.label())?;
                }
                let Some(choice) = self.prompt("> ")? else {
                    return Ok(false);
                };
                match choice.parse::<Partition>() {
                    Ok(partition) => return self.read_partition(app, partition).await,
                    Err(err) => writeln!(self.output, "{err}")?,
                }
            }
            MenuAction::ReadMainChain => {
                return self.read_partition(app, Partition::MainChain).await;
            }
            MenuAction::Quit => {}
        }
        Ok(true)
    }

    async fn read_partition(&mut self, app: &CustodyApp, partition: Partition) -> Result<bool> {
        writeln!(self.output, "\n1: Get all logs")?;
        writeln!(self.output, "2: Get logs by id")?;
        let Some(choice) = self.prompt("> ")? else {
            return Ok(false);
        };
        let result = match choice.parse::<ReadMode>() {
            Ok(ReadMode::All) => app.queries().list_all(partition).await,
            Ok(ReadMode::ById) => {
                let Some(id) = self.prompt("Enter the id: ")? else {
                    return Ok(false);
                };
                app.queries().get_by_id(partition, &id).await
            }
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(true);
            }
        };
        self.print_result(partition, result)?;
        Ok(true)
    }

    fn print_result(
        &mut self,
        partition: Partition,
        result: Result<QueryResult, cc_04_query_client::QueryError>,
    ) -> Result<()> {
        match result {
            Ok(result) => {
                writeln!(self.output, "*** {} ({} records)", partition.label(), result.len())?;
                writeln!(self.output, "{}", result.render())?;
            }
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(())
    }
}
