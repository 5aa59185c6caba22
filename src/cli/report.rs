//! CLI commands for reports
//!
//! Provides commands for generating and exporting the four report views.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{DeskError, DeskResult};
use crate::reports::{IncomeReport, MonthlyReport, TodayReport, WeeklyReport};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Today's entries across all categories
    Today {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// The trailing seven days, oldest first
    Weekly {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Per-day breakdown of every recorded date
    Monthly {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Daily income series with all-time totals
    Income {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> DeskResult<()> {
    let calendar = settings.holiday_calendar()?;

    match cmd {
        ReportCommands::Today { output } => {
            let report = TodayReport::generate(storage, &calendar)?;
            emit(output, report.format_terminal(), |w| report.export_csv(w))
        }
        ReportCommands::Weekly { output } => {
            let report = WeeklyReport::generate(storage, &calendar)?;
            emit(output, report.format_terminal(), |w| report.export_csv(w))
        }
        ReportCommands::Monthly { output } => {
            let report = MonthlyReport::generate(storage, &calendar)?;
            emit(output, report.format_terminal(), |w| report.export_csv(w))
        }
        ReportCommands::Income { output } => {
            let report = IncomeReport::generate(storage)?;
            emit(output, report.format_terminal(), |w| report.export_csv(w))
        }
    }
}

/// Print the terminal rendering, or write CSV to the requested file
fn emit<F>(output: Option<PathBuf>, terminal: String, export: F) -> DeskResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> DeskResult<()>,
{
    match output {
        Some(path) => {
            let file = File::create(&path)
                .map_err(|e| DeskError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
            let mut writer = BufWriter::new(file);
            export(&mut writer)?;
            println!("Report exported to {}", path.display());
            Ok(())
        }
        None => {
            println!("{}", terminal);
            Ok(())
        }
    }
}
