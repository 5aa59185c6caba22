//! CLI commands for entry management

use clap::Subcommand;

use crate::error::{DeskError, DeskResult};
use crate::models::{Category, DateKey, EntryId, Money};
use crate::services::{CreateEntryInput, EntryService};
use crate::storage::Storage;

/// Entry subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Record a new entry
    Add {
        /// Category: aadhar, child, or phone
        category: String,

        /// Number of units processed
        count: u32,

        /// Unit price (e.g. "100" or "100.50")
        price: String,

        /// Entry date (d/m/yyyy), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List recorded entries
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by date (d/m/yyyy)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an entry by ID
    #[command(alias = "rm")]
    Delete {
        /// Entry ID (full UUID or ent- prefixed)
        id: String,
    },
}

/// Handle entry commands
pub fn handle_entry_command(
    storage: &Storage,
    operator: &str,
    cmd: EntryCommands,
) -> DeskResult<()> {
    let service = EntryService::new(storage, operator);

    match cmd {
        EntryCommands::Add {
            category,
            count,
            price,
            date,
        } => {
            let category = category
                .parse::<Category>()
                .map_err(|e| DeskError::Validation(e.to_string()))?;
            let price =
                Money::parse(&price).map_err(|e| DeskError::Validation(e.to_string()))?;
            let date = parse_date_arg(date)?;

            let entry = service.create(CreateEntryInput {
                category,
                count,
                price,
                date,
            })?;

            println!(
                "Recorded {} on {}: {} x {} = {}",
                entry.category, entry.date, entry.count, entry.price, entry.subtotal
            );
            Ok(())
        }

        EntryCommands::List { category, date } => {
            let category = category
                .map(|c| {
                    c.parse::<Category>()
                        .map_err(|e| DeskError::Validation(e.to_string()))
                })
                .transpose()?;
            let date = parse_date_arg(date)?;

            let entries = service.list(category, date)?;
            if entries.is_empty() {
                println!("No entries found");
                return Ok(());
            }

            println!(
                "{:<14} {:<12} {:<8} {:<8} {:>6} {:>12} {:>12}",
                "ID", "Date", "Time", "Category", "Count", "Price", "Subtotal"
            );
            for entry in &entries {
                println!(
                    "{:<14} {:<12} {:<8} {:<8} {:>6} {:>12} {:>12}",
                    entry.id.to_string(),
                    entry.date.to_string(),
                    entry.time,
                    entry.category.to_string(),
                    entry.count,
                    entry.price.to_string(),
                    entry.subtotal.to_string()
                );
            }
            println!("{} entries", entries.len());
            Ok(())
        }

        EntryCommands::Delete { id } => {
            let id: EntryId = id
                .parse()
                .map_err(|_| DeskError::Validation(format!("Invalid entry ID: {}", id)))?;

            let removed = service.delete(id)?;
            println!("Deleted {}", removed);
            Ok(())
        }
    }
}

fn parse_date_arg(date: Option<String>) -> DeskResult<Option<DateKey>> {
    date.map(|d| {
        d.parse::<DateKey>()
            .map_err(|e| DeskError::Validation(e.to_string()))
    })
    .transpose()
}
