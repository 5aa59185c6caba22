use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use enrol_desk::cli::{
    handle_entry_command, handle_report_command, EntryCommands, ReportCommands,
};
use enrol_desk::config::{paths::DeskPaths, settings::Settings};
use enrol_desk::export::export_entries_csv;
use enrol_desk::storage::Storage;

#[derive(Parser)]
#[command(
    name = "enroldesk",
    version,
    about = "Data entry and reporting for an enrolment center",
    long_about = "enrol-desk tracks identity-document, child-document, and \
                  phone-number transactions for an enrolment center, and turns \
                  them into daily, weekly, monthly, and income reports."
)]
struct Cli {
    /// Operator identity recorded on every mutation
    #[arg(long, global = true, env = "ENROL_DESK_OPERATOR", default_value = "desk")]
    operator: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Entry management commands
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Report commands
    #[command(subcommand, alias = "rep")]
    Report(ReportCommands),

    /// Export the raw entry register as CSV
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = DeskPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let mut storage = Storage::new(paths)?;
    storage.load_all()?;

    match cli.command {
        Commands::Init => {
            settings.setup_completed = true;
            settings.save(storage.paths())?;
            storage.save_all()?;
            println!("Initialized enrol-desk in {}", storage.paths().base_dir().display());
        }

        Commands::Config => {
            println!("Base directory: {}", storage.paths().base_dir().display());
            println!("Entries file:   {}", storage.paths().entries_file().display());
            println!("Audit log:      {}", storage.paths().audit_log().display());
            println!("Weekly off day: {}", settings.weekly_off()?);
            if settings.holidays.is_empty() {
                println!("Holidays:       (none configured)");
            } else {
                println!("Holidays:       {}", settings.holidays.join(", "));
            }
        }

        Commands::Entry(cmd) => handle_entry_command(&storage, &cli.operator, cmd)?,

        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,

        Commands::Export { output } => match output {
            Some(path) => {
                let file = std::fs::File::create(&path)?;
                let mut writer = std::io::BufWriter::new(file);
                export_entries_csv(&storage, &mut writer)?;
                writer.flush()?;
                println!("Entries exported to {}", path.display());
            }
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                export_entries_csv(&storage, &mut handle)?;
            }
        },
    }

    Ok(())
}
