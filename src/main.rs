use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use roster::cli::{handle_backup_command, handle_student_command};
use roster::config::{paths::RosterPaths, settings::Settings};
use roster::models::StudentId;
use roster::storage::Storage;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Command-line student record manager",
    long_about = "Roster keeps a table of student records in a CSV file. \
                  Add, update, search and delete students, check their contact \
                  details, and take or restore backups of the whole roster."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Student(roster::cli::StudentCommands),

    /// Backup management commands
    #[command(subcommand)]
    Backup(roster::cli::BackupCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only show entries for this student ID
        #[arg(short, long)]
        student: Option<StudentId>,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = RosterPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::open(paths.clone())?.with_audit(settings.audit_enabled);
    if !paths.settings_file().exists() {
        settings.save(&paths)?;
    }

    match cli.command {
        Some(Commands::Student(cmd)) => {
            handle_student_command(&mut storage, &settings, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&mut storage, &settings, cmd)?;
        }
        Some(Commands::Audit { limit, student }) => {
            let entries = match student {
                Some(id) => {
                    let all = storage.audit().read_for_student(&id.to_string())?;
                    let start = all.len().saturating_sub(limit);
                    all[start..].to_vec()
                }
                None => storage.audit().read_recent(limit)?,
            };

            if entries.is_empty() {
                println!("No audit entries found.");
            }
            for entry in &entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Config) => {
            println!("Roster Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Students file:    {}", paths.students_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Backups kept:      {}", settings.backup_retention.keep);
            println!("  Audit enabled:     {}", settings.audit_enabled);
            println!("  Validate contacts: {}", settings.validate_contact);
            println!("  Date format:       {}", settings.date_format);
        }
        None => {
            println!("Roster - student record manager");
            println!();
            println!("Run 'roster --help' for usage information.");
        }
    }

    Ok(())
}
