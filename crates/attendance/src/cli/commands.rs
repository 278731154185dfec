//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::filter::RecordFilter;
use crate::record::WorkOption;

/// Mark command arguments.
#[derive(Debug, Args)]
pub struct MarkCommand {
    /// Full name of the employee
    #[arg(short, long)]
    pub name: String,

    /// Attendance type
    #[arg(short, long, value_enum)]
    pub option: Option<WorkOptionArg>,
}

/// Record filter flags shared by the admin commands.
#[derive(Debug, Args, Default)]
pub struct FilterArgs {
    /// Match name or username (case-insensitive substring)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact record date (e.g. 2024-01-05)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Only today's records (overrides --date)
    #[arg(short, long)]
    pub today: bool,
}

impl FilterArgs {
    /// Build the filter these flags describe.
    #[must_use]
    pub fn to_filter(&self) -> RecordFilter {
        let mut filter = RecordFilter::new();
        if let Some(search) = &self.search {
            filter = filter.with_search(search);
        }
        if let Some(date) = &self.date {
            filter = filter.with_date(date);
        }
        if self.today {
            filter = filter.today_only();
        }
        filter
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Filter flags
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Admin email (defaults to the configured one)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Filter flags
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Admin email (defaults to the configured one)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Directory to write the CSV into
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Admin email (defaults to the configured one)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Attendance type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WorkOptionArg {
    /// Working remotely
    WorkFromHome,
    /// Present at the office
    WorkFromOffice,
    /// Absent for the day
    OnLeave,
}

impl From<WorkOptionArg> for WorkOption {
    fn from(arg: WorkOptionArg) -> Self {
        match arg {
            WorkOptionArg::WorkFromHome => Self::WorkFromHome,
            WorkOptionArg::WorkFromOffice => Self::WorkFromOffice,
            WorkOptionArg::OnLeave => Self::OnLeave,
        }
    }
}
