//! Command-line interface for the `attend` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, ExportCommand, FilterArgs, ListCommand, MarkCommand, StatsCommand,
    WorkOptionArg,
};

/// attend - mark and browse employee attendance
///
/// Records attendance submissions against a hosted document store and
/// offers an admin view over the collected records, including CSV export.
#[derive(Debug, Parser)]
#[command(name = "attend")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive attendance terminal
    Run,

    /// Mark attendance for one employee
    Mark(MarkCommand),

    /// List attendance records (admin)
    List(ListCommand),

    /// Export the filtered records as CSV (admin)
    Export(ExportCommand),

    /// Show summary statistics (admin)
    Stats(StatsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "attend");
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["attend", "-q", "run"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);

        let cli = Cli::try_parse_from(["attend", "run"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);

        let cli = Cli::try_parse_from(["attend", "-v", "run"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);

        let cli = Cli::try_parse_from(["attend", "-vv", "run"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_parse_mark() {
        let cli = Cli::try_parse_from([
            "attend",
            "mark",
            "--name",
            "Asha Rao",
            "--option",
            "work-from-office",
        ])
        .unwrap();
        let Command::Mark(cmd) = cli.command else {
            panic!("expected mark command");
        };
        assert_eq!(cmd.name, "Asha Rao");
        assert_eq!(cmd.option, Some(WorkOptionArg::WorkFromOffice));
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from([
            "attend", "list", "--search", "asha", "--date", "2024-01-05",
        ])
        .unwrap();
        let Command::List(cmd) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(cmd.filter.search.as_deref(), Some("asha"));
        assert_eq!(cmd.filter.date.as_deref(), Some("2024-01-05"));
        assert!(!cmd.filter.today);
    }

    #[test]
    fn test_parse_export_today() {
        let cli = Cli::try_parse_from(["attend", "export", "--today"]).unwrap();
        let Command::Export(cmd) = cli.command else {
            panic!("expected export command");
        };
        assert!(cmd.filter.today);
        assert!(cmd.output.is_none());
    }

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::try_parse_from(["attend", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));
    }

    #[test]
    fn test_parse_custom_config_file() {
        let cli = Cli::try_parse_from(["attend", "-c", "/tmp/custom.toml", "run"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/custom.toml")));
    }
}
