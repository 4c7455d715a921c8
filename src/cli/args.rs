//! Command line argument parsing for the Fabric CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Fabric - index files and search them from the command line
#[derive(Parser, Debug, Clone)]
#[command(name = "fabric")]
#[command(about = "Index files in memory and run ranked keyword searches over them")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FabricArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Engine configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", env = "FABRIC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FabricArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Log filter matching the verbosity level.
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity() {
            0 => "error",
            1 => "warn",
            2 => "info",
            _ => "debug",
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Index files and search them
    Search(SearchArgs),

    /// Index files and show statistics
    Stats(StatsArgs),
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Files or directories to index (directories are walked recursively)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Query string
    #[arg(short = 'Q', long, value_name = "QUERY")]
    pub query: String,

    /// Maximum number of hits to print
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Files or directories to index (directories are walked recursively)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// List the key of every indexed document
    #[arg(short, long)]
    pub keys: bool,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let args = FabricArgs::try_parse_from([
            "fabric", "-vv", "search", "docs", "notes.txt", "--query", "quick dog", "--limit",
            "5",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 2);
        assert_eq!(args.log_filter(), "info");
        match args.command {
            Command::Search(search) => {
                assert_eq!(search.paths.len(), 2);
                assert_eq!(search.query, "quick dog");
                assert_eq!(search.limit, Some(5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args =
            FabricArgs::try_parse_from(["fabric", "-v", "-q", "-f", "json", "stats", "."]).unwrap();

        assert_eq!(args.verbosity(), 0);
        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::Stats(stats) => assert!(!stats.keys),
            other => panic!("unexpected command: {other:?}"),
        }

        let args = FabricArgs::try_parse_from(["fabric", "stats", "--keys", "."]).unwrap();
        assert!(matches!(args.command, Command::Stats(StatsArgs { keys: true, .. })));
    }

    #[test]
    fn test_paths_required() {
        assert!(FabricArgs::try_parse_from(["fabric", "stats"]).is_err());
        assert!(FabricArgs::try_parse_from(["fabric", "search", "--query", "x"]).is_err());
    }
}
