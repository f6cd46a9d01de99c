//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Compare LLM providers on structured financial-extraction tasks
#[derive(Debug, Parser)]
#[command(name = "finbench", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify companies as having financial red flags
    RedFlags {
        /// Dataset cache file (built from the data API when missing)
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Directory reports are written to (overrides RESULTS_DIR)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Extract cost of revenue from income-statement XBRL facts
    CostOfRevenue {
        /// Dataset JSON file
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Directory reports are written to (overrides RESULTS_DIR)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::RedFlags {
            dataset: None,
            output: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::parse_from(["finbench", "red-flags", "--dataset", "ds.json"]);
        match cli.command {
            Some(Commands::RedFlags { dataset, .. }) => {
                assert_eq!(dataset, Some(PathBuf::from("ds.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::parse_from(["finbench", "cost-of-revenue"]);
        assert!(matches!(cli.command, Some(Commands::CostOfRevenue { .. })));
    }

    #[test]
    fn bare_invocation_defaults_to_red_flags() {
        let cli = Cli::parse_from(["finbench"]);
        assert!(cli.command.is_none());
        assert!(matches!(Commands::default(), Commands::RedFlags { .. }));
    }
}
