//! Command-line arguments.

use std::path::PathBuf;

use checkout_core::SettlementPreference;
use clap::{Parser, Subcommand};

/// Simulate customers paying at a row of cash registers
#[derive(Parser, Debug)]
#[command(name = "checkout-sim", version)]
#[command(about = "Simulate customers paying at a row of cash registers", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Admit every customer of a scenario and report the flush time
    Run {
        /// Scenario TOML file
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,

        /// Number of registers, overriding the scenario and config
        #[arg(long, value_name = "N")]
        registers: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which notes pay an amount and the change returned
    Settle {
        /// Amount due
        #[arg(long, value_name = "AMOUNT")]
        amount: u64,

        /// Note values in the wallet
        #[arg(value_name = "NOTES", required = true)]
        notes: Vec<u64>,

        /// least_change or fewest_notes, overriding the config
        #[arg(long, value_name = "PREFERENCE")]
        preference: Option<SettlementPreference>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(&["checkout-sim", "run", "day.toml"], None, false)]
    #[case::registers(&["checkout-sim", "run", "--registers", "4", "day.toml"], Some(4), false)]
    #[case::json(&["checkout-sim", "run", "day.toml", "--json"], None, true)]
    fn test_run_arguments(
        #[case] args: &[&str],
        #[case] expected_registers: Option<usize>,
        #[case] expected_json: bool,
    ) {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Run {
                scenario,
                registers,
                json,
            } => {
                assert_eq!(scenario, PathBuf::from("day.toml"));
                assert_eq!(registers, expected_registers);
                assert_eq!(json, expected_json);
            }
            other => panic!("Expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_settle_arguments() {
        let cli = Cli::try_parse_from([
            "checkout-sim",
            "settle",
            "--amount",
            "60",
            "--preference",
            "fewest-notes",
            "50",
            "20",
            "20",
        ])
        .unwrap();

        match cli.command {
            Command::Settle {
                amount,
                notes,
                preference,
                json,
            } => {
                assert_eq!(amount, 60);
                assert_eq!(notes, vec![50, 20, 20]);
                assert_eq!(preference, Some(SettlementPreference::FewestNotes));
                assert!(!json);
            }
            other => panic!("Expected settle, got {:?}", other),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["checkout-sim", "config", "--config", "my.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
        assert!(matches!(cli.command, Command::Config));
    }

    #[rstest]
    #[case::no_command(&["checkout-sim"])]
    #[case::missing_scenario(&["checkout-sim", "run"])]
    #[case::settle_without_notes(&["checkout-sim", "settle", "--amount", "5"])]
    #[case::bad_preference(&["checkout-sim", "settle", "--amount", "5", "--preference", "cheapest", "5"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }
}
