// src/cli.rs
// CLI definitions for pipdoctor. Also pulled into build.rs with `include!`
// to render the man page, so no inner doc comments here.
//
// With no flags every stage runs in order: report, deprecation, upgrade,
// dependency repair. `-d` prints the deprecation ledger and nothing else.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pipdoctor")]
#[command(author = "pipdoctor Contributors")]
#[command(version)]
#[command(about = "Report and remediate pip package health", long_about = None)]
pub struct Cli {
    /// Show the package tool's own output while upgrading
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the deprecation ledger, then exit
    #[arg(short, long)]
    pub deprecated: bool,

    /// Config file (default: ./pipdoctor.toml if present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Package tool executable
    #[arg(long, value_name = "PROGRAM")]
    pub pip: Option<String>,

    /// Deprecation ledger file
    #[arg(long, value_name = "PATH")]
    pub ledger: Option<PathBuf>,

    /// Upgrade packages even if they are in the deprecation ledger
    #[arg(long)]
    pub no_skip_deprecated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_argument_ids() {
        let ids: Vec<String> = Cli::command()
            .get_arguments()
            .map(|a| a.get_id().to_string())
            .filter(|id| id != "help" && id != "version")
            .collect();
        assert_eq!(
            ids,
            vec!["verbose", "deprecated", "config", "pip", "ledger", "no_skip_deprecated"]
        );
    }

    #[test]
    fn test_no_args() {
        let cli = Cli::try_parse_from(["pipdoctor"]).unwrap();
        assert!(!cli.verbose);
        assert!(!cli.deprecated);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["pipdoctor", "-v", "-d"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.deprecated);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "pipdoctor",
            "--pip",
            "pip3",
            "--ledger",
            "state/deprecated.txt",
            "--no-skip-deprecated",
        ])
        .unwrap();
        assert_eq!(cli.pip.as_deref(), Some("pip3"));
        assert_eq!(cli.ledger, Some(PathBuf::from("state/deprecated.txt")));
        assert!(cli.no_skip_deprecated);
    }
}
