// Author: Dustin Pilgrim
// License: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sessionwatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Idle session monitor"
)]
pub struct Args {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action)]
    pub verbose: bool,

    #[arg(long, action, help = "Do not write ~/.cache/sessionwatch/sessionwatch.log")]
    pub no_log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Run a monitor driven by commands on stdin")]
    Run {
        #[arg(long, value_name = "NAME", help = "Start signed in as NAME")]
        user: Option<String>,
    },

    #[command(about = "Print the effective configuration")]
    Config {
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_user() {
        let args = Args::try_parse_from(["sessionwatch", "-v", "run", "--user", "ana"]).unwrap();
        assert!(args.verbose);
        assert!(matches!(args.command, Command::Run { user: Some(ref u) } if u == "ana"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["sessionwatch"]).is_err());
    }
}
