// Author: Dustin Pilgrim
// License: MIT

mod app;
mod cli;
mod session_log;

use clap::Parser;

use crate::cli::Command;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Args::parse();

    match args.command.clone() {
        Command::Run { user } => app::monitor_mode::run(&args, user).await,
        Command::Config { json } => app::command::print_config(&args, json),
    }
}
