// Author: Dustin Pilgrim
// License: MIT

use eyre::Result;

use sessionwatch::core::manager::info::render_config;

use crate::cli::Args;

/// `sessionwatch config`: print the configuration a monitor would run with.
pub fn print_config(args: &Args, json: bool) -> Result<()> {
    crate::session_log::init(args.verbose, None)?;

    let loaded = sessionwatch::config::load(args.config.as_deref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&loaded.cfg)?);
        return Ok(());
    }

    match &loaded.path {
        Some(path) => println!("Source: {}\n", path.display()),
        None => println!("Source: built-in defaults\n"),
    }
    println!("{}", render_config(&loaded.cfg));

    Ok(())
}
