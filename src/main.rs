//! # Command Line Interface
//!
//! The CLI is defined in `cli.rs`, the subcommands are run from the `commands` module.

use env_logger;
#[cfg(windows)]
use colored;
use log::error;
use a2list::commands;

mod cli;

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    #[cfg(windows)]
    let _ = colored::control::set_virtual_terminal(true);
    let main_cmd = cli::build_cli();
    let matches = main_cmd.clone().get_matches();

    if let Some(cmd) = matches.subcommand_matches("list") {
        return commands::langx::list(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("dump") {
        return commands::langx::dump(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("dasm") {
        return commands::langx::dasm(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("completions") {
        return commands::completions::generate(main_cmd,cmd);
    }

    error!("No subcommand was found, try `a2list --help`");
    return Err(Box::new(commands::CommandError::InvalidCommand));
}
