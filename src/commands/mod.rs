//! # CLI Subcommands
//!
//! Contains modules that run the subcommands.

pub mod langx;
pub mod completions;

use std::io::Read;
use log::error;
use crate::DYNERR;

#[derive(thiserror::Error,Debug)]
pub enum CommandError {
    #[error("Command could not be interpreted")]
    InvalidCommand,
    #[error("One of the parameters was out of range")]
    OutOfRange,
    #[error("File not found")]
    FileNotFound
}

/// Get the bytes to work on, either from the `file` argument or from stdin.
/// Line entry at the console is refused, the data has to be piped in.
pub fn read_input(cmd: &clap::ArgMatches,purpose: &str) -> Result<Vec<u8>,DYNERR> {
    if let Some(path) = cmd.get_one::<String>("file") {
        return match std::fs::read(path) {
            Ok(dat) => Ok(dat),
            Err(e) => {
                error!("could not read {}: {}",path,e);
                Err(Box::new(CommandError::FileNotFound))
            }
        };
    }
    if atty::is(atty::Stream::Stdin) {
        error!("line entry is not supported for `{}`, please pipe something in or use --file",purpose);
        return Err(Box::new(CommandError::InvalidCommand));
    }
    let mut dat = Vec::new();
    std::io::stdin().read_to_end(&mut dat)?;
    if dat.len()==0 {
        error!("{} did not receive any data from previous node",purpose);
        return Err(Box::new(CommandError::InvalidCommand));
    }
    Ok(dat)
}
