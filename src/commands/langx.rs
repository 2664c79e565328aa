//! ## Listing and Disassembly
//!
//! Runners for `list`, `dump`, and `dasm`.

use std::path::Path;
use colored::Colorize;
use super::{CommandError,read_input};
use crate::lang::applesoft::lister::Lister;
use crate::lang::applesoft::settings;
use crate::lang::disassembly::{Disassemble,Disassembler};
use crate::{STDRESULT,DYNERR};

/// Name shown in the header, either given explicitly or taken from the file path
fn program_name(cmd: &clap::ArgMatches) -> String {
    if let Some(name) = cmd.get_one::<String>("name") {
        return name.to_string();
    }
    if let Some(path) = cmd.get_one::<String>("file") {
        if let Some(stem) = Path::new(path).file_name() {
            return stem.to_string_lossy().to_string();
        }
    }
    "stdin".to_string()
}

/// Settings from `--config` if given, then overridden by individual flags
fn build_settings(cmd: &clap::ArgMatches) -> Result<settings::Settings,DYNERR> {
    let mut ans = match cmd.get_one::<String>("config") {
        Some(json) => match settings::parse(json) {
            Ok(s) => s,
            Err(e) => {
                log::error!("could not parse settings: {}",e);
                return Err(Box::new(crate::lang::Error::Settings));
            }
        },
        None => settings::Settings::new()
    };
    if cmd.get_flag("split-rem") {
        ans.listing.split_comments = true;
    }
    if cmd.get_flag("no-align") {
        ans.listing.align_assignments = false;
    }
    if cmd.get_flag("no-targets") {
        ans.listing.show_branch_targets = false;
    }
    if cmd.get_flag("no-header") {
        ans.listing.show_header = false;
    }
    if cmd.get_flag("only-targets") {
        ans.listing.only_show_target_line_numbers = true;
    }
    if let Some(w) = cmd.get_one::<usize>("wrap") {
        ans.wrap.print = *w;
    }
    Ok(ans)
}

pub fn list(cmd: &clap::ArgMatches) -> STDRESULT {
    let dat = read_input(cmd,"list")?;
    let mut lister = Lister::new();
    lister.set_config(build_settings(cmd)?);
    let program = lister.decode(&dat);
    if program.lines().len()==0 {
        eprintln!("{} {}","!".bright_yellow(),"no program lines were found".bright_yellow());
    }
    println!("{}",lister.render(&program_name(cmd),&program));
    Ok(())
}

pub fn dump(cmd: &clap::ArgMatches) -> STDRESULT {
    let dat = read_input(cmd,"dump")?;
    let mut lister = Lister::new();
    lister.set_config(build_settings(cmd)?);
    println!("{}",lister.hex_dump(&program_name(cmd),&dat));
    Ok(())
}

pub fn dasm(cmd: &clap::ArgMatches) -> STDRESULT {
    let dat = read_input(cmd,"dasm")?;
    let addr_str = match cmd.get_one::<String>("addr") {
        Some(s) => s.to_string(),
        None => "768".to_string()
    };
    let addr = match addr_str.strip_prefix('$') {
        Some(hex) => u16::from_str_radix(hex,16),
        None => u16::from_str_radix(&addr_str,10)
    };
    let addr = match addr {
        Ok(a) => a,
        Err(_) => {
            log::error!("address {} could not be interpreted",addr_str);
            return Err(Box::new(CommandError::OutOfRange));
        }
    };
    if addr as usize + dat.len() > 0x10000 {
        log::error!("code would run past the end of memory");
        return Err(Box::new(crate::lang::Error::OutOfRange));
    }
    let dasm = Disassembler::new();
    for line in dasm.disassemble(&dat,addr)? {
        println!("{}",line);
    }
    Ok(())
}
