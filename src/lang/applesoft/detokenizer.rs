//! Module containing the statement detokenizer

use std::collections::HashMap;
use log::trace;
use super::token_maps;

/// Expands token bytes into keywords.
/// Tokens without an entry in the map are dropped from the output.
#[derive(Clone)]
pub struct Detokenizer {
    detok_map: HashMap<u8,&'static str>
}

impl Detokenizer {
    /// Create a detokenizer with the standard Applesoft keywords
    pub fn new() -> Self {
        Self {
            detok_map: HashMap::from(token_maps::DETOK_MAP)
        }
    }
    /// Create a detokenizer with some other token table
    pub fn from_map(detok_map: HashMap<u8,&'static str>) -> Self {
        Self {
            detok_map
        }
    }
    pub fn keyword(&self,tok: u8) -> Option<&'static str> {
        self.detok_map.get(&tok).copied()
    }
    /// Expand a run of tokenized bytes into text.
    /// Tokens get a leading space unless the text already ends in one, control characters
    /// are shown as `^` followed by the letter, everything else passes through.
    pub fn detokenize(&self,bytes: &[u8]) -> String {
        let mut ans = String::new();
        for b in bytes {
            if *b > 127 {
                if ans.len() > 0 && !ans.ends_with(' ') {
                    ans.push(' ');
                }
                match self.keyword(*b) {
                    Some(tok) => ans += tok,
                    None => trace!("unrecognized token {:02X}",b)
                }
            } else if *b < 32 {
                ans.push('^');
                ans.push((*b + 64) as char);
            } else {
                ans.push(*b as char);
            }
        }
        ans
    }
}
