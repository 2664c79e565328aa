//! Parse a settings string for the lister.
//!
//! The settings are a JSON object with categories `listing` and `wrap`.
//! Keys that are not recognized are ignored, keys that are missing keep their defaults.

use serde_json;
use crate::DYNERR;
use crate::lang::{update_json_bool,update_json_usize};

#[derive(Clone,Debug,PartialEq)]
pub struct Listing {
    /// put each trailing REM on its own line rather than joining it to the previous statement
    pub split_comments: bool,
    /// line up the `=` of adjacent assignments
    pub align_assignments: bool,
    /// show branch source and destination markers
    pub show_branch_targets: bool,
    /// show name, length, and load address before the listing
    pub show_header: bool,
    /// only show line numbers that are branch destinations
    pub only_show_target_line_numbers: bool
}

#[derive(Clone,Debug,PartialEq)]
pub struct Wrap {
    /// width at which long PRINT strings are wrapped, 0 disables
    pub print: usize,
    /// reserved, comments are not wrapped
    pub comment: usize
}

#[derive(Clone,Debug,PartialEq)]
pub struct Settings {
    pub listing: Listing,
    pub wrap: Wrap
}

impl Settings {
    pub fn new() -> Self {
        Self {
            listing: Listing {
                split_comments: false,
                align_assignments: true,
                show_branch_targets: true,
                show_header: true,
                only_show_target_line_numbers: false
            },
            wrap: Wrap {
                print: 40,
                comment: 60
            }
        }
    }
}

pub fn parse(json: &str) -> Result<Settings,DYNERR> {
    let mut ans = Settings::new();
    let root = serde_json::from_str::<serde_json::Value>(json)?;
    if let Some(obj) = root.as_object() {
        for (key,val) in obj {
            match key.as_str() {
                "listing" => {
                    update_json_bool(val,"splitComments",&mut ans.listing.split_comments);
                    update_json_bool(val,"alignAssignments",&mut ans.listing.align_assignments);
                    update_json_bool(val,"showBranchTargets",&mut ans.listing.show_branch_targets);
                    update_json_bool(val,"showHeader",&mut ans.listing.show_header);
                    update_json_bool(val,"onlyShowTargetLineNumbers",&mut ans.listing.only_show_target_line_numbers);
                },
                "wrap" => {
                    update_json_usize(val,"print",&mut ans.wrap.print);
                    update_json_usize(val,"comment",&mut ans.wrap.comment);
                },
                _ => {}
            }
        }
    }
    Ok(ans)
}
