//! # Language Module
//!
//! Language specific operations are in the submodules.
//! * `applesoft` decodes tokenized programs and produces structured listings
//! * `disassembly` turns 6502 machine code into text, used for code hidden in comments

pub mod applesoft;
pub mod disassembly;

use thiserror::Error;

#[derive(Error,Debug)]
pub enum Error {
    #[error("Settings could not be interpreted")]
    Settings,
    #[error("Address out of range")]
    OutOfRange
}

/// If `maybe_obj` is an object containing `key` with a boolean value, update `curr`
pub fn update_json_bool(maybe_obj: &serde_json::Value, key: &str, curr: &mut bool) {
    if let Some(obj) = maybe_obj.as_object() {
        if let Some(x) = obj.get(key) {
            if let Some(b) = x.as_bool() {
                *curr = b;
            }
        }
    }
}

/// If `maybe_obj` is an object containing `key` with a non-negative integer value, update `curr`
pub fn update_json_usize(maybe_obj: &serde_json::Value, key: &str, curr: &mut usize) {
    if let Some(obj) = maybe_obj.as_object() {
        if let Some(x) = obj.get(key) {
            if let Some(n) = x.as_u64() {
                *curr = n as usize;
            }
        }
    }
}
