//! # `a2list` main library
//!
//! This library produces structured listings of tokenized Applesoft BASIC programs,
//! such as those found on Apple II disk images.
//!
//! ## Architecture
//!
//! The tokenized program is handed in as a byte buffer, getting it off a disk image is
//! up to some other tool.  Decoding and rendering are handled in `lang::applesoft`:
//! * `program` splits the buffer into lines and statements
//! * `structure` classifies statements and finds the branch destinations
//! * `align` finds the column for aligned assignments
//! * `lister` renders the listing
//!
//! Machine code concealed in REM statements is handed to a `lang::disassembly::Disassemble`
//! trait object, by default a simple 6502 disassembler.
//!
//! Decoding does not fail on bad data.  Legacy disks are full of truncated programs and
//! junk bytes, so the lister shows what it can and logs what it has to skip.

pub mod lang;
pub mod commands;

type DYNERR = Box<dyn std::error::Error>;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// Format binary in rows of 16 bytes, with columns of hex, +ascii, and -ascii.
/// Each row ends with a newline.
pub fn hex_block(start_addr: u16,block: &[u8]) -> String {
    let mut ans = String::new();
    let mut slice_start = 0;
    while slice_start < block.len() {
        let row_label = start_addr.wrapping_add(slice_start as u16);
        let slice_end = usize::min(slice_start + 16,block.len());
        let slice = &block[slice_start..slice_end];
        let txt: Vec<u8> = slice.iter().map(|c| match *c {
            x if x<32 => '.' as u8,
            x if x<127 => x,
            _ => '.' as u8
        }).collect();
        let neg_txt: Vec<u8> = slice.iter().map(|c| match *c {
            x if x>=160 && x<255 => x - 128,
            _ => 46
        }).collect();
        ans += &format!("{:04X} : ",row_label);
        for byte in slice {
            ans += &format!("{:02X} ",byte);
        }
        for _blank in slice_end..slice_start+16 {
            ans += "   ";
        }
        ans += &format!("|+| {} ",String::from_utf8_lossy(&txt));
        for _blank in slice_end..slice_start+16 {
            ans += " ";
        }
        ans += &format!("|-| {}\n",String::from_utf8_lossy(&neg_txt));
        slice_start += 16;
    }
    ans
}
