//! # Applesoft structured listings
//!
//! Tokenized Applesoft is decoded in two stages.  The `program` module splits the
//! raw bytes into lines and statements, then the `structure` module classifies each
//! statement and gathers the branch destinations.  The `lister` module walks the result
//! and produces an indented listing, consulting the `align` module to line up
//! runs of assignments.
//!
//! Decoding never fails.  Tokenized programs found on old disks are often truncated or
//! followed by junk, so anything that cannot be interpreted is dropped or ignored.

mod token_maps;
#[cfg(test)]
mod decode_test;
#[cfg(test)]
mod structure_test;
pub mod detokenizer;
pub mod program;
pub mod structure;
pub mod align;
pub mod lister;
pub mod settings;

pub const TOK_FOR: u8 = 0x81;
pub const TOK_NEXT: u8 = 0x82;
pub const TOK_LET: u8 = 0xaa;
pub const TOK_GOTO: u8 = 0xab;
pub const TOK_IF: u8 = 0xad;
pub const TOK_GOSUB: u8 = 0xb0;
pub const TOK_REM: u8 = 0xb2;
pub const TOK_PRINT: u8 = 0xba;
pub const TOK_THEN: u8 = 0xc4;
pub const TOK_EQUALS: u8 = 0xd0;

pub const QUOTE: u8 = 0x22;
pub const COLON: u8 = 0x3a;
pub const SEMICOLON: u8 = 0x3b;
pub const COMMA: u8 = 0x2c;
pub const EOL: u8 = 0x00;

/// link address and line number
pub const LINE_HEADER: usize = 4;

/// Classification of the leading byte of a statement.
/// Only the tokens that affect the structure of a listing get their own variant.
#[derive(Clone,Copy,PartialEq,Eq,Debug)]
pub enum Token {
    For,
    Next,
    Let,
    Goto,
    Gosub,
    If,
    Then,
    Rem,
    Print,
    Equals,
    /// any other token, high bit set
    Other(u8),
    /// ASCII byte, not a token
    Plain(u8)
}

impl Token {
    pub fn from_byte(b: u8) -> Self {
        match b {
            TOK_FOR => Self::For,
            TOK_NEXT => Self::Next,
            TOK_LET => Self::Let,
            TOK_GOTO => Self::Goto,
            TOK_GOSUB => Self::Gosub,
            TOK_IF => Self::If,
            TOK_THEN => Self::Then,
            TOK_REM => Self::Rem,
            TOK_PRINT => Self::Print,
            TOK_EQUALS => Self::Equals,
            x if x > 127 => Self::Other(x),
            x => Self::Plain(x)
        }
    }
    pub fn is_token(&self) -> bool {
        !matches!(self,Self::Plain(_))
    }
    /// true for an ASCII digit, which at the start of a statement means an implied GOTO
    pub fn is_digit(&self) -> bool {
        matches!(self,Self::Plain(b'0'..=b'9'))
    }
}

/// Length of the line at `ptr` as the ROM would compute it:
/// header, body up to the first zero, plus the terminator.
/// Returns 0 if the link address is zero (end of program).
pub fn line_length(buf: &[u8],ptr: usize) -> usize {
    if ptr + 1 >= buf.len() {
        return 0;
    }
    if u16::from_le_bytes([buf[ptr],buf[ptr+1]])==0 {
        return 0;
    }
    let mut length = LINE_HEADER + 1;
    let mut p = ptr + LINE_HEADER;
    while p < buf.len() && buf[p]!=EOL {
        length += 1;
        p += 1;
    }
    length
}

/// The address the program was loaded at, worked out from the first link address.
pub fn deduce_address(buf: &[u8]) -> u16 {
    if buf.len() < 2 {
        return 0;
    }
    let line2_addr = u16::from_le_bytes([buf[0],buf[1]]);
    line2_addr.wrapping_sub(line_length(buf,0) as u16)
}
