//! Decoding of the tokenized program image.
//!
//! The scan produces byte ranges only.  Interpretation of the ranges is left to
//! `structure::classify`, which returns the immutable statement records held by `Program`.

use std::collections::HashSet;
use std::ops::Range;
use log::debug;
use super::{Token,LINE_HEADER,EOL,COLON,QUOTE,TOK_IF,TOK_THEN,TOK_GOTO,TOK_REM};
use super::detokenizer::Detokenizer;
use super::structure;

/// Byte range of a statement before classification.
#[derive(Clone,Debug,PartialEq)]
pub struct RawStatement {
    /// offset of the first byte within the program buffer
    pub offset: usize,
    /// length of the statement body, excluding any separator or terminator
    pub length: usize,
    /// length of the separator or terminator that closed the statement (0 or 1)
    pub delimiter: usize
}

/// Byte range of a line and its statements before classification.
#[derive(Clone,Debug)]
pub struct RawLine {
    pub number: u16,
    pub offset: usize,
    pub length: usize,
    pub statements: Vec<RawStatement>
}

/// One program line as stored in memory.
#[derive(Clone,Debug)]
pub struct SourceLine {
    pub number: u16,
    /// offset of the link address within the program buffer
    pub offset: usize,
    /// length of the line including header and terminator
    pub length: usize,
    /// indices into the statement arena
    pub statements: Range<usize>
}

/// A classified statement.  Lines are referenced by index into the line arena.
#[derive(Clone,Debug)]
pub struct Statement {
    pub line: usize,
    pub offset: usize,
    pub length: usize,
    pub delimiter: usize,
    pub leading: Token,
    pub is_first: bool,
    /// set for `FOR`
    pub for_variable: Option<String>,
    /// set for `NEXT`, empty means close the innermost loop
    pub next_variables: Option<Vec<String>>,
    /// set for `GOTO`, `GOSUB`, or a bare line number, if the number could be parsed
    pub branch_target: Option<u16>,
    /// column of `=` in the detokenized text, 0 if there is no assignment
    pub assign_column: usize,
    /// `REM` that is hiding machine language
    pub conceals_code: bool
}

impl Statement {
    pub fn is(&self,tok: Token) -> bool {
        self.leading == tok
    }
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
    pub fn is_implied_goto(&self) -> bool {
        self.leading.is_digit()
    }
    /// a REM that follows some other statement on the same line
    pub fn is_joinable_comment(&self) -> bool {
        self.is(Token::Rem) && !self.is_first
    }
}

/// Scan one line starting at the link address.
/// Statements are split on colons and after the condition of an `IF`,
/// but never inside strings or comments.
pub fn scan_line(buf: &[u8],line_ptr: usize) -> RawLine {
    let number = u16::from_le_bytes([buf[line_ptr+2],buf[line_ptr+3]]);
    let mut statements = Vec::new();
    let mut ptr = line_ptr + LINE_HEADER;
    let mut start = ptr;
    let mut in_string = false;
    let mut in_comment = false;
    let mut terminated = false;
    while ptr < buf.len() {
        let b = buf[ptr];
        ptr += 1;
        match b {
            EOL => {
                terminated = true;
                break;
            },
            TOK_IF if !in_string && !in_comment => {
                // the condition is not re-tokenized, so strings are not tracked here
                while ptr < buf.len() && buf[ptr]!=TOK_THEN && buf[ptr]!=TOK_GOTO && buf[ptr]!=EOL {
                    ptr += 1;
                }
                if ptr < buf.len() && buf[ptr]==TOK_THEN {
                    ptr += 1;
                }
                statements.push(RawStatement { offset: start, length: ptr - start, delimiter: 0 });
                start = ptr;
            },
            COLON if !in_string && !in_comment => {
                statements.push(RawStatement { offset: start, length: ptr - 1 - start, delimiter: 1 });
                start = ptr;
            },
            TOK_REM if !in_string => in_comment = true,
            QUOTE if !in_comment => in_string = !in_string,
            _ => {}
        }
    }
    match terminated {
        true => statements.push(RawStatement { offset: start, length: ptr - 1 - start, delimiter: 1 }),
        false => statements.push(RawStatement { offset: start, length: ptr - start, delimiter: 0 })
    }
    RawLine {
        number,
        offset: line_ptr,
        length: ptr - line_ptr,
        statements
    }
}

/// Split the buffer into raw lines.  Stops at the first link address that does not
/// increase, which is how both the end of program and trailing junk are detected.
pub fn scan_program(buf: &[u8]) -> (Vec<RawLine>,usize) {
    let mut ans = Vec::new();
    let mut ptr = 0;
    let mut prev_link = 0;
    while ptr + LINE_HEADER < buf.len() {
        let link = u16::from_le_bytes([buf[ptr],buf[ptr+1]]);
        if link <= prev_link {
            break;
        }
        let line = scan_line(buf,ptr);
        ptr += line.length;
        prev_link = link;
        ans.push(line);
    }
    debug!("scanned {} lines, stopped at offset {}",ans.len(),ptr);
    (ans,ptr)
}

/// Decoded program, borrowing the buffer it was decoded from.
pub struct Program<'a> {
    buf: &'a [u8],
    detok: &'a Detokenizer,
    lines: Vec<SourceLine>,
    statements: Vec<Statement>,
    gotos: HashSet<u16>,
    gosubs: HashSet<u16>,
    end_offset: usize
}

impl<'a> Program<'a> {
    /// Decode a tokenized program.  This never fails, a buffer that cannot be
    /// interpreted produces a program with no lines.
    /// If `align_assignments` is false, assignments are only located for `LET` statements.
    pub fn decode(buf: &'a [u8],detok: &'a Detokenizer,align_assignments: bool) -> Self {
        let (raw_lines,end_offset) = scan_program(buf);
        let mut lines = Vec::new();
        let mut statements = Vec::new();
        let mut targets = structure::BranchTargets::new();
        for (idx,raw_line) in raw_lines.iter().enumerate() {
            let beg = statements.len();
            for raw in &raw_line.statements {
                statements.push(structure::classify(buf,raw,idx,raw_line,detok,align_assignments,&mut targets));
            }
            lines.push(SourceLine {
                number: raw_line.number,
                offset: raw_line.offset,
                length: raw_line.length,
                statements: beg..statements.len()
            });
        }
        Self {
            buf,
            detok,
            lines,
            statements,
            gotos: targets.gotos,
            gosubs: targets.gosubs,
            end_offset
        }
    }
    pub fn buffer(&self) -> &[u8] {
        self.buf
    }
    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
    /// statements belonging to line `line_idx`
    pub fn line_statements(&self,line_idx: usize) -> &[Statement] {
        &self.statements[self.lines[line_idx].statements.clone()]
    }
    /// offset where decoding stopped, anything after this is not part of the program
    pub fn end_offset(&self) -> usize {
        self.end_offset
    }
    pub fn is_goto_target(&self,line_num: u16) -> bool {
        self.gotos.contains(&line_num)
    }
    pub fn is_gosub_target(&self,line_num: u16) -> bool {
        self.gosubs.contains(&line_num)
    }
    pub fn load_address(&self) -> u16 {
        super::deduce_address(self.buf)
    }
    /// address of the first byte of the statement when the program is in memory
    pub fn statement_address(&self,idx: usize) -> u16 {
        self.load_address().wrapping_add(self.statements[idx].offset as u16)
    }
    /// body bytes of the statement, excluding its separator or terminator
    pub fn statement_bytes(&self,idx: usize) -> &'a [u8] {
        let stmt = &self.statements[idx];
        &self.buf[stmt.offset..stmt.offset+stmt.length]
    }
    /// detokenized text of the statement
    pub fn statement_text(&self,idx: usize) -> String {
        self.detok.detokenize(self.statement_bytes(idx))
    }
    /// detokenized text with spaces inserted before `=` so that it lands on `column`
    pub fn aligned_text(&self,idx: usize,column: usize) -> String {
        let mut text = self.statement_text(idx);
        let assign = self.statements[idx].assign_column;
        if assign > 0 && column > assign && assign <= text.len() {
            text.insert_str(assign,&" ".repeat(column - assign));
        }
        text
    }
}
