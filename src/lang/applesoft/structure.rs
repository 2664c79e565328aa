//! Structural analysis of statements.
//!
//! Each raw statement is classified by its leading byte.  Loop variables, branch targets,
//! and the position of the assignment operator are extracted here, so that the lister
//! can work from immutable records.

use std::collections::HashSet;
use log::warn;
use super::{Token,TOK_EQUALS,COMMA};
use super::program::{RawLine,RawStatement,Statement};
use super::detokenizer::Detokenizer;

/// Line numbers that are the destination of a branch somewhere in the program
pub struct BranchTargets {
    pub gotos: HashSet<u16>,
    pub gosubs: HashSet<u16>
}

impl BranchTargets {
    pub fn new() -> Self {
        Self {
            gotos: HashSet::new(),
            gosubs: HashSet::new()
        }
    }
}

fn ascii(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_string()
}

/// Parse a branch target, the tokenizer has already removed any spaces.
fn parse_target(bytes: &[u8],keyword: &str,line_num: u16) -> Option<u16> {
    let target = ascii(bytes);
    match u16::from_str_radix(target.trim(),10) {
        Ok(num) => Some(num),
        Err(_) => {
            warn!("error parsing {}{} in line {}",keyword,target,line_num);
            None
        }
    }
}

/// Column of the `=` token within the detokenized statement, or 0 if there is none.
/// The search skips the leading byte, which is either `LET` or part of the variable name.
fn assign_column(body: &[u8],detok: &Detokenizer) -> usize {
    if body.len() < 2 || !body[1..].contains(&TOK_EQUALS) {
        return 0;
    }
    match detok.detokenize(body).find('=') {
        Some(col) => col,
        None => 0
    }
}

/// Produce the statement record for a raw byte range, adding any branch target to `targets`.
pub fn classify(buf: &[u8],
    raw: &RawStatement,
    line_idx: usize,
    line: &RawLine,
    detok: &Detokenizer,
    align_assignments: bool,
    targets: &mut BranchTargets) -> Statement
{
    let body = &buf[raw.offset..raw.offset+raw.length];
    let span = raw.length + raw.delimiter;
    let leading = match span {
        0 => Token::Plain(super::EOL),
        _ => Token::from_byte(buf[raw.offset])
    };
    let mut ans = Statement {
        line: line_idx,
        offset: raw.offset,
        length: raw.length,
        delimiter: raw.delimiter,
        leading,
        is_first: raw.offset == line.offset + super::LINE_HEADER,
        for_variable: None,
        next_variables: None,
        branch_target: None,
        assign_column: 0,
        conceals_code: false
    };
    let tail = match body.len() {
        0 => &body[0..0],
        _ => &body[1..]
    };
    match leading {
        Token::For => {
            let end = tail.iter().position(|b| *b==TOK_EQUALS).unwrap_or(tail.len());
            ans.for_variable = Some(ascii(&tail[0..end]));
        },
        Token::Next => {
            ans.next_variables = match tail.len() {
                0 => Some(Vec::new()),
                _ => Some(tail.split(|b| *b==COMMA).map(ascii).collect())
            };
        },
        Token::Let => {
            ans.assign_column = assign_column(body,detok);
        },
        Token::Goto => {
            ans.branch_target = parse_target(tail,"GOTO ",line.number);
            if let Some(num) = ans.branch_target {
                targets.gotos.insert(num);
            }
        },
        Token::Gosub => {
            ans.branch_target = parse_target(tail,"GOSUB ",line.number);
            if let Some(num) = ans.branch_target {
                targets.gosubs.insert(num);
            }
        },
        Token::Rem => {
            ans.conceals_code = tail.iter().any(|b| *b > 127);
        },
        Token::Plain(_) if leading.is_digit() => {
            ans.branch_target = parse_target(body,"",line.number);
            if let Some(num) = ans.branch_target {
                targets.gotos.insert(num);
            }
        },
        Token::Plain(_) => {
            if align_assignments {
                ans.assign_column = assign_column(body,detok);
            }
        },
        Token::If | Token::Then | Token::Print | Token::Equals | Token::Other(_) => {}
    }
    ans
}

/// Loop variables are the same if they match exactly, or if they match in the first
/// two characters, which are the only ones Applesoft pays attention to.
pub fn same_variable(v1: &str,v2: &str) -> bool {
    if v1 == v2 {
        return true;
    }
    let (b1,b2) = (v1.as_bytes(),v2.as_bytes());
    b1.len() >= 2 && b2.len() >= 2 && b1[0..2] == b2[0..2]
}

/// Close loops for a `NEXT` statement.  A naked `NEXT` closes the innermost loop,
/// otherwise each variable pops the stack until its loop is found.
pub fn pop_loop_variables(loop_stack: &mut Vec<String>,stmt: &Statement) {
    let vars = match &stmt.next_variables {
        Some(v) => v,
        None => return
    };
    if vars.len() == 0 {
        loop_stack.pop();
        return;
    }
    for var in vars {
        while let Some(open) = loop_stack.pop() {
            if same_variable(var,&open) {
                break;
            }
        }
    }
}
