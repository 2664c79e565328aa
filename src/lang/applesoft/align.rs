//! Alignment of assignment operators.
//!
//! A run of adjacent assignments is rendered with every `=` in the same column.
//! The column is found by looking ahead from the first assignment in the run.

use super::Token;
use super::program::Program;

/// Look ahead from statement `start` to find the widest assignment column in its run.
/// The run ends at the first statement with no assignment, except that comments that
/// will be joined to the previous line are passed over.  If the starting statement
/// follows an `IF` on its own line, the run cannot continue onto the next line,
/// since the indentation will be different there.
pub fn highest_assign_column(program: &Program,start: usize,split_comments: bool) -> usize {
    let stmts = program.statements();
    let mut highest = stmts[start].assign_column;
    let start_line = stmts[start].line;
    let line_beg = program.lines()[start_line].statements.start;
    let in_if = stmts[line_beg..start].iter().any(|s| s.is(Token::If));
    for stmt in &stmts[start+1..] {
        if in_if && stmt.line != start_line {
            break;
        }
        if stmt.assign_column == 0 && (split_comments || !stmt.is_joinable_comment()) {
            break;
        }
        if stmt.assign_column > highest {
            highest = stmt.assign_column;
        }
    }
    highest
}

/// Decide the alignment column for statement `idx` given the column currently in force.
/// Returns 0 if the statement has no assignment, which also resets the run.
pub fn resolve(program: &Program,idx: usize,current: usize,split_comments: bool) -> usize {
    if program.statements()[idx].assign_column == 0 {
        return 0;
    }
    match current {
        0 => highest_assign_column(program,idx,split_comments),
        col => col
    }
}
