//! Structured listings of tokenized programs.
//!
//! The listing puts each statement on its own row, indented by the depth of the
//! enclosing `FOR` loops and `IF` clauses.  Branch sources and destinations can be
//! marked next to the line number, assignments can be aligned, and long PRINT strings
//! are wrapped.  A REM that conceals machine code is disassembled in place.

use log::{debug,warn};
use super::{Token,deduce_address};
use super::program::Program;
use super::detokenizer::Detokenizer;
use super::settings::Settings;
use super::{align,structure};
use crate::lang::disassembly::{Disassemble,Disassembler};

/// State carried from statement to statement during one pass over the program
struct RenderState {
    /// variables of the open FOR loops, innermost last
    loop_stack: Vec<String>,
    /// indentation forced by IF clauses on the current line, NEXT cannot go below it
    if_indent_floor: usize,
    /// column where `=` goes for the current run of assignments, 0 if not yet computed
    align_column: usize
}

impl RenderState {
    fn new() -> Self {
        Self {
            loop_stack: Vec::new(),
            if_indent_floor: 0,
            align_column: 0
        }
    }
}

/// Produces listings of tokenized Applesoft
pub struct Lister {
    config: Settings,
    detok: Detokenizer,
    dasm: Box<dyn Disassemble>
}

impl Lister {
    pub fn new() -> Self {
        Self {
            config: Settings::new(),
            detok: Detokenizer::new(),
            dasm: Box::new(Disassembler::new())
        }
    }
    pub fn set_config(&mut self,config: Settings) {
        self.config = config;
    }
    pub fn config(&self) -> &Settings {
        &self.config
    }
    /// Replace the disassembler used for machine code hidden in REM statements
    pub fn use_disassembler(&mut self,dasm: Box<dyn Disassemble>) {
        self.dasm = dasm;
    }
    /// Replace the token table
    pub fn use_detokenizer(&mut self,detok: Detokenizer) {
        self.detok = detok;
    }
    /// Decode the buffer using this lister's token table and settings
    pub fn decode<'a>(&'a self,buf: &'a [u8]) -> Program<'a> {
        Program::decode(buf,&self.detok,self.config.listing.align_assignments)
    }
    /// Decode and render in one step
    pub fn list(&self,name: &str,buf: &[u8]) -> String {
        let program = self.decode(buf);
        self.render(name,&program)
    }
    fn header(&self,name: &str,buf: &[u8]) -> String {
        let load_addr = deduce_address(buf);
        format!("Name    : {}\nLength  : ${:04X} ({})\nLoad at : ${:04X} ({})\n\n",
            name,buf.len(),buf.len(),load_addr,load_addr)
    }
    /// Line number, optionally preceded by the branch markers.
    /// The first pair of glyphs marks a line that starts with GOSUB (`<<`) or GOTO (` <`),
    /// the second pair marks a line that is the destination of a GOSUB (`>>`) or GOTO (`> `).
    fn line_prefix(&self,program: &Program,line_idx: usize) -> String {
        let listing = &self.config.listing;
        let line = &program.lines()[line_idx];
        let is_target = program.is_goto_target(line.number) || program.is_gosub_target(line.number);
        let num_txt = match listing.show_branch_targets && listing.only_show_target_line_numbers && !is_target {
            true => String::new(),
            false => format!("{:5}",line.number)
        };
        if !listing.show_branch_targets {
            return format!(" {}",num_txt);
        }
        let mut c1 = "  ";
        let mut c2 = "  ";
        if let Some(first) = program.line_statements(line_idx).first() {
            match first.leading {
                Token::Gosub => c1 = "<<",
                Token::Goto => c1 = " <",
                _ => {}
            }
        }
        if program.is_goto_target(line.number) {
            c2 = "> ";
        }
        if program.is_gosub_target(line.number) {
            c2 = ">>";
        }
        if c1 == "  " && c2 != "  " {
            c1 = "--";
        }
        if c1 != "  " && c2 == "  " {
            c2 = "--";
        }
        format!("{}{} {}",c1,c2,num_txt)
    }
    fn render_concealed_code(&self,program: &Program,idx: usize,text: &str,code: &mut String) {
        // skip the REM token
        let addr = program.statement_address(idx).wrapping_add(1);
        let bytes = &program.statement_bytes(idx)[1..];
        *code += text;
        *code += &format!("REM - Inline assembler @ ${:04X} ({})\n",addr,addr);
        let padding = " ".repeat(text.len() + 2);
        match self.dasm.disassemble(bytes,addr) {
            Ok(lines) => {
                for line in lines {
                    *code += &padding;
                    *code += &line;
                    *code += "\n";
                }
            },
            Err(e) => {
                warn!("could not disassemble REM at ${:04X}: {}",addr,e);
                *code += &padding;
                *code += "<machine code could not be disassembled>\n";
            }
        }
    }
    /// Wrap a PRINT statement with a single long string literal.
    /// Full rows are moved to `code`, the remainder is left in `text`.
    /// Continuation rows start under the opening quote.
    fn wrap_print(&self,text: &mut String,code: &mut String) {
        let width = self.config.wrap.print;
        if width == 0 || text.matches('"').count() != 2 || text.contains(':') || text.contains(';') {
            return;
        }
        let first = match text.find('"') {
            Some(i) => i,
            None => return
        };
        let last = match text[first+1..].find('"') {
            Some(i) => first + 1 + i,
            None => return
        };
        if last - first <= width {
            return;
        }
        let mut ptr = first + width;
        loop {
            *code += &text[..ptr];
            *code += "\n";
            *code += &" ".repeat(first);
            text.drain(..ptr);
            ptr = width;
            if text.len() <= width {
                break;
            }
        }
    }
    /// Render a decoded program.  `name` only appears in the header.
    pub fn render(&self,name: &str,program: &Program) -> String {
        let listing = &self.config.listing;
        let base_offset = match listing.show_branch_targets {
            true => 12,
            false => 8
        };
        let mut code = String::new();
        if listing.show_header {
            code += &self.header(name,program.buffer());
        }
        let mut state = RenderState::new();
        for (line_idx,line) in program.lines().iter().enumerate() {
            let mut text = self.line_prefix(program,line_idx) + "  ";
            // each line starts at the loop indentation
            let mut indent = state.loop_stack.len();
            state.if_indent_floor = 0;
            let mut emitted = false;
            for idx in line.statements.clone() {
                let stmt = &program.statements()[idx];
                if stmt.is_empty() {
                    // a bare separator still ends the run of assignments
                    if listing.align_assignments {
                        state.align_column = 0;
                    }
                    continue;
                }
                if stmt.conceals_code {
                    self.render_concealed_code(program,idx,&text,&mut code);
                    text.clear();
                    emitted = true;
                    continue;
                }
                if stmt.is(Token::Next) {
                    structure::pop_loop_variables(&mut state.loop_stack,stmt);
                    indent = usize::max(state.if_indent_floor,state.loop_stack.len());
                }
                if !listing.split_comments && stmt.is_joinable_comment() && emitted {
                    if code.ends_with('\n') {
                        code.pop();
                    }
                    code.push(' ');
                } else {
                    if listing.show_branch_targets && !stmt.is_first {
                        if stmt.is(Token::Gosub) {
                            text += "<<--";
                        } else if stmt.is(Token::Goto) || stmt.is_implied_goto() {
                            text += " <--";
                        }
                    }
                    if listing.align_assignments {
                        state.align_column = align::resolve(program,idx,state.align_column,listing.split_comments);
                    }
                    let column = indent * 2 + base_offset;
                    while text.len() < column {
                        text.push(' ');
                    }
                }
                let pos = match stmt.is(Token::Rem) {
                    true => 0,
                    false => state.align_column
                };
                text += &program.aligned_text(idx,pos);
                if stmt.is(Token::Print) {
                    self.wrap_print(&mut text,&mut code);
                }
                code += &text;
                code += "\n";
                text.clear();
                emitted = true;
                match stmt.leading {
                    Token::If => {
                        indent += 1;
                        state.if_indent_floor = indent;
                    },
                    Token::For => {
                        state.loop_stack.push(stmt.for_variable.clone().unwrap_or_default());
                        indent += 1;
                    },
                    _ => {}
                }
            }
            if !emitted {
                // nothing but separators, still show the line number
                code += text.trim_end();
                code += "\n";
            }
            // the indentation changes after an IF, so any alignment is finished
            if state.if_indent_floor > 0 {
                state.align_column = 0;
            }
        }
        if code.ends_with('\n') {
            code.pop();
        }
        debug!("rendered {} lines",program.lines().len());
        code
    }
    /// Hex listing of the program, one block per line, followed by the end of program
    /// marker and any bytes that follow the program.
    pub fn hex_dump(&self,name: &str,buf: &[u8]) -> String {
        let program = self.decode(buf);
        let load_addr = program.load_address();
        let mut blocks = Vec::new();
        for line in program.lines() {
            let addr = load_addr.wrapping_add(line.offset as u16);
            blocks.push(crate::hex_block(addr,&buf[line.offset..line.offset+line.length]));
        }
        let mut ptr = program.end_offset();
        if ptr + 1 < buf.len() && buf[ptr]==0 && buf[ptr+1]==0 {
            blocks.push(crate::hex_block(load_addr.wrapping_add(ptr as u16),&buf[ptr..ptr+2]));
            ptr += 2;
        }
        if ptr < buf.len() {
            debug!("{} bytes follow the program",buf.len() - ptr);
            blocks.push(crate::hex_block(load_addr.wrapping_add(ptr as u16),&buf[ptr..]));
        }
        let mut ans = String::new();
        if self.config.listing.show_header {
            ans += &self.header(name,buf);
        }
        ans += &blocks.join("\n");
        if ans.ends_with('\n') {
            ans.pop();
        }
        ans
    }
}
