//! Module to disassemble 6502 machine code.
//!
//! The lister only needs a simple linear disassembly of the code that is
//! sometimes hidden in a REM statement, so there is no attempt to trace
//! execution or separate code from data.  Bytes that are not documented
//! opcodes are emitted with `DFB`.

use std::collections::HashMap;
use crate::DYNERR;

/// Anything that can turn machine code into lines of text.
/// The lister calls this for every REM that conceals machine code.
pub trait Disassemble: Send + Sync {
    /// Disassemble `bytes` as if they were located at `base_addr`
    fn disassemble(&self,bytes: &[u8],base_addr: u16) -> Result<Vec<String>,DYNERR>;
}

#[derive(Clone,Copy,PartialEq,Debug)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY
}

impl AddressingMode {
    /// number of operand bytes
    pub fn operand_bytes(&self) -> usize {
        match self {
            Self::Implied | Self::Accumulator => 0,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
            _ => 1
        }
    }
}

use AddressingMode::*;

const OPCODES: [(u8,&str,AddressingMode);151] = [
    (0x69,"ADC",Immediate),(0x65,"ADC",ZeroPage),(0x75,"ADC",ZeroPageX),(0x6d,"ADC",Absolute),
    (0x7d,"ADC",AbsoluteX),(0x79,"ADC",AbsoluteY),(0x61,"ADC",IndirectX),(0x71,"ADC",IndirectY),
    (0x29,"AND",Immediate),(0x25,"AND",ZeroPage),(0x35,"AND",ZeroPageX),(0x2d,"AND",Absolute),
    (0x3d,"AND",AbsoluteX),(0x39,"AND",AbsoluteY),(0x21,"AND",IndirectX),(0x31,"AND",IndirectY),
    (0x0a,"ASL",Accumulator),(0x06,"ASL",ZeroPage),(0x16,"ASL",ZeroPageX),(0x0e,"ASL",Absolute),(0x1e,"ASL",AbsoluteX),
    (0x90,"BCC",Relative),(0xb0,"BCS",Relative),(0xf0,"BEQ",Relative),(0x30,"BMI",Relative),
    (0xd0,"BNE",Relative),(0x10,"BPL",Relative),(0x50,"BVC",Relative),(0x70,"BVS",Relative),
    (0x24,"BIT",ZeroPage),(0x2c,"BIT",Absolute),
    (0x00,"BRK",Implied),
    (0x18,"CLC",Implied),(0xd8,"CLD",Implied),(0x58,"CLI",Implied),(0xb8,"CLV",Implied),
    (0xc9,"CMP",Immediate),(0xc5,"CMP",ZeroPage),(0xd5,"CMP",ZeroPageX),(0xcd,"CMP",Absolute),
    (0xdd,"CMP",AbsoluteX),(0xd9,"CMP",AbsoluteY),(0xc1,"CMP",IndirectX),(0xd1,"CMP",IndirectY),
    (0xe0,"CPX",Immediate),(0xe4,"CPX",ZeroPage),(0xec,"CPX",Absolute),
    (0xc0,"CPY",Immediate),(0xc4,"CPY",ZeroPage),(0xcc,"CPY",Absolute),
    (0xc6,"DEC",ZeroPage),(0xd6,"DEC",ZeroPageX),(0xce,"DEC",Absolute),(0xde,"DEC",AbsoluteX),
    (0xca,"DEX",Implied),(0x88,"DEY",Implied),
    (0x49,"EOR",Immediate),(0x45,"EOR",ZeroPage),(0x55,"EOR",ZeroPageX),(0x4d,"EOR",Absolute),
    (0x5d,"EOR",AbsoluteX),(0x59,"EOR",AbsoluteY),(0x41,"EOR",IndirectX),(0x51,"EOR",IndirectY),
    (0xe6,"INC",ZeroPage),(0xf6,"INC",ZeroPageX),(0xee,"INC",Absolute),(0xfe,"INC",AbsoluteX),
    (0xe8,"INX",Implied),(0xc8,"INY",Implied),
    (0x4c,"JMP",Absolute),(0x6c,"JMP",Indirect),
    (0x20,"JSR",Absolute),
    (0xa9,"LDA",Immediate),(0xa5,"LDA",ZeroPage),(0xb5,"LDA",ZeroPageX),(0xad,"LDA",Absolute),
    (0xbd,"LDA",AbsoluteX),(0xb9,"LDA",AbsoluteY),(0xa1,"LDA",IndirectX),(0xb1,"LDA",IndirectY),
    (0xa2,"LDX",Immediate),(0xa6,"LDX",ZeroPage),(0xb6,"LDX",ZeroPageY),(0xae,"LDX",Absolute),(0xbe,"LDX",AbsoluteY),
    (0xa0,"LDY",Immediate),(0xa4,"LDY",ZeroPage),(0xb4,"LDY",ZeroPageX),(0xac,"LDY",Absolute),(0xbc,"LDY",AbsoluteX),
    (0x4a,"LSR",Accumulator),(0x46,"LSR",ZeroPage),(0x56,"LSR",ZeroPageX),(0x4e,"LSR",Absolute),(0x5e,"LSR",AbsoluteX),
    (0xea,"NOP",Implied),
    (0x09,"ORA",Immediate),(0x05,"ORA",ZeroPage),(0x15,"ORA",ZeroPageX),(0x0d,"ORA",Absolute),
    (0x1d,"ORA",AbsoluteX),(0x19,"ORA",AbsoluteY),(0x01,"ORA",IndirectX),(0x11,"ORA",IndirectY),
    (0x48,"PHA",Implied),(0x08,"PHP",Implied),(0x68,"PLA",Implied),(0x28,"PLP",Implied),
    (0x2a,"ROL",Accumulator),(0x26,"ROL",ZeroPage),(0x36,"ROL",ZeroPageX),(0x2e,"ROL",Absolute),(0x3e,"ROL",AbsoluteX),
    (0x6a,"ROR",Accumulator),(0x66,"ROR",ZeroPage),(0x76,"ROR",ZeroPageX),(0x6e,"ROR",Absolute),(0x7e,"ROR",AbsoluteX),
    (0x40,"RTI",Implied),(0x60,"RTS",Implied),
    (0xe9,"SBC",Immediate),(0xe5,"SBC",ZeroPage),(0xf5,"SBC",ZeroPageX),(0xed,"SBC",Absolute),
    (0xfd,"SBC",AbsoluteX),(0xf9,"SBC",AbsoluteY),(0xe1,"SBC",IndirectX),(0xf1,"SBC",IndirectY),
    (0x38,"SEC",Implied),(0xf8,"SED",Implied),(0x78,"SEI",Implied),
    (0x85,"STA",ZeroPage),(0x95,"STA",ZeroPageX),(0x8d,"STA",Absolute),(0x9d,"STA",AbsoluteX),
    (0x99,"STA",AbsoluteY),(0x81,"STA",IndirectX),(0x91,"STA",IndirectY),
    (0x86,"STX",ZeroPage),(0x96,"STX",ZeroPageY),(0x8e,"STX",Absolute),
    (0x84,"STY",ZeroPage),(0x94,"STY",ZeroPageX),(0x8c,"STY",Absolute),
    (0xaa,"TAX",Implied),(0xa8,"TAY",Implied),(0xba,"TSX",Implied),
    (0x8a,"TXA",Implied),(0x9a,"TXS",Implied),(0x98,"TYA",Implied)
];

#[derive(Clone)]
pub struct MachineOperation {
    pub mnemonic: &'static str,
    pub mode: AddressingMode
}

/// Linear 6502 disassembler
pub struct Disassembler {
    dasm_map: HashMap<u8,MachineOperation>
}

fn format_operand(mode: AddressingMode,operand: &[u8],addr: u16) -> String {
    let val = match operand.len() {
        0 => 0,
        1 => operand[0] as u16,
        _ => u16::from_le_bytes([operand[0],operand[1]])
    };
    match mode {
        Implied | Accumulator => String::new(),
        Immediate => format!("#${:02X}",val),
        ZeroPage => format!("${:02X}",val),
        ZeroPageX => format!("${:02X},X",val),
        ZeroPageY => format!("${:02X},Y",val),
        Relative => {
            let dest = addr.wrapping_add(2).wrapping_add(operand[0] as i8 as u16);
            format!("${:04X}",dest)
        },
        Absolute => format!("${:04X}",val),
        AbsoluteX => format!("${:04X},X",val),
        AbsoluteY => format!("${:04X},Y",val),
        Indirect => format!("(${:04X})",val),
        IndirectX => format!("(${:02X},X)",val),
        IndirectY => format!("(${:02X}),Y",val)
    }
}

fn format_line(addr: u16,bytes: &[u8],instruction: &str,operand: &str) -> String {
    let hex_bytes = bytes.iter().map(|b| format!("{:02X}",b)).collect::<Vec<String>>().join(" ");
    let ans = format!("{:04X}: {:<9} {:<4}{}",addr,hex_bytes,instruction,operand);
    ans.trim_end().to_string()
}

impl Disassembler {
    pub fn new() -> Self {
        let mut dasm_map = HashMap::new();
        for (code,mnemonic,mode) in OPCODES {
            dasm_map.insert(code,MachineOperation { mnemonic, mode });
        }
        Self {
            dasm_map
        }
    }
    pub fn operation(&self,code: u8) -> Option<&MachineOperation> {
        self.dasm_map.get(&code)
    }
}

impl Disassemble for Disassembler {
    fn disassemble(&self,bytes: &[u8],base_addr: u16) -> Result<Vec<String>,DYNERR> {
        let mut ans = Vec::new();
        let mut ptr = 0;
        while ptr < bytes.len() {
            let addr = base_addr.wrapping_add(ptr as u16);
            match self.operation(bytes[ptr]) {
                Some(op) if ptr + 1 + op.mode.operand_bytes() <= bytes.len() => {
                    let end = ptr + 1 + op.mode.operand_bytes();
                    let operand = format_operand(op.mode,&bytes[ptr+1..end],addr);
                    ans.push(format_line(addr,&bytes[ptr..end],op.mnemonic,&operand));
                    ptr = end;
                },
                Some(_) => {
                    // instruction runs past the end, show the rest as data
                    let rest = hex::encode_upper(&bytes[ptr..]);
                    ans.push(format_line(addr,&bytes[ptr..],"HEX",&rest));
                    ptr = bytes.len();
                },
                None => {
                    ans.push(format_line(addr,&bytes[ptr..ptr+1],"DFB",&format!("${:02X}",bytes[ptr])));
                    ptr += 1;
                }
            }
        }
        Ok(ans)
    }
}

#[cfg(test)]
mod tests {
    use super::{Disassemble,Disassembler};

    fn test_dasm(hex_code: &str,addr: u16,expected: &[&str]) {
        let code = hex::decode(hex_code).expect("hex error");
        let dasm = Disassembler::new();
        let actual = dasm.disassemble(&code,addr).expect("disassembly error");
        assert_eq!(actual,expected);
    }

    #[test]
    fn operation_count() {
        let dasm = Disassembler::new();
        assert_eq!(dasm.dasm_map.len(),151);
    }
    #[test]
    fn simple_routine() {
        test_dasm("A9C18D00C060",0x300,&[
            "0300: A9 C1     LDA #$C1",
            "0302: 8D 00 C0  STA $C000",
            "0305: 60        RTS"
        ]);
    }
    #[test]
    fn addressing_modes() {
        test_dasm("B1065D0020A20A",0x800,&[
            "0800: B1 06     LDA ($06),Y",
            "0802: 5D 00 20  EOR $2000,X",
            "0805: A2 0A     LDX #$0A"
        ]);
    }
    #[test]
    fn branch_backward() {
        test_dasm("CAD0FD",0x1000,&[
            "1000: CA        DEX",
            "1001: D0 FD     BNE $1000"
        ]);
    }
    #[test]
    fn illegal_and_truncated() {
        test_dasm("FF20ED",0x2000,&[
            "2000: FF        DFB $FF",
            "2001: 20 ED     HEX 20ED"
        ]);
    }
}
