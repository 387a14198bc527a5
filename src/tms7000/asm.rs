// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! TMS7000 assembler.

use crate::core::assembler::{split_statement, Assembler, Encoded};
use crate::core::error::{ErrorKind, Reporter, Span};
use crate::core::insn::Insn;
use crate::core::options::Options;
use crate::core::symbol::SymbolTable;
use crate::core::value::{overflow_sbits, overflow_u16, overflow_u8};

use super::operand::{accept_mode, parse_operands, AddrMode, Operand};
use super::table::{Flags, CPU_TMS7000};

#[derive(Default)]
pub struct Tms7000Assembler {
    options: Options,
}

impl Tms7000Assembler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Assembler for Tms7000Assembler {
    fn cpu_name(&self) -> &'static str {
        "tms7000"
    }

    fn options(&self) -> &Options {
        &self.options
    }

    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    fn encode(&self, line: &str, addr: u32, symbols: Option<&dyn SymbolTable>) -> Encoded {
        let mut insn = Insn::new(addr);
        let mut reporter = Reporter::new();

        let Some(stmt) = split_statement(line) else {
            return Encoded { insn, error: None };
        };
        let mnemonic_span = Span::new(stmt.mnemonic_at, stmt.mnemonic_at + stmt.mnemonic.len());

        let mut ops = match parse_operands(stmt.operands, stmt.operands_at, symbols) {
            Ok(ops) => ops,
            Err((kind, span)) => {
                reporter.set_error_if(kind, span);
                return Encoded {
                    insn,
                    error: reporter.error(),
                };
            }
        };

        let found = CPU_TMS7000.search_name(stmt.mnemonic, |entry, _| {
            accept_entry(entry.flags(), &ops)
        });
        let (entry, _) = match found {
            Ok(hit) => hit,
            Err(kind) => {
                reporter.set_error_if(kind, mnemonic_span);
                return Encoded {
                    insn,
                    error: reporter.error(),
                };
            }
        };

        insn.set_name(entry.name());
        if let Err(kind) = encode_entry(&mut insn, entry.opcode(), entry.flags(), &mut ops) {
            reporter.set_error_if(kind, mnemonic_span);
        }
        for op in &ops {
            reporter.merge(&op.reporter);
        }
        Encoded {
            insn,
            error: reporter.error(),
        }
    }
}

fn accept_entry(flags: &Flags, ops: &[Operand]) -> bool {
    match ops {
        [] => flags.mode1() == AddrMode::None,
        [op] => flags.mode2() == AddrMode::None && accept_mode(op.mode, flags.mode1()),
        [op1, op2] => accept_mode(op1.mode, flags.mode1()) && accept_mode(op2.mode, flags.mode2()),
        _ => false,
    }
}

fn encode_entry(
    insn: &mut Insn,
    opcode: u16,
    flags: &Flags,
    ops: &mut [Operand],
) -> Result<(), ErrorKind> {
    insn.emit_byte(opcode as u8)?;
    let mut index = 0;
    for mode in [flags.mode1(), flags.mode2()] {
        match mode {
            AddrMode::None => {}
            AddrMode::A | AddrMode::B => index += 1,
            mode => {
                encode_operand(insn, mode, &mut ops[index])?;
                index += 1;
            }
        }
    }
    Ok(())
}

fn encode_operand(insn: &mut Insn, mode: AddrMode, op: &mut Operand) -> Result<(), ErrorKind> {
    if !op.value.resolved {
        op.reporter.set_error_if(ErrorKind::UndefinedSymbol, op.span);
    }
    let val = op.value.val;
    match mode {
        AddrMode::Rn | AddrMode::Pn => {
            let byte = if overflow_u8(val) {
                op.reporter.set_error_if(ErrorKind::OverflowRange, op.span);
                0
            } else {
                val as u8
            };
            insn.emit_byte(byte)
        }
        AddrMode::At => {
            let word = if overflow_u16(val) {
                op.reporter.set_error_if(ErrorKind::OverflowRange, op.span);
                0
            } else {
                val as u16
            };
            insn.emit_u16_be(word)
        }
        AddrMode::Rel => {
            let mut disp = if op.value.resolved {
                (val as u32).wrapping_sub(insn.addr().wrapping_add(2)) as i32
            } else {
                0
            };
            if overflow_sbits(i64::from(disp), 8) {
                op.reporter.set_error_if(ErrorKind::OperandTooFar, op.span);
                disp = 0;
            }
            insn.emit_byte(disp as u8)
        }
        _ => Err(ErrorKind::InternalError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assemble(line: &str, addr: u32) -> Encoded {
        Tms7000Assembler::new().encode(line, addr, None)
    }

    #[test]
    fn single_op_columns() {
        let out = assemble("CLR A", 0);
        assert_eq!(out.insn.bytes(), &[0xB5]);
        let out = assemble("CLR B", 0);
        assert_eq!(out.insn.bytes(), &[0xC5]);
        let out = assemble("CLR R17", 0);
        assert_eq!(out.insn.bytes(), &[0xD5, 0x11]);
    }

    #[test]
    fn out_of_range_register_is_an_undefined_symbol() {
        let out = assemble("CLR R256", 0);
        assert_eq!(out.error.unwrap().kind, ErrorKind::UndefinedSymbol);
        assert_eq!(out.insn.bytes(), &[0xD5, 0x00]);
    }

    #[test]
    fn extended_addressing() {
        let out = assemble("LDA @>F000", 0);
        assert_eq!(out.insn.bytes(), &[0x8A, 0xF0, 0x00]);
        let out = assemble("BR @>FF00", 0);
        assert_eq!(out.insn.bytes(), &[0x8C, 0xFF, 0x00]);
    }

    #[test]
    fn relative_jumps() {
        let out = assemble("JMP >1010", 0x1000);
        assert_eq!(out.insn.bytes(), &[0xE0, 0x0E]);
        let out = assemble("JNZ >0F90", 0x1000);
        assert_eq!(out.insn.bytes(), &[0xE6, 0x8E]);
    }

    #[test]
    fn jump_out_of_range() {
        let out = assemble("JZ >1200", 0x1000);
        assert_eq!(out.error.unwrap().kind, ErrorKind::OperandTooFar);
        assert_eq!(out.insn.bytes(), &[0xE2, 0x00]);
    }

    #[test]
    fn port_moves() {
        let out = assemble("MOVP A,P6", 0);
        assert_eq!(out.insn.bytes(), &[0x82, 0x06]);
        let out = assemble("MOVP P6,B", 0);
        assert_eq!(out.insn.bytes(), &[0x91, 0x06]);
    }

    #[test]
    fn wrong_operands_vs_unknown_mnemonic() {
        let out = assemble("CLR @>F000", 0);
        assert_eq!(out.error.unwrap().kind, ErrorKind::OperandNotAllowed);
        let out = assemble("XORQ R1", 0);
        assert_eq!(out.error.unwrap().kind, ErrorKind::UnknownInstruction);
    }

    #[test]
    fn inherent_forms() {
        let out = assemble("DINT", 0);
        assert_eq!(out.insn.bytes(), &[0x06]);
        let out = assemble("RETS", 0);
        assert_eq!(out.insn.bytes(), &[0x0A]);
    }
}
