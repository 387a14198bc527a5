// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Signetics 2650 assembler.

use crate::core::assembler::{split_statement, Assembler, Encoded};
use crate::core::error::{ErrorKind, Reporter, Span};
use crate::core::insn::Insn;
use crate::core::options::Options;
use crate::core::symbol::SymbolTable;
use crate::core::value::{overflow_sbits, overflow_u8};

use super::operand::{parse_cond, parse_operands, parse_reg, Operand};
use super::table::{Flags, OperFmt, Suffix, CPU_SCN2650};

#[derive(Default)]
pub struct Scn2650Assembler {
    options: Options,
}

impl Scn2650Assembler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Assembler for Scn2650Assembler {
    fn cpu_name(&self) -> &'static str {
        "scn2650"
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

        // The register or condition rides on the mnemonic: `LODA,R0`.
        let (base, suffix_token) = match stmt.mnemonic.split_once(',') {
            Some((base, tail)) => (base, Some(tail)),
            None => (stmt.mnemonic, None),
        };

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

        let found = CPU_SCN2650.search_name(base, |entry, _| {
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

        let low = match suffix_code(entry.flags().suffix(), suffix_token, entry.name()) {
            Ok(low) => low,
            Err(kind) => {
                reporter.set_error_if(kind, mnemonic_span);
                0
            }
        };

        let emit = encode_entry(
            &mut insn,
            entry.opcode() as u8 | low,
            entry.flags(),
            &mut ops,
        );
        if let Err(kind) = emit {
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
    match flags.oper() {
        OperFmt::None => ops.is_empty(),
        _ => ops.len() == 1,
    }
}

fn suffix_code(suffix: Suffix, token: Option<&str>, name: &str) -> Result<u8, ErrorKind> {
    match (suffix, token) {
        (Suffix::None, None) => Ok(0),
        (Suffix::None, Some(_)) => Err(ErrorKind::OperandNotAllowed),
        (Suffix::Reg, Some(token)) => {
            let reg = parse_reg(token).ok_or(ErrorKind::UnknownRegister)?;
            // STRZ,R0 would be the NOP encoding.
            if reg == 0 && name == "STRZ" {
                return Err(ErrorKind::IllegalRegister);
            }
            Ok(reg)
        }
        (Suffix::Reg, None) => Err(ErrorKind::UnknownRegister),
        (Suffix::Cond, Some(token)) => parse_cond(token).ok_or(ErrorKind::OperandNotAllowed),
        (Suffix::Cond, None) => Err(ErrorKind::OperandNotAllowed),
    }
}

fn encode_entry(
    insn: &mut Insn,
    opcode: u8,
    flags: &Flags,
    ops: &mut [Operand],
) -> Result<(), ErrorKind> {
    insn.emit_byte(opcode)?;
    match flags.oper() {
        OperFmt::None => Ok(()),
        OperFmt::Imm8 => encode_imm8(insn, &mut ops[0]),
        OperFmt::Rel7 => encode_rel7(insn, &mut ops[0]),
        OperFmt::Abs15 => encode_abs15(insn, &mut ops[0]),
    }
}

fn encode_imm8(insn: &mut Insn, op: &mut Operand) -> Result<(), ErrorKind> {
    if !op.value.resolved {
        op.reporter.set_error_if(ErrorKind::UndefinedSymbol, op.span);
    }
    let byte = if overflow_u8(op.value.val) {
        op.reporter.set_error_if(ErrorKind::OverflowRange, op.span);
        0
    } else {
        op.value.val as u8
    };
    insn.emit_byte(byte)
}

/// 7-bit displacement from the byte after the operand, indirect in bit 7.
fn encode_rel7(insn: &mut Insn, op: &mut Operand) -> Result<(), ErrorKind> {
    let mut disp = if op.value.resolved {
        (op.value.val as u32).wrapping_sub(insn.addr().wrapping_add(2)) as i32
    } else {
        0
    };
    if overflow_sbits(i64::from(disp), 7) {
        op.reporter.set_error_if(ErrorKind::OperandTooFar, op.span);
        disp = 0;
    }
    let mut byte = disp as u8 & 0x7F;
    if op.indirect {
        byte |= 0x80;
    }
    insn.emit_byte(byte)
}

/// 15-bit address word, indirect in bit 15, stored big-endian.
fn encode_abs15(insn: &mut Insn, op: &mut Operand) -> Result<(), ErrorKind> {
    if !op.value.resolved {
        op.reporter.set_error_if(ErrorKind::UndefinedSymbol, op.span);
    }
    let val = op.value.val;
    let mut word = if op.value.resolved && !(0..=0x7FFF).contains(&val) {
        op.reporter.set_error_if(ErrorKind::OverflowRange, op.span);
        0
    } else {
        val as u16 & 0x7FFF
    };
    if op.indirect {
        word |= 0x8000;
    }
    insn.emit_u16_be(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn assemble(line: &str, addr: u32) -> Encoded {
        Scn2650Assembler::new().encode(line, addr, None)
    }

    #[test]
    fn absolute_indirect_load() {
        let out = assemble("LODA,R0 *H'19AB'", 0);
        assert!(out.is_ok());
        assert_eq!(out.insn.bytes(), &[0x0C, 0x99, 0xAB]);
        assert_eq!(out.insn.name(), "LODA");
    }

    #[test]
    fn direct_absolute_keeps_bit_15_clear() {
        let out = assemble("STRA,R3 H'1FFF'", 0);
        assert_eq!(out.insn.bytes(), &[0xCF, 0x1F, 0xFF]);
    }

    #[test]
    fn immediate_group() {
        let out = assemble("LODI,R1 H'40'", 0);
        assert_eq!(out.insn.bytes(), &[0x05, 0x40]);
        let out = assemble("COMI,R2 200", 0);
        assert_eq!(out.insn.bytes(), &[0xE6, 0xC8]);
    }

    #[test]
    fn relative_with_indirect_bit() {
        let out = assemble("LODR,R0 H'112'", 0x100);
        assert_eq!(out.insn.bytes(), &[0x08, 0x10]);
        let out = assemble("BCTR,UN *H'0F0'", 0x100);
        assert_eq!(out.insn.bytes(), &[0x1B, 0x80 | 0x6E]);
    }

    #[test]
    fn relative_out_of_range() {
        let out = assemble("BCTR,EQ H'200'", 0x100);
        assert_eq!(out.error.unwrap().kind, ErrorKind::OperandTooFar);
        assert_eq!(out.insn.bytes(), &[0x18, 0x00]);
    }

    #[test]
    fn condition_suffixes() {
        let out = assemble("RETC,EQ", 0);
        assert_eq!(out.insn.bytes(), &[0x14]);
        let out = assemble("BCTA,3 H'0400'", 0);
        assert_eq!(out.insn.bytes(), &[0x1F, 0x04, 0x00]);
    }

    #[test]
    fn bad_register_suffix() {
        let out = assemble("LODA,R7 H'100'", 0);
        assert_eq!(out.error.unwrap().kind, ErrorKind::UnknownRegister);
    }

    #[test]
    fn strz_r0_is_reserved() {
        let out = assemble("STRZ,R0", 0);
        assert_eq!(out.error.unwrap().kind, ErrorKind::IllegalRegister);
        let out = assemble("STRZ,R2", 0);
        assert_eq!(out.insn.bytes(), &[0xC2]);
    }

    #[test]
    fn address_from_symbol_table() {
        let mut symbols = HashMap::new();
        symbols.insert("VECTOR".to_string(), 0x19AB_i64);
        let out = Scn2650Assembler::new().encode("LODA,R0 *VECTOR", 0, Some(&symbols));
        assert_eq!(out.insn.bytes(), &[0x0C, 0x99, 0xAB]);
    }

    #[test]
    fn address_overflow() {
        let out = assemble("BCTA,UN H'8000'", 0);
        assert_eq!(out.error.unwrap().kind, ErrorKind::OverflowRange);
        assert_eq!(out.insn.bytes(), &[0x1F, 0x00, 0x00]);
    }
}
