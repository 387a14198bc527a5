// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MOS 6502 / W65C02 assembler. The two variants share one encoder and
//! differ only in which table pages they search.

use crate::core::assembler::{split_statement, Assembler, Encoded};
use crate::core::entry::Cpu;
use crate::core::error::{ErrorKind, Reporter, Span};
use crate::core::insn::Insn;
use crate::core::options::Options;
use crate::core::symbol::SymbolTable;
use crate::core::value::{overflow_sbits, overflow_u16, overflow_u8};

use super::operand::{accept_mode, parse_operands, AddrMode, Operand};
use super::table::{Flags, CPU_MOS6502, CPU_W65C02};

pub struct Mos6502Assembler {
    cpu: &'static Cpu<Flags>,
    name: &'static str,
    options: Options,
}

impl Mos6502Assembler {
    pub fn new() -> Self {
        Self {
            cpu: &CPU_MOS6502,
            name: "mos6502",
            options: Options::default(),
        }
    }

    pub fn new_w65c02() -> Self {
        Self {
            cpu: &CPU_W65C02,
            name: "w65c02",
            options: Options::default(),
        }
    }
}

impl Default for Mos6502Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler for Mos6502Assembler {
    fn cpu_name(&self) -> &'static str {
        self.name
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

        let found = self.cpu.search_name(stmt.mnemonic, |entry, _| {
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
        [] => flags.mode == AddrMode::None,
        [op] => accept_mode(op.mode, flags.mode),
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
    match flags.mode {
        AddrMode::None => Ok(()),
        AddrMode::Rel => encode_rel(insn, &mut ops[0]),
        mode => encode_operand(insn, mode, &mut ops[0]),
    }
}

fn encode_operand(insn: &mut Insn, mode: AddrMode, op: &mut Operand) -> Result<(), ErrorKind> {
    if !op.value.resolved {
        op.reporter.set_error_if(ErrorKind::UndefinedSymbol, op.span);
    }
    let val = op.value.val;
    match mode {
        AddrMode::Imm
        | AddrMode::Zpg
        | AddrMode::ZpgX
        | AddrMode::ZpgY
        | AddrMode::ZpgInd
        | AddrMode::IdxInd
        | AddrMode::IndY => {
            let byte = if overflow_u8(val) {
                op.reporter.set_error_if(ErrorKind::OverflowRange, op.span);
                0
            } else {
                val as u8
            };
            insn.emit_byte(byte)
        }
        AddrMode::Abs | AddrMode::AbsX | AddrMode::AbsY | AddrMode::Ind => {
            let word = if overflow_u16(val) {
                op.reporter.set_error_if(ErrorKind::OverflowRange, op.span);
                0
            } else {
                val as u16
            };
            // 6502 addresses are little-endian.
            insn.emit_u16_le(word)
        }
        AddrMode::None | AddrMode::Rel => Err(ErrorKind::InternalError),
    }
}

/// There is no long form to promote to on either variant, so an
/// out-of-range branch always reports `OperandTooFar`.
fn encode_rel(insn: &mut Insn, op: &mut Operand) -> Result<(), ErrorKind> {
    let mut disp = if op.value.resolved {
        (op.value.val as u32).wrapping_sub(insn.addr().wrapping_add(2)) as i32
    } else {
        0
    };
    if overflow_sbits(i64::from(disp), 8) {
        op.reporter.set_error_if(ErrorKind::OperandTooFar, op.span);
        disp = 0;
    }
    insn.emit_byte(disp as u8)
}
