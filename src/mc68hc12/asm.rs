// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MC68HC12 assembler: operand acceptance, byte emission, and the
//! short/long smart-branch promotion.

use crate::core::assembler::{split_statement, Assembler, Encoded};
use crate::core::branch::{choose_form, BranchForm, BranchSpec, UnresolvedPolicy};
use crate::core::error::{ErrorKind, Reporter, Span};
use crate::core::insn::Insn;
use crate::core::options::Options;
use crate::core::symbol::SymbolTable;
use crate::core::value::{overflow_sbits, overflow_u16, overflow_u8};

use super::operand::{accept_mode, parse_operands, AddrMode, IdxReg, Operand};
use super::table::{long_branch_for, Flags, PostSpec, CPU_MC68HC12, PREFIX};

const REL8_SPEC: BranchSpec = BranchSpec {
    short_len: 2,
    long_len: 4,
    short_bits: 8,
};

#[derive(Default)]
pub struct Mc68HC12Assembler {
    options: Options,
}

impl Mc68HC12Assembler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Assembler for Mc68HC12Assembler {
    fn cpu_name(&self) -> &'static str {
        "mc68hc12"
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

        let found = CPU_MC68HC12.search_name(stmt.mnemonic, |entry, _| {
            accept_entry(entry.flags(), &ops)
        });
        let (entry, page) = match found {
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
        let emit = encode_entry(
            &mut insn,
            entry.opcode(),
            entry.flags(),
            page.prefix(),
            &mut ops,
            self.options.smart_branch,
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
    prefix: u8,
    ops: &mut [Operand],
    smart_branch: bool,
) -> Result<(), ErrorKind> {
    if let PostSpec::Loop(selector) = flags.post() {
        return encode_loop(insn, opcode, selector, ops);
    }

    match flags.mode1() {
        AddrMode::Rel8 => return encode_rel8(insn, opcode, &mut ops[0], smart_branch),
        AddrMode::Rel16 => return encode_rel16(insn, opcode, &mut ops[0]),
        _ => {}
    }

    if prefix != 0 {
        insn.emit_byte(prefix)?;
    }
    insn.emit_byte(opcode as u8)?;
    match flags.mode1() {
        AddrMode::None => {}
        mode => encode_operand(insn, mode, &mut ops[0])?,
    }
    Ok(())
}

fn encode_operand(insn: &mut Insn, mode: AddrMode, op: &mut Operand) -> Result<(), ErrorKind> {
    if !op.value.resolved {
        op.reporter.set_error_if(ErrorKind::UndefinedSymbol, op.span);
    }
    let val = op.value.val;
    match mode {
        AddrMode::Im8 | AddrMode::Dir => {
            let byte = if overflow_u8(val) {
                op.reporter.set_error_if(ErrorKind::OverflowRange, op.span);
                0
            } else {
                val as u8
            };
            insn.emit_byte(byte)
        }
        AddrMode::Im16 | AddrMode::Ext => {
            let word = if overflow_u16(val) {
                op.reporter.set_error_if(ErrorKind::OverflowRange, op.span);
                0
            } else {
                val as u16
            };
            insn.emit_u16_be(word)
        }
        AddrMode::Idx => encode_indexed(insn, op),
        _ => Err(ErrorKind::InternalError),
    }
}

/// Constant-offset indexed post-byte: 5-bit form `rr0nnnnn` when the
/// offset fits, 16-bit form `111rr010` + offset word otherwise.
fn encode_indexed(insn: &mut Insn, op: &mut Operand) -> Result<(), ErrorKind> {
    let reg = op.idx_reg.unwrap_or(IdxReg::X);
    let val = op.value.val;
    if op.value.resolved && (-16..=15).contains(&val) {
        let post = (reg.code() << 6) | (val as u8 & 0x1F);
        return insn.emit_byte(post);
    }
    let word = if overflow_u16(val) {
        op.reporter.set_error_if(ErrorKind::OverflowRange, op.span);
        0
    } else {
        val as u16
    };
    insn.emit_byte(0xE2 | reg.code() << 3)?;
    insn.emit_u16_be(word)
}

fn encode_rel8(
    insn: &mut Insn,
    opcode: u16,
    op: &mut Operand,
    smart_branch: bool,
) -> Result<(), ErrorKind> {
    // Promotion is only possible when the 0x18 page carries the matching
    // long form (BSR, for one, has none).
    let smart = smart_branch && long_branch_for(opcode).is_some();
    let form = choose_form(
        REL8_SPEC,
        insn.addr(),
        op.value.val as u32,
        op.value.resolved,
        smart,
        UnresolvedPolicy::AssumeShort,
    );
    match form {
        Ok(BranchForm::Short(disp)) => {
            insn.emit_byte(opcode as u8)?;
            insn.emit_byte(disp as u8)
        }
        Ok(BranchForm::Long(disp)) => {
            insn.emit_byte(PREFIX)?;
            insn.emit_byte(opcode as u8)?;
            insn.emit_u16_be(disp as u16)
        }
        Err((BranchForm::Short(_), kind)) | Err((BranchForm::Long(_), kind)) => {
            op.reporter.set_error_if(kind, op.span);
            insn.emit_byte(opcode as u8)?;
            insn.emit_byte(0)
        }
    }
}

fn encode_rel16(insn: &mut Insn, opcode: u16, op: &mut Operand) -> Result<(), ErrorKind> {
    let target = op.value.val as u32;
    let disp = if op.value.resolved {
        target.wrapping_sub(insn.addr().wrapping_add(4)) as i32
    } else {
        0
    };
    insn.emit_byte(PREFIX)?;
    insn.emit_byte(opcode as u8)?;
    insn.emit_u16_be(disp as u16)
}

/// Loop primitives: opcode 0x04, post-byte `sss s rrr` (selector, sign
/// bit of the 9-bit displacement, counter register), then the low
/// displacement byte.
fn encode_loop(
    insn: &mut Insn,
    opcode: u16,
    selector: u8,
    ops: &mut [Operand],
) -> Result<(), ErrorKind> {
    let reg = match ops[0].loop_reg {
        Some(reg) => reg,
        None => return Err(ErrorKind::InternalError),
    };
    let target = &mut ops[1];
    let mut disp = if target.value.resolved {
        (target.value.val as u32).wrapping_sub(insn.addr().wrapping_add(3)) as i32
    } else {
        0
    };
    if overflow_sbits(i64::from(disp), 9) {
        target
            .reporter
            .set_error_if(ErrorKind::OperandTooFar, target.span);
        disp = 0;
    }
    let mut post = (selector << 5) | reg.code();
    if disp & 0x100 != 0 {
        post |= 0x10;
    }
    insn.emit_byte(opcode as u8)?;
    insn.emit_byte(post)?;
    insn.emit_byte(disp as u8)
}
