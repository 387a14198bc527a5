// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MC68HC12 addressing modes and operand parsing.

use crate::core::assembler::{parse_value, Value};
use crate::core::error::{ErrorKind, Reporter, Span};

/// Addressing modes. Table entries declare the broad mode; parsed
/// operands carry the narrowest mode that fits and widen through
/// `accept_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    None,
    /// 8-bit immediate (`#$12`).
    Im8,
    /// 16-bit immediate (`#$1234`).
    Im16,
    /// Direct page, 8-bit address.
    Dir,
    /// Extended, 16-bit address.
    Ext,
    /// 8-bit relative branch.
    Rel8,
    /// 16-bit relative branch (0x18-prefixed page).
    Rel16,
    /// 9-bit relative of the loop primitives, sign bit in the post-byte.
    Rel9,
    /// Indexed with post-byte (`n,X` constant offset or 16-bit offset).
    Idx,
    /// Loop-primitive counter register (`DBNE X,target`).
    Lp,
}

/// Index base registers and their `rr` post-byte codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdxReg {
    X,
    Y,
    Sp,
    Pc,
}

impl IdxReg {
    pub fn code(self) -> u8 {
        match self {
            IdxReg::X => 0,
            IdxReg::Y => 1,
            IdxReg::Sp => 2,
            IdxReg::Pc => 3,
        }
    }

    pub fn from_code(code: u8) -> Self {
        match code & 3 {
            0 => IdxReg::X,
            1 => IdxReg::Y,
            2 => IdxReg::Sp,
            _ => IdxReg::Pc,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "X" => Some(IdxReg::X),
            "Y" => Some(IdxReg::Y),
            "SP" => Some(IdxReg::Sp),
            "PC" => Some(IdxReg::Pc),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IdxReg::X => "X",
            IdxReg::Y => "Y",
            IdxReg::Sp => "SP",
            IdxReg::Pc => "PC",
        }
    }
}

/// Loop-primitive counter registers and their post-byte codes. Codes 2
/// and 3 are reserved; a decoded post-byte using them does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopReg {
    A,
    B,
    D,
    X,
    Y,
    Sp,
}

impl LoopReg {
    pub fn code(self) -> u8 {
        match self {
            LoopReg::A => 0,
            LoopReg::B => 1,
            LoopReg::D => 4,
            LoopReg::X => 5,
            LoopReg::Y => 6,
            LoopReg::Sp => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code & 7 {
            0 => Some(LoopReg::A),
            1 => Some(LoopReg::B),
            4 => Some(LoopReg::D),
            5 => Some(LoopReg::X),
            6 => Some(LoopReg::Y),
            7 => Some(LoopReg::Sp),
            _ => None,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "A" => Some(LoopReg::A),
            "B" => Some(LoopReg::B),
            "D" => Some(LoopReg::D),
            "X" => Some(LoopReg::X),
            "Y" => Some(LoopReg::Y),
            "SP" => Some(LoopReg::Sp),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LoopReg::A => "A",
            LoopReg::B => "B",
            LoopReg::D => "D",
            LoopReg::X => "X",
            LoopReg::Y => "Y",
            LoopReg::Sp => "SP",
        }
    }
}

/// One parsed operand with its own error state, so a garbled operand
/// keeps a precise span independent of the instruction-level error.
#[derive(Debug, Clone, Copy)]
pub struct Operand {
    pub mode: AddrMode,
    pub value: Value,
    pub idx_reg: Option<IdxReg>,
    pub loop_reg: Option<LoopReg>,
    pub span: Span,
    pub reporter: Reporter,
}

impl Operand {
    fn new(mode: AddrMode, span: Span) -> Self {
        Self {
            mode,
            value: Value::known(0),
            idx_reg: None,
            loop_reg: None,
            span,
            reporter: Reporter::new(),
        }
    }
}

/// Parse the whole operand field of one instruction.
pub fn parse_operands(
    field: &str,
    field_at: usize,
    symbols: Option<&dyn crate::core::symbol::SymbolTable>,
) -> Result<Vec<Operand>, (ErrorKind, Span)> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(Vec::new());
    }
    let span = Span::new(field_at, field_at + field.len());

    let tokens: Vec<&str> = field.split(',').map(str::trim).collect();
    match tokens.as_slice() {
        [single] => Ok(vec![parse_single(single, span, symbols).map_err(|e| (e, span))?]),
        [offset, base] if IdxReg::parse(base).is_some() => {
            let mut op = Operand::new(AddrMode::Idx, span);
            op.idx_reg = IdxReg::parse(base);
            op.value = parse_value(offset, symbols).map_err(|e| (e, span))?;
            Ok(vec![op])
        }
        [counter, target] if LoopReg::parse(counter).is_some() => {
            let mut reg = Operand::new(AddrMode::Lp, span);
            reg.loop_reg = LoopReg::parse(counter);
            let tgt = parse_single(target, span, symbols).map_err(|e| (e, span))?;
            Ok(vec![reg, tgt])
        }
        _ => Err((ErrorKind::GarbageAtEnd, span)),
    }
}

fn parse_single(
    token: &str,
    span: Span,
    symbols: Option<&dyn crate::core::symbol::SymbolTable>,
) -> Result<Operand, ErrorKind> {
    if let Some(imm) = token.strip_prefix('#') {
        let value = parse_value(imm, symbols)?;
        let mode = if value.resolved && crate::core::value::overflow_u8(value.val) {
            AddrMode::Im16
        } else {
            AddrMode::Im8
        };
        let mut op = Operand::new(mode, span);
        op.value = value;
        return Ok(op);
    }

    let value = parse_value(token, symbols)?;
    // An unresolved symbol is a 16-bit address as far as mode selection
    // goes; branch encoders see `resolved == false` and apply their own
    // forward-reference policy.
    let mode = if value.resolved && (0..=0xFF).contains(&value.val) {
        AddrMode::Dir
    } else {
        AddrMode::Ext
    };
    let mut op = Operand::new(mode, span);
    op.value = value;
    Ok(op)
}

/// The mode-widening relation: which parsed operand modes satisfy which
/// table-declared modes. Reflexive; widenings are specific to this ISA.
pub fn accept_mode(op: AddrMode, table: AddrMode) -> bool {
    if op == table {
        return true;
    }
    match table {
        // An 8-bit immediate fits a 16-bit immediate slot.
        AddrMode::Im16 => op == AddrMode::Im8,
        // A page-zero address fits an extended slot.
        AddrMode::Ext => op == AddrMode::Dir,
        // Branch targets are parsed as plain addresses.
        AddrMode::Rel8 | AddrMode::Rel16 | AddrMode::Rel9 => {
            matches!(op, AddrMode::Dir | AddrMode::Ext)
        }
        _ => false,
    }
}
