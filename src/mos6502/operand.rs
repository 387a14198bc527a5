// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MOS 6502 addressing modes and operand parsing.

use crate::core::assembler::{parse_value, Value};
use crate::core::error::{ErrorKind, Reporter, Span};
use crate::core::symbol::SymbolTable;
use crate::core::value::overflow_u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    None,
    /// `#$12`
    Imm,
    /// `$12`
    Zpg,
    /// `$12,X`
    ZpgX,
    /// `$12,Y`
    ZpgY,
    /// `$1234`
    Abs,
    /// `$1234,X`
    AbsX,
    /// `$1234,Y`
    AbsY,
    /// `($12,X)`
    IdxInd,
    /// `($12),Y`
    IndY,
    /// `($1234)` (JMP only)
    Ind,
    /// `($12)` (W65C02)
    ZpgInd,
    /// 8-bit relative branch target.
    Rel,
}

#[derive(Debug, Clone, Copy)]
pub struct Operand {
    pub mode: AddrMode,
    pub value: Value,
    pub span: Span,
    pub reporter: Reporter,
}

impl Operand {
    fn new(mode: AddrMode, value: Value, span: Span) -> Self {
        Self {
            mode,
            value,
            span,
            reporter: Reporter::new(),
        }
    }
}

/// Parse the operand field. The narrow zero-page modes are chosen when
/// the value fits a byte; `accept_mode` widens them to the absolute
/// table modes where the zero-page opcode does not exist.
pub fn parse_operands(
    field: &str,
    field_at: usize,
    symbols: Option<&dyn SymbolTable>,
) -> Result<Vec<Operand>, (ErrorKind, Span)> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(Vec::new());
    }
    let span = Span::new(field_at, field_at + field.len());
    let fail = |kind| (kind, span);

    if let Some(imm) = field.strip_prefix('#') {
        let value = parse_value(imm, symbols).map_err(fail)?;
        return Ok(vec![Operand::new(AddrMode::Imm, value, span)]);
    }

    if let Some(inner) = field.strip_prefix('(') {
        let close = inner.find(')').ok_or((ErrorKind::MissingClosingParen, span))?;
        let (body, tail) = (inner[..close].trim_end(), inner[close + 1..].trim());

        if let Some(expr) = strip_index_suffix(body, 'X') {
            if !tail.is_empty() {
                return Err(fail(ErrorKind::GarbageAtEnd));
            }
            let value = parse_value(expr, symbols).map_err(fail)?;
            return Ok(vec![Operand::new(AddrMode::IdxInd, value, span)]);
        }
        let value = parse_value(body, symbols).map_err(fail)?;
        if tail.is_empty() {
            let mode = if narrow(value) {
                AddrMode::ZpgInd
            } else {
                AddrMode::Ind
            };
            return Ok(vec![Operand::new(mode, value, span)]);
        }
        if tail.eq_ignore_ascii_case(",Y") {
            return Ok(vec![Operand::new(AddrMode::IndY, value, span)]);
        }
        return Err(fail(ErrorKind::GarbageAtEnd));
    }

    if let Some(expr) = strip_index_suffix(field, 'X') {
        let value = parse_value(expr, symbols).map_err(fail)?;
        let mode = if narrow(value) {
            AddrMode::ZpgX
        } else {
            AddrMode::AbsX
        };
        return Ok(vec![Operand::new(mode, value, span)]);
    }
    if let Some(expr) = strip_index_suffix(field, 'Y') {
        let value = parse_value(expr, symbols).map_err(fail)?;
        let mode = if narrow(value) {
            AddrMode::ZpgY
        } else {
            AddrMode::AbsY
        };
        return Ok(vec![Operand::new(mode, value, span)]);
    }

    let value = parse_value(field, symbols).map_err(fail)?;
    let mode = if narrow(value) {
        AddrMode::Zpg
    } else {
        AddrMode::Abs
    };
    Ok(vec![Operand::new(mode, value, span)])
}

fn narrow(value: Value) -> bool {
    value.resolved && !overflow_u8(value.val) && value.val >= 0
}

fn strip_index_suffix(text: &str, reg: char) -> Option<&str> {
    let comma = text.rfind(',')?;
    let tail = text[comma + 1..].trim();
    if tail.eq_ignore_ascii_case(&reg.to_string()) {
        Some(text[..comma].trim_end())
    } else {
        None
    }
}

/// Mode widening: zero-page modes satisfy the corresponding absolute
/// table modes; branch targets are parsed as plain addresses.
pub fn accept_mode(op: AddrMode, table: AddrMode) -> bool {
    if op == table {
        return true;
    }
    match table {
        AddrMode::Abs => op == AddrMode::Zpg,
        AddrMode::AbsX => op == AddrMode::ZpgX,
        AddrMode::AbsY => op == AddrMode::ZpgY,
        AddrMode::Ind => op == AddrMode::ZpgInd,
        AddrMode::Rel => matches!(op, AddrMode::Zpg | AddrMode::Abs),
        _ => false,
    }
}
