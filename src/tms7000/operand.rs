// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! TMS7000 operand parsing: the register file (`A`, `B`, `R0`-`R255`),
//! peripheral ports (`P0`-`P255`), `@addr` extended addressing, and
//! plain expressions for jump targets and computed register numbers.

use crate::core::assembler::{parse_value, Value};
use crate::core::error::{ErrorKind, Reporter, Span};
use crate::core::symbol::SymbolTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    None,
    A,
    B,
    /// Register-file byte `R0`-`R255`.
    Rn,
    /// Peripheral port `P0`-`P255`.
    Pn,
    /// `@addr` 16-bit extended address.
    At,
    /// 8-bit relative jump target.
    Rel,
    /// Plain expression; widens to `Rn` or `Rel` against the table.
    Val,
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

pub fn parse_operands(
    field: &str,
    field_at: usize,
    symbols: Option<&dyn SymbolTable>,
) -> Result<Vec<Operand>, (ErrorKind, Span)> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(Vec::new());
    }
    let mut ops = Vec::new();
    let mut at = field_at;
    for token in field.split(',') {
        ops.push(parse_one(token, at, symbols)?);
        at += token.len() + 1;
    }
    Ok(ops)
}

fn parse_one(
    token: &str,
    token_at: usize,
    symbols: Option<&dyn SymbolTable>,
) -> Result<Operand, (ErrorKind, Span)> {
    let trimmed = token.trim();
    let start = token_at + (token.len() - token.trim_start().len());
    let span = Span::new(start, start + trimmed.len());

    if trimmed.eq_ignore_ascii_case("A") {
        return Ok(Operand::new(AddrMode::A, Value::known(0), span));
    }
    if trimmed.eq_ignore_ascii_case("B") {
        return Ok(Operand::new(AddrMode::B, Value::known(0), span));
    }
    if let Some(n) = file_number(trimmed, 'R') {
        return Ok(Operand::new(AddrMode::Rn, Value::known(n), span));
    }
    if let Some(n) = file_number(trimmed, 'P') {
        return Ok(Operand::new(AddrMode::Pn, Value::known(n), span));
    }
    if let Some(expr) = trimmed.strip_prefix('@') {
        let value = parse_value(expr, symbols).map_err(|kind| (kind, span))?;
        return Ok(Operand::new(AddrMode::At, value, span));
    }
    let value = parse_value(trimmed, symbols).map_err(|kind| (kind, span))?;
    Ok(Operand::new(AddrMode::Val, value, span))
}

/// `R17` or `P4` style token. An out-of-range number such as `R256` is
/// not a register; the caller falls back to symbol lookup.
fn file_number(token: &str, letter: char) -> Option<i64> {
    let digits = token
        .strip_prefix(letter)
        .or_else(|| token.strip_prefix(letter.to_ascii_lowercase()))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: i64 = digits.parse().ok()?;
    (0..=255).contains(&n).then_some(n)
}

pub fn accept_mode(op: AddrMode, table: AddrMode) -> bool {
    if op == table {
        return true;
    }
    match table {
        AddrMode::Rn | AddrMode::Rel => op == AddrMode::Val,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(field: &str) -> Operand {
        parse_operands(field, 0, None).unwrap()[0]
    }

    #[test]
    fn register_file_tokens() {
        assert_eq!(one("A").mode, AddrMode::A);
        assert_eq!(one("r17").mode, AddrMode::Rn);
        assert_eq!(one("R17").value.val, 17);
        assert_eq!(one("P4").mode, AddrMode::Pn);
    }

    #[test]
    fn out_of_range_register_is_a_symbol() {
        let op = one("R256");
        assert_eq!(op.mode, AddrMode::Val);
        assert!(!op.value.resolved);
    }

    #[test]
    fn extended_and_plain() {
        let op = one("@>F000");
        assert_eq!(op.mode, AddrMode::At);
        assert_eq!(op.value.val, 0xF000);
        assert_eq!(one(">80").mode, AddrMode::Val);
    }

    #[test]
    fn two_operand_spans() {
        let ops = parse_operands("A,P6", 5, None).unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].span, Span::new(5, 6));
        assert_eq!(ops[1].span, Span::new(7, 9));
    }

    #[test]
    fn widening_relation() {
        assert!(accept_mode(AddrMode::Val, AddrMode::Rn));
        assert!(accept_mode(AddrMode::Val, AddrMode::Rel));
        assert!(!accept_mode(AddrMode::Val, AddrMode::Pn));
        assert!(!accept_mode(AddrMode::Rn, AddrMode::A));
    }
}
