// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Signetics 2650 operand handling.
//!
//! The register (or condition code) rides on the mnemonic itself
//! (`LODA,R0`), so the operand field carries at most one address or
//! immediate, optionally behind a `*` indirect marker.

use crate::core::assembler::{parse_value, Value};
use crate::core::error::{ErrorKind, Reporter, Span};
use crate::core::symbol::SymbolTable;

/// Condition codes for the `,cc` branch and return mnemonics.
/// 3 is the unconditional encoding.
pub fn parse_cond(token: &str) -> Option<u8> {
    match token.to_ascii_uppercase().as_str() {
        "0" | "EQ" | "Z" => Some(0),
        "1" | "GT" | "P" => Some(1),
        "2" | "LT" | "N" => Some(2),
        "3" | "UN" | "AL" => Some(3),
        _ => None,
    }
}

pub fn parse_reg(token: &str) -> Option<u8> {
    match token.to_ascii_uppercase().as_str() {
        "R0" => Some(0),
        "R1" => Some(1),
        "R2" => Some(2),
        "R3" => Some(3),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Operand {
    pub indirect: bool,
    pub value: Value,
    pub span: Span,
    pub reporter: Reporter,
}

/// Parse the operand field: nothing, `expr`, or `*expr`.
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
    let (indirect, expr) = match field.strip_prefix('*') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, field),
    };
    let value = parse_value(expr, symbols).map_err(|kind| (kind, span))?;
    Ok(vec![Operand {
        indirect,
        value,
        span,
        reporter: Reporter::new(),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indirect_marker() {
        let ops = parse_operands("*H'19AB'", 8, None).unwrap();
        assert!(ops[0].indirect);
        assert_eq!(ops[0].value.val, 0x19AB);
        let ops = parse_operands("H'40'", 0, None).unwrap();
        assert!(!ops[0].indirect);
        assert_eq!(ops[0].value.val, 0x40);
    }

    #[test]
    fn register_tokens() {
        assert_eq!(parse_reg("r2"), Some(2));
        assert_eq!(parse_reg("R4"), None);
        assert_eq!(parse_reg("X"), None);
    }

    #[test]
    fn condition_tokens() {
        assert_eq!(parse_cond("EQ"), Some(0));
        assert_eq!(parse_cond("un"), Some(3));
        assert_eq!(parse_cond("1"), Some(1));
        assert_eq!(parse_cond("GE"), None);
    }
}
