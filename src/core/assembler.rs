// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Assembler-side call contract and shared statement parsing.

use crate::core::error::{ErrorAt, ErrorKind};
use crate::core::insn::Insn;
use crate::core::options::Options;
use crate::core::symbol::SymbolTable;
use crate::core::value::parse_number;

/// Result of assembling one line. The byte image is always present: on
/// error it holds whatever prefix was committed (zero-filled where a
/// value was out of range) so listings stay length-correct.
#[derive(Debug)]
pub struct Encoded {
    pub insn: Insn,
    pub error: Option<ErrorAt>,
}

impl Encoded {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// One architecture's assembler. Stateless apart from options; safe to
/// reuse across lines.
pub trait Assembler {
    fn cpu_name(&self) -> &'static str;
    fn options(&self) -> &Options;
    fn options_mut(&mut self) -> &mut Options;

    /// Assemble one source line at `addr`. Never panics; diagnostics come
    /// back in [`Encoded::error`] with a span into `line`.
    fn encode(&self, line: &str, addr: u32, symbols: Option<&dyn SymbolTable>) -> Encoded;
}

/// A source line split into its mnemonic field and operand field, with
/// byte offsets for diagnostics. The mnemonic field runs to the first
/// whitespace, so register suffixes like `LODA,R0` stay attached.
#[derive(Debug, PartialEq, Eq)]
pub struct Statement<'a> {
    pub mnemonic: &'a str,
    pub mnemonic_at: usize,
    pub operands: &'a str,
    pub operands_at: usize,
}

/// Split a line into statement fields. Returns `None` for blank and
/// comment-only lines.
pub fn split_statement(line: &str) -> Option<Statement<'_>> {
    let code = strip_comment(line);
    let mnemonic_at = code.len() - code.trim_start().len();
    let code = code.trim_end();
    if mnemonic_at >= code.len() {
        return None;
    }

    let rest = &code[mnemonic_at..];
    let mnemonic_len = rest
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(rest.len());
    let mnemonic = &rest[..mnemonic_len];

    let after = &rest[mnemonic_len..];
    let pad = after.len() - after.trim_start().len();
    let operands_at = mnemonic_at + mnemonic_len + pad;
    let operands = after.trim_start();

    Some(Statement {
        mnemonic,
        mnemonic_at,
        operands,
        operands_at,
    })
}

/// Drop a `;` comment, ignoring semicolons inside quoted literals.
fn strip_comment(line: &str) -> &str {
    let mut in_quote = false;
    for (pos, ch) in line.char_indices() {
        match ch {
            '\'' => in_quote = !in_quote,
            ';' if !in_quote => return &line[..pos],
            _ => {}
        }
    }
    line
}

/// A parsed numeric operand. `resolved` is false for a symbol the table
/// does not (yet) define; branch encoders consult their unresolved-target
/// policy instead of failing outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Value {
    pub val: i64,
    pub resolved: bool,
}

impl Value {
    pub const fn known(val: i64) -> Self {
        Self {
            val,
            resolved: true,
        }
    }

    pub const UNRESOLVED: Self = Self {
        val: 0,
        resolved: false,
    };
}

/// Parse a token as a number literal or symbol reference.
///
/// An undefined symbol yields [`Value::UNRESOLVED`], not an error; the
/// caller decides whether that is `UndefinedSymbol` (data operands) or a
/// deferred branch target.
pub fn parse_value(token: &str, symbols: Option<&dyn SymbolTable>) -> Result<Value, ErrorKind> {
    let token = token.trim();
    if let Some(num) = parse_number(token) {
        return Ok(Value::known(num));
    }
    if is_symbol(token) {
        if let Some(val) = symbols.and_then(|table| table.lookup(token)) {
            return Ok(Value::known(val));
        }
        return Ok(Value::UNRESOLVED);
    }
    Err(ErrorKind::GarbageAtEnd)
}

fn is_symbol(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '.' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
