// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Disassembler-side call contract.

use crate::core::error::ErrorKind;
use crate::core::insn::{CodeStream, Insn};
use crate::core::options::Options;
use crate::core::symbol::SymbolTable;

/// Result of decoding one instruction. `insn.len()` always equals the
/// number of bytes consumed from the stream, even on a partial decode, so
/// the caller can resynchronize.
#[derive(Debug)]
pub struct Disassembled {
    pub insn: Insn,
    pub operands: String,
    pub error: Option<ErrorKind>,
}

impl Disassembled {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Canonical one-line rendering: mnemonic padded to a five-column
    /// field, then the operand text.
    pub fn text(&self) -> String {
        if self.operands.is_empty() {
            self.insn.name().to_string()
        } else {
            format!("{:<5} {}", self.insn.name(), self.operands)
        }
    }
}

/// One architecture's disassembler.
pub trait Disassembler {
    fn cpu_name(&self) -> &'static str;
    fn options(&self) -> &Options;
    fn options_mut(&mut self) -> &mut Options;

    /// Decode one instruction from the stream. On `UnknownInstruction`
    /// the offending opcode byte(s) remain consumed.
    fn decode(&self, stream: &mut CodeStream<'_>, symbols: Option<&dyn SymbolTable>)
        -> Disassembled;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_layout() {
        let mut insn = Insn::new(0);
        insn.set_name("SUBB");
        let dis = Disassembled {
            insn,
            operands: "$F1F2".to_string(),
            error: None,
        };
        assert_eq!(dis.text(), "SUBB  $F1F2");

        let mut insn = Insn::new(0);
        insn.set_name("NOP");
        let dis = Disassembled {
            insn,
            operands: String::new(),
            error: None,
        };
        assert_eq!(dis.text(), "NOP");
    }
}
