// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Assembler/disassembler options shared by every architecture module.

use crate::core::error::ErrorKind;

/// Radix used when rendering operand values in disassembly listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRadix {
    Hex,
    Decimal,
}

/// Per-instance mutable configuration. Instruction tables are immutable;
/// this is the only state an `Assembler`/`Disassembler` carries besides
/// the selected CPU.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Silently promote short branches to long forms when the target is
    /// out of short range.
    pub smart_branch: bool,
    /// Render mnemonics and hex digits in uppercase.
    pub uppercase: bool,
    pub list_radix: ListRadix,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            smart_branch: false,
            uppercase: true,
            list_radix: ListRadix::Hex,
        }
    }
}

impl Options {
    /// Set a named option from text, the way the CLI/config layer hands
    /// them over.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), ErrorKind> {
        match name.to_ascii_lowercase().as_str() {
            "smart-branch" => {
                self.smart_branch = parse_bool(value)?;
                Ok(())
            }
            "uppercase" => {
                self.uppercase = parse_bool(value)?;
                Ok(())
            }
            "list-radix" => {
                self.list_radix = match value {
                    "16" | "hex" => ListRadix::Hex,
                    "10" | "dec" => ListRadix::Decimal,
                    _ => return Err(ErrorKind::UnknownOption),
                };
                Ok(())
            }
            _ => Err(ErrorKind::UnknownOption),
        }
    }
}

fn parse_bool(value: &str) -> Result<bool, ErrorKind> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ErrorKind::UnknownOption),
    }
}
