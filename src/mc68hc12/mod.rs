// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Motorola MC68HC12: prefixed opcode pages, indexed post-bytes, loop
//! primitives, and short/long smart branches.

mod asm;
mod dis;
mod operand;
mod table;

pub use asm::Mc68HC12Assembler;
pub use dis::Mc68HC12Disassembler;

use crate::core::assembler::Assembler;
use crate::core::disassembler::Disassembler;
use crate::core::registry::CpuModule;

pub struct Mc68HC12Module;

impl CpuModule for Mc68HC12Module {
    fn cpu_name(&self) -> &'static str {
        "mc68hc12"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["68hc12", "hc12"]
    }

    fn new_assembler(&self) -> Box<dyn Assembler> {
        Box::new(Mc68HC12Assembler::new())
    }

    fn new_disassembler(&self) -> Box<dyn Disassembler> {
        Box::new(Mc68HC12Disassembler::new())
    }
}
