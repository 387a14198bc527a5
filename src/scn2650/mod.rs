// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Signetics 2650: register and condition codes carried on the mnemonic,
//! 15-bit addresses and 7-bit displacements with an indirect bit.

mod asm;
mod dis;
mod operand;
mod table;

pub use asm::Scn2650Assembler;
pub use dis::Scn2650Disassembler;

use crate::core::assembler::Assembler;
use crate::core::disassembler::Disassembler;
use crate::core::registry::CpuModule;

pub struct Scn2650Module;

impl CpuModule for Scn2650Module {
    fn cpu_name(&self) -> &'static str {
        "scn2650"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["2650"]
    }

    fn new_assembler(&self) -> Box<dyn Assembler> {
        Box::new(Scn2650Assembler::new())
    }

    fn new_disassembler(&self) -> Box<dyn Disassembler> {
        Box::new(Scn2650Disassembler::new())
    }
}
