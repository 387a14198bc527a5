// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Texas Instruments TMS7000: register-file operands, `@addr` extended
//! addressing, and relative jumps.

mod asm;
mod dis;
mod operand;
mod table;

pub use asm::Tms7000Assembler;
pub use dis::Tms7000Disassembler;

use crate::core::assembler::Assembler;
use crate::core::disassembler::Disassembler;
use crate::core::registry::CpuModule;

pub struct Tms7000Module;

impl CpuModule for Tms7000Module {
    fn cpu_name(&self) -> &'static str {
        "tms7000"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["7000"]
    }

    fn new_assembler(&self) -> Box<dyn Assembler> {
        Box::new(Tms7000Assembler::new())
    }

    fn new_disassembler(&self) -> Box<dyn Disassembler> {
        Box::new(Tms7000Disassembler::new())
    }
}
