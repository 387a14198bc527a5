// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MOS 6502 and WDC W65C02. The CMOS part layers an extension page over
//! the shared NMOS table; both variants use the same assembler and
//! disassembler types.

mod asm;
mod dis;
mod operand;
mod table;

pub use asm::Mos6502Assembler;
pub use dis::Mos6502Disassembler;

use crate::core::assembler::Assembler;
use crate::core::disassembler::Disassembler;
use crate::core::registry::CpuModule;

pub struct Mos6502Module;

impl CpuModule for Mos6502Module {
    fn cpu_name(&self) -> &'static str {
        "mos6502"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["6502"]
    }

    fn new_assembler(&self) -> Box<dyn Assembler> {
        Box::new(Mos6502Assembler::new())
    }

    fn new_disassembler(&self) -> Box<dyn Disassembler> {
        Box::new(Mos6502Disassembler::new())
    }
}

pub struct W65C02Module;

impl CpuModule for W65C02Module {
    fn cpu_name(&self) -> &'static str {
        "w65c02"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["65c02"]
    }

    fn new_assembler(&self) -> Box<dyn Assembler> {
        Box::new(Mos6502Assembler::new_w65c02())
    }

    fn new_disassembler(&self) -> Box<dyn Disassembler> {
        Box::new(Mos6502Disassembler::new_w65c02())
    }
}
