// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MOS 6502 / W65C02 disassembler.

use crate::core::disassembler::{Disassembled, Disassembler};
use crate::core::entry::Cpu;
use crate::core::error::ErrorKind;
use crate::core::insn::{CodeStream, Insn};
use crate::core::options::{ListRadix, Options};
use crate::core::symbol::SymbolTable;
use crate::core::value::to_hex;

use super::operand::AddrMode;
use super::table::{Flags, CPU_MOS6502, CPU_W65C02};

pub struct Mos6502Disassembler {
    cpu: &'static Cpu<Flags>,
    name: &'static str,
    options: Options,
}

impl Mos6502Disassembler {
    pub fn new() -> Self {
        Self {
            cpu: &CPU_MOS6502,
            name: "mos6502",
            options: Options::default(),
        }
    }

    pub fn new_w65c02() -> Self {
        Self {
            cpu: &CPU_W65C02,
            name: "w65c02",
            options: Options::default(),
        }
    }

    fn value_text(&self, value: u32, digits: usize) -> String {
        match self.options.list_radix {
            ListRadix::Hex => format!("${}", to_hex(value, digits, self.options.uppercase)),
            ListRadix::Decimal => value.to_string(),
        }
    }
}

impl Default for Mos6502Disassembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Disassembler for Mos6502Disassembler {
    fn cpu_name(&self) -> &'static str {
        self.name
    }

    fn options(&self) -> &Options {
        &self.options
    }

    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    fn decode(
        &self,
        stream: &mut CodeStream<'_>,
        _symbols: Option<&dyn SymbolTable>,
    ) -> Disassembled {
        let addr = stream.addr();
        let mut insn = Insn::new(addr);

        let opcode = match stream.read_byte() {
            Ok(byte) => byte,
            Err(kind) => {
                return Disassembled {
                    insn,
                    operands: String::new(),
                    error: Some(kind),
                }
            }
        };
        let _ = insn.emit_byte(opcode);

        let found = self
            .cpu
            .search_opcode(0, |entry, _| Ok(entry.match_opcode(u16::from(opcode))));
        let entry = match found {
            Ok((entry, _)) => entry,
            Err(kind) => {
                return Disassembled {
                    insn,
                    operands: String::new(),
                    error: Some(kind),
                }
            }
        };

        let name = if self.options.uppercase {
            entry.name().to_string()
        } else {
            entry.name().to_ascii_lowercase()
        };
        insn.set_name(&name);

        match self.decode_operand(stream, &mut insn, entry.flags().mode) {
            Ok(operands) => Disassembled {
                insn,
                operands,
                error: None,
            },
            Err(kind) => Disassembled {
                insn,
                operands: String::new(),
                error: Some(kind),
            },
        }
    }
}

impl Mos6502Disassembler {
    fn decode_operand(
        &self,
        stream: &mut CodeStream<'_>,
        insn: &mut Insn,
        mode: AddrMode,
    ) -> Result<String, ErrorKind> {
        let text = match mode {
            AddrMode::None => String::new(),
            AddrMode::Imm => format!("#{}", self.value_text(take_byte(stream, insn)?.into(), 2)),
            AddrMode::Zpg => self.value_text(take_byte(stream, insn)?.into(), 2),
            AddrMode::ZpgX => format!("{},X", self.value_text(take_byte(stream, insn)?.into(), 2)),
            AddrMode::ZpgY => format!("{},Y", self.value_text(take_byte(stream, insn)?.into(), 2)),
            AddrMode::Abs => self.value_text(take_word(stream, insn)?.into(), 4),
            AddrMode::AbsX => format!("{},X", self.value_text(take_word(stream, insn)?.into(), 4)),
            AddrMode::AbsY => format!("{},Y", self.value_text(take_word(stream, insn)?.into(), 4)),
            AddrMode::IdxInd => {
                format!("({},X)", self.value_text(take_byte(stream, insn)?.into(), 2))
            }
            AddrMode::IndY => {
                format!("({}),Y", self.value_text(take_byte(stream, insn)?.into(), 2))
            }
            AddrMode::Ind => format!("({})", self.value_text(take_word(stream, insn)?.into(), 4)),
            AddrMode::ZpgInd => {
                format!("({})", self.value_text(take_byte(stream, insn)?.into(), 2))
            }
            AddrMode::Rel => {
                let disp = i32::from(take_byte(stream, insn)? as i8);
                let target = insn.addr().wrapping_add(2).wrapping_add(disp as u32) & 0xFFFF;
                self.value_text(target, 4)
            }
        };
        Ok(text)
    }
}

fn take_byte(stream: &mut CodeStream<'_>, insn: &mut Insn) -> Result<u8, ErrorKind> {
    let byte = stream.read_byte()?;
    insn.emit_byte(byte)?;
    Ok(byte)
}

// Byte-at-a-time so a truncated operand still leaves every consumed
// byte in the instruction image.
fn take_word(stream: &mut CodeStream<'_>, insn: &mut Insn) -> Result<u16, ErrorKind> {
    let lo = take_byte(stream, insn)?;
    let hi = take_byte(stream, insn)?;
    Ok(u16::from(hi) << 8 | u16::from(lo))
}
