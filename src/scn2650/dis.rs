// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Signetics 2650 disassembler. The low opcode bits select the register
//! or condition, which is rendered back onto the mnemonic.

use crate::core::disassembler::{Disassembled, Disassembler};
use crate::core::error::ErrorKind;
use crate::core::insn::{CodeStream, Insn};
use crate::core::options::{ListRadix, Options};
use crate::core::symbol::SymbolTable;
use crate::core::value::to_hex;

use super::table::{Flags, OperFmt, Suffix, CPU_SCN2650};

const COND_NAMES: [&str; 4] = ["EQ", "GT", "LT", "UN"];

#[derive(Default)]
pub struct Scn2650Disassembler {
    options: Options,
}

impl Scn2650Disassembler {
    pub fn new() -> Self {
        Self::default()
    }

    fn value_text(&self, value: u32, digits: usize) -> String {
        match self.options.list_radix {
            ListRadix::Hex => format!("H'{}'", to_hex(value, digits, self.options.uppercase)),
            ListRadix::Decimal => value.to_string(),
        }
    }
}

impl Disassembler for Scn2650Disassembler {
    fn cpu_name(&self) -> &'static str {
        "scn2650"
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

        let found = CPU_SCN2650.search_opcode(0, |entry, _| Ok(entry.match_opcode(u16::from(opcode))));
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

        let low = opcode & 0x03;
        let mut name = match entry.flags().suffix() {
            Suffix::None => entry.name().to_string(),
            Suffix::Reg => format!("{},R{low}", entry.name()),
            Suffix::Cond => format!("{},{}", entry.name(), COND_NAMES[usize::from(low)]),
        };
        if !self.options.uppercase {
            name.make_ascii_lowercase();
        }
        insn.set_name(&name);

        match self.decode_operand(stream, &mut insn, entry.flags()) {
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

impl Scn2650Disassembler {
    fn decode_operand(
        &self,
        stream: &mut CodeStream<'_>,
        insn: &mut Insn,
        flags: &Flags,
    ) -> Result<String, ErrorKind> {
        match flags.oper() {
            OperFmt::None => Ok(String::new()),
            OperFmt::Imm8 => {
                let byte = take_byte(stream, insn)?;
                Ok(self.value_text(byte.into(), 2))
            }
            OperFmt::Rel7 => {
                let byte = take_byte(stream, insn)?;
                let disp = i32::from(byte & 0x7F) - i32::from(byte & 0x40) * 2;
                let target = insn.addr().wrapping_add(2).wrapping_add(disp as u32) & 0x7FFF;
                let star = if byte & 0x80 != 0 { "*" } else { "" };
                Ok(format!("{star}{}", self.value_text(target, 4)))
            }
            OperFmt::Abs15 => {
                let word = take_word(stream, insn)?;
                let star = if word & 0x8000 != 0 { "*" } else { "" };
                Ok(format!(
                    "{star}{}",
                    self.value_text(u32::from(word & 0x7FFF), 4)
                ))
            }
        }
    }
}

fn take_byte(stream: &mut CodeStream<'_>, insn: &mut Insn) -> Result<u8, ErrorKind> {
    let byte = stream.read_byte()?;
    insn.emit_byte(byte)?;
    Ok(byte)
}

// Byte-at-a-time so a truncated address word still leaves every consumed
// byte in the instruction image.
fn take_word(stream: &mut CodeStream<'_>, insn: &mut Insn) -> Result<u16, ErrorKind> {
    let hi = take_byte(stream, insn)?;
    let lo = take_byte(stream, insn)?;
    Ok(u16::from(hi) << 8 | u16::from(lo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn disassemble(bytes: &[u8], addr: u32) -> Disassembled {
        let mut stream = CodeStream::new(bytes, addr);
        Scn2650Disassembler::new().decode(&mut stream, None)
    }

    #[test]
    fn indirect_absolute_load() {
        let out = disassemble(&[0x0C, 0x99, 0xAB], 0);
        assert_eq!(out.text(), "LODA,R0 *H'19AB'");
    }

    #[test]
    fn register_in_low_bits() {
        let out = disassemble(&[0xCF, 0x1F, 0xFF], 0);
        assert_eq!(out.text(), "STRA,R3 H'1FFF'");
    }

    #[test]
    fn condition_mnemonics() {
        let out = disassemble(&[0x14], 0);
        assert_eq!(out.text(), "RETC,EQ");
        let out = disassemble(&[0x1F, 0x04, 0x00], 0);
        assert_eq!(out.text(), "BCTA,UN H'0400'");
    }

    #[test]
    fn relative_targets() {
        let out = disassemble(&[0x08, 0x10], 0x100);
        assert_eq!(out.text(), "LODR,R0 H'0112'");
        let out = disassemble(&[0x1B, 0xEE], 0x100);
        assert_eq!(out.text(), "BCTR,UN *H'00F0'");
    }

    #[test]
    fn unknown_opcode() {
        let out = disassemble(&[0x10], 0);
        assert_eq!(out.error, Some(ErrorKind::UnknownInstruction));
    }

    #[test]
    fn truncated_address_word() {
        let image = [0x0C, 0x99];
        let mut stream = CodeStream::new(&image, 0);
        let out = Scn2650Disassembler::new().decode(&mut stream, None);
        assert_eq!(out.error, Some(ErrorKind::NoMemory));
        assert_eq!(out.insn.len(), stream.pos());
        assert_eq!(out.insn.bytes(), &[0x0C, 0x99]);
    }
}
