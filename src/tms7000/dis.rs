// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! TMS7000 disassembler. Operand text uses the TI `>` hex notation.

use crate::core::disassembler::{Disassembled, Disassembler};
use crate::core::error::ErrorKind;
use crate::core::insn::{CodeStream, Insn};
use crate::core::options::{ListRadix, Options};
use crate::core::symbol::SymbolTable;
use crate::core::value::to_hex;

use super::operand::AddrMode;
use super::table::CPU_TMS7000;

#[derive(Default)]
pub struct Tms7000Disassembler {
    options: Options,
}

impl Tms7000Disassembler {
    pub fn new() -> Self {
        Self::default()
    }

    fn value_text(&self, value: u32, digits: usize) -> String {
        match self.options.list_radix {
            ListRadix::Hex => format!(">{}", to_hex(value, digits, self.options.uppercase)),
            ListRadix::Decimal => value.to_string(),
        }
    }
}

impl Disassembler for Tms7000Disassembler {
    fn cpu_name(&self) -> &'static str {
        "tms7000"
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

        let found = CPU_TMS7000.search_opcode(0, |entry, _| Ok(entry.match_opcode(u16::from(opcode))));
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

        let mut parts = Vec::new();
        for mode in [entry.flags().mode1(), entry.flags().mode2()] {
            match self.decode_operand(stream, &mut insn, mode) {
                Ok(Some(text)) => parts.push(text),
                Ok(None) => {}
                Err(kind) => {
                    return Disassembled {
                        insn,
                        operands: String::new(),
                        error: Some(kind),
                    }
                }
            }
        }

        Disassembled {
            insn,
            operands: parts.join(","),
            error: None,
        }
    }
}

impl Tms7000Disassembler {
    fn decode_operand(
        &self,
        stream: &mut CodeStream<'_>,
        insn: &mut Insn,
        mode: AddrMode,
    ) -> Result<Option<String>, ErrorKind> {
        let text = match mode {
            AddrMode::None | AddrMode::Val => return Ok(None),
            AddrMode::A => "A".to_string(),
            AddrMode::B => "B".to_string(),
            AddrMode::Rn => {
                let byte = take_byte(stream, insn)?;
                format!("R{byte}")
            }
            AddrMode::Pn => {
                let byte = take_byte(stream, insn)?;
                format!("P{byte}")
            }
            AddrMode::At => {
                let word = take_word(stream, insn)?;
                format!("@{}", self.value_text(word.into(), 4))
            }
            AddrMode::Rel => {
                let byte = take_byte(stream, insn)?;
                let disp = i32::from(byte as i8);
                let target = insn.addr().wrapping_add(2).wrapping_add(disp as u32) & 0xFFFF;
                self.value_text(target, 4)
            }
        };
        let text = if self.options.uppercase {
            text
        } else {
            text.to_ascii_lowercase()
        };
        Ok(Some(text))
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
        Tms7000Disassembler::new().decode(&mut stream, None)
    }

    #[test]
    fn single_op_columns() {
        let out = disassemble(&[0xB5], 0);
        assert_eq!(out.text(), "CLR   A");
        let out = disassemble(&[0xD5, 0x11], 0);
        assert_eq!(out.text(), "CLR   R17");
    }

    #[test]
    fn extended_addressing() {
        let out = disassemble(&[0x8A, 0xF0, 0x00], 0);
        assert_eq!(out.text(), "LDA   @>F000");
    }

    #[test]
    fn relative_jump_targets() {
        let out = disassemble(&[0xE0, 0x0E], 0x1000);
        assert_eq!(out.text(), "JMP   >1010");
        let out = disassemble(&[0xE6, 0x8E], 0x1000);
        assert_eq!(out.text(), "JNZ   >0F90");
    }

    #[test]
    fn port_moves() {
        let out = disassemble(&[0x82, 0x06], 0);
        assert_eq!(out.text(), "MOVP  A,P6");
        let out = disassemble(&[0x91, 0x06], 0);
        assert_eq!(out.text(), "MOVP  P6,B");
    }

    #[test]
    fn unknown_opcode() {
        let out = disassemble(&[0xFF], 0);
        assert_eq!(out.error, Some(ErrorKind::UnknownInstruction));
    }

    #[test]
    fn truncated_extended_address() {
        let image = [0x8A, 0xF0];
        let mut stream = CodeStream::new(&image, 0);
        let out = Tms7000Disassembler::new().decode(&mut stream, None);
        assert_eq!(out.error, Some(ErrorKind::NoMemory));
        assert_eq!(out.insn.len(), stream.pos());
        assert_eq!(out.insn.bytes(), &[0x8A, 0xF0]);
    }
}
