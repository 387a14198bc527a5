// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MC68HC12 disassembler: prefix handling, lazy post-byte matching for
//! the shared-opcode loop primitives, and operand text rendering.

use crate::core::disassembler::{Disassembled, Disassembler};
use crate::core::error::ErrorKind;
use crate::core::insn::{CodeStream, Insn};
use crate::core::options::{ListRadix, Options};
use crate::core::symbol::SymbolTable;
use crate::core::value::to_hex;

use super::operand::{AddrMode, IdxReg, LoopReg};
use super::table::{PostSpec, CPU_MC68HC12};

#[derive(Default)]
pub struct Mc68HC12Disassembler {
    options: Options,
}

impl Mc68HC12Disassembler {
    pub fn new() -> Self {
        Self::default()
    }

    fn value_text(&self, value: u32, digits: usize) -> String {
        match self.options.list_radix {
            ListRadix::Hex => format!("${}", to_hex(value, digits, self.options.uppercase)),
            ListRadix::Decimal => value.to_string(),
        }
    }
}

impl Disassembler for Mc68HC12Disassembler {
    fn cpu_name(&self) -> &'static str {
        "mc68hc12"
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

        let first = match stream.read_byte() {
            Ok(byte) => byte,
            Err(kind) => {
                return Disassembled {
                    insn,
                    operands: String::new(),
                    error: Some(kind),
                }
            }
        };
        let _ = insn.emit_byte(first);

        let (prefix, opcode) = if CPU_MC68HC12.is_prefix(first) {
            match stream.read_byte() {
                Ok(byte) => {
                    let _ = insn.emit_byte(byte);
                    (first, byte)
                }
                Err(kind) => {
                    return Disassembled {
                        insn,
                        operands: String::new(),
                        error: Some(kind),
                    }
                }
            }
        } else {
            (0, first)
        };

        // Loop primitives share opcode 0x04; the post-byte selector is
        // fetched lazily, only when such a candidate needs disambiguation.
        let found = CPU_MC68HC12.search_opcode(prefix, |entry, _| {
            if !entry.match_opcode(u16::from(opcode)) {
                return Ok(false);
            }
            match entry.flags().post() {
                PostSpec::None => Ok(true),
                PostSpec::Loop(selector) => {
                    let post = stream.peek_byte(0)?;
                    Ok((post >> 5) & 7 == selector && LoopReg::from_code(post & 7).is_some())
                }
            }
        });

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

        match self.decode_operand(stream, &mut insn, entry.flags().mode1(), entry.flags().post()) {
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

impl Mc68HC12Disassembler {
    fn decode_operand(
        &self,
        stream: &mut CodeStream<'_>,
        insn: &mut Insn,
        mode: AddrMode,
        post: PostSpec,
    ) -> Result<String, ErrorKind> {
        if let PostSpec::Loop(_) = post {
            return self.decode_loop(stream, insn);
        }
        match mode {
            AddrMode::None => Ok(String::new()),
            AddrMode::Im8 => {
                let byte = self.take_byte(stream, insn)?;
                Ok(format!("#{}", self.value_text(u32::from(byte), 2)))
            }
            AddrMode::Im16 => {
                let word = self.take_word(stream, insn)?;
                Ok(format!("#{}", self.value_text(u32::from(word), 4)))
            }
            AddrMode::Dir => {
                let byte = self.take_byte(stream, insn)?;
                Ok(self.value_text(u32::from(byte), 2))
            }
            AddrMode::Ext => {
                let word = self.take_word(stream, insn)?;
                Ok(self.value_text(u32::from(word), 4))
            }
            AddrMode::Rel8 => {
                let disp = self.take_byte(stream, insn)? as i8;
                let target = insn.addr().wrapping_add(2).wrapping_add(disp as u32);
                Ok(self.value_text(target & 0xFFFF, 4))
            }
            AddrMode::Rel16 => {
                let disp = self.take_word(stream, insn)? as i16;
                let target = insn.addr().wrapping_add(4).wrapping_add(disp as u32);
                Ok(self.value_text(target & 0xFFFF, 4))
            }
            AddrMode::Idx => self.decode_indexed(stream, insn),
            AddrMode::Rel9 | AddrMode::Lp => Err(ErrorKind::InternalError),
        }
    }

    fn decode_indexed(
        &self,
        stream: &mut CodeStream<'_>,
        insn: &mut Insn,
    ) -> Result<String, ErrorKind> {
        let post = self.take_byte(stream, insn)?;
        if post & 0x20 == 0 {
            // 5-bit constant offset, rr0nnnnn.
            let reg = IdxReg::from_code(post >> 6);
            let offset = i32::from(post & 0x1F) - i32::from(post & 0x10) * 2;
            return Ok(format!("{},{}", offset, reg.name()));
        }
        if post & 0b1110_0111 == 0b1110_0010 {
            // 16-bit constant offset, 111rr010.
            let reg = IdxReg::from_code(post >> 3);
            let offset = self.take_word(stream, insn)?;
            return Ok(format!(
                "{},{}",
                self.value_text(u32::from(offset), 4),
                reg.name()
            ));
        }
        Err(ErrorKind::UnknownInstruction)
    }

    fn decode_loop(
        &self,
        stream: &mut CodeStream<'_>,
        insn: &mut Insn,
    ) -> Result<String, ErrorKind> {
        let post = self.take_byte(stream, insn)?;
        let reg = LoopReg::from_code(post & 7).ok_or(ErrorKind::InternalError)?;
        let low = self.take_byte(stream, insn)?;
        let mut disp = i32::from(low);
        if post & 0x10 != 0 {
            disp -= 256;
        }
        let target = insn.addr().wrapping_add(3).wrapping_add(disp as u32);
        Ok(format!(
            "{},{}",
            reg.name(),
            self.value_text(target & 0xFFFF, 4)
        ))
    }

    fn take_byte(&self, stream: &mut CodeStream<'_>, insn: &mut Insn) -> Result<u8, ErrorKind> {
        let byte = stream.read_byte()?;
        insn.emit_byte(byte)?;
        Ok(byte)
    }

    fn take_word(&self, stream: &mut CodeStream<'_>, insn: &mut Insn) -> Result<u16, ErrorKind> {
        let hi = self.take_byte(stream, insn)?;
        let lo = self.take_byte(stream, insn)?;
        Ok(u16::from(hi) << 8 | u16::from(lo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn disassemble(bytes: &[u8], addr: u32) -> Disassembled {
        let mut stream = CodeStream::new(bytes, addr);
        Mc68HC12Disassembler::new().decode(&mut stream, None)
    }

    #[test]
    fn extended_addressing() {
        let dis = disassemble(&[0xF0, 0xF1, 0xF2], 0xABCD);
        assert!(dis.is_ok());
        assert_eq!(dis.text(), "SUBB  $F1F2");
        assert_eq!(dis.insn.len(), 3);
    }

    #[test]
    fn prefixed_page() {
        let dis = disassemble(&[0x18, 0x06], 0);
        assert_eq!(dis.text(), "ABA");
        let dis = disassemble(&[0x18, 0x20, 0xFF, 0xFC], 0x1000);
        assert_eq!(dis.text(), "LBRA  $1000");
    }

    #[test]
    fn relative_branch_target() {
        let dis = disassemble(&[0x20, 0x7F], 0x1000);
        assert_eq!(dis.text(), "BRA   $1081");
    }

    #[test]
    fn loop_primitive_postbyte_selects_mnemonic() {
        let dis = disassemble(&[0x04, 0x25, 0x0D], 0x1000);
        assert_eq!(dis.text(), "DBNE  X,$1010");
        let dis = disassemble(&[0x04, 0x81, 0x10], 0x1000);
        assert_eq!(dis.text(), "IBEQ  B,$1013");
    }

    #[test]
    fn loop_primitive_reserved_register_is_unknown() {
        // Post-byte register code 2 is reserved; no entry may claim it.
        let dis = disassemble(&[0x04, 0x22, 0x00], 0);
        assert_eq!(dis.error, Some(ErrorKind::UnknownInstruction));
        assert_eq!(dis.insn.len(), 1);
    }

    #[test]
    fn truncated_postbyte_is_no_memory_not_mismatch() {
        // Opcode 0x04 with nothing after it: the lazy post-byte fetch
        // must abort the search with NoMemory, not skip to "unknown".
        let dis = disassemble(&[0x04], 0);
        assert_eq!(dis.error, Some(ErrorKind::NoMemory));
        assert_eq!(dis.insn.len(), 1);
    }

    #[test]
    fn indexed_forms() {
        let dis = disassemble(&[0xA6, 0x05], 0);
        assert_eq!(dis.text(), "LDAA  5,X");
        let dis = disassemble(&[0xA6, 0x98], 0);
        assert_eq!(dis.text(), "LDAA  -8,SP");
        let dis = disassemble(&[0xA6, 0xEA, 0x12, 0x34], 0);
        assert_eq!(dis.text(), "LDAA  $1234,Y");
    }

    #[test]
    fn lowercase_option() {
        let mut dis = Mc68HC12Disassembler::new();
        dis.options_mut().set("uppercase", "off").unwrap();
        let mut stream = CodeStream::new(&[0xF0, 0xF1, 0xF2], 0);
        let out = dis.decode(&mut stream, None);
        assert_eq!(out.text(), "subb  $f1f2");
    }

    #[test]
    fn unknown_opcode_consumes_one_byte() {
        let dis = disassemble(&[0x01, 0xFF], 0);
        assert_eq!(dis.error, Some(ErrorKind::UnknownInstruction));
        assert_eq!(dis.insn.len(), 1);
    }
}
