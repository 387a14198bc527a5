// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Per-instruction byte buffer and the decode-side byte cursor.
//!
//! Both are short-lived and owned exclusively by one encode/decode call.

use crate::core::error::ErrorKind;

/// Longest encoding any supported architecture produces.
pub const MAX_CODE_LEN: usize = 8;

/// One instruction being assembled or disassembled: target address, the
/// raw bytes emitted or consumed so far, and the canonical mnemonic.
#[derive(Debug, Clone, Default)]
pub struct Insn {
    addr: u32,
    bytes: Vec<u8>,
    name: String,
}

impl Insn {
    pub fn new(addr: u32) -> Self {
        Self {
            addr,
            bytes: Vec::with_capacity(MAX_CODE_LEN),
            name: String::new(),
        }
    }

    pub fn addr(&self) -> u32 {
        self.addr
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn emit_byte(&mut self, byte: u8) -> Result<(), ErrorKind> {
        if self.bytes.len() >= MAX_CODE_LEN {
            return Err(ErrorKind::NoMemory);
        }
        self.bytes.push(byte);
        Ok(())
    }

    pub fn emit_u16_be(&mut self, word: u16) -> Result<(), ErrorKind> {
        self.emit_byte((word >> 8) as u8)?;
        self.emit_byte(word as u8)
    }

    pub fn emit_u16_le(&mut self, word: u16) -> Result<(), ErrorKind> {
        self.emit_byte(word as u8)?;
        self.emit_byte((word >> 8) as u8)
    }
}

/// Read cursor over a byte image being disassembled.
///
/// The position advances exactly one byte per successful `read_byte`, so
/// the caller can resynchronize after a truncated decode; `peek_byte`
/// supports lazy post-byte disambiguation without committing the read.
#[derive(Debug)]
pub struct CodeStream<'a> {
    data: &'a [u8],
    base: u32,
    pos: usize,
}

impl<'a> CodeStream<'a> {
    pub fn new(data: &'a [u8], base: u32) -> Self {
        Self { data, base, pos: 0 }
    }

    /// Address of the next unread byte.
    pub fn addr(&self) -> u32 {
        self.base.wrapping_add(self.pos as u32)
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_byte(&mut self) -> Result<u8, ErrorKind> {
        let byte = *self.data.get(self.pos).ok_or(ErrorKind::NoMemory)?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_u16_be(&mut self) -> Result<u16, ErrorKind> {
        let hi = self.read_byte()?;
        let lo = self.read_byte()?;
        Ok(u16::from(hi) << 8 | u16::from(lo))
    }

    pub fn read_u16_le(&mut self) -> Result<u16, ErrorKind> {
        let lo = self.read_byte()?;
        let hi = self.read_byte()?;
        Ok(u16::from(hi) << 8 | u16::from(lo))
    }

    /// Look `offset` bytes past the cursor without consuming.
    pub fn peek_byte(&self, offset: usize) -> Result<u8, ErrorKind> {
        self.data
            .get(self.pos + offset)
            .copied()
            .ok_or(ErrorKind::NoMemory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_caps_at_max_length() {
        let mut insn = Insn::new(0x1000);
        for byte in 0..MAX_CODE_LEN as u8 {
            insn.emit_byte(byte).unwrap();
        }
        assert_eq!(insn.emit_byte(0xFF), Err(ErrorKind::NoMemory));
        assert_eq!(insn.len(), MAX_CODE_LEN);
    }

    #[test]
    fn emit_word_endianness() {
        let mut insn = Insn::new(0);
        insn.emit_u16_be(0xF1F2).unwrap();
        insn.emit_u16_le(0xF1F2).unwrap();
        assert_eq!(insn.bytes(), &[0xF1, 0xF2, 0xF2, 0xF1]);
    }

    #[test]
    fn stream_tracks_position_and_address() {
        let mut stream = CodeStream::new(&[0x01, 0x02, 0x03], 0xABCD);
        assert_eq!(stream.addr(), 0xABCD);
        assert_eq!(stream.read_byte(), Ok(0x01));
        assert_eq!(stream.addr(), 0xABCE);
        assert_eq!(stream.read_u16_be(), Ok(0x0203));
        assert_eq!(stream.read_byte(), Err(ErrorKind::NoMemory));
        // Failed read does not advance.
        assert_eq!(stream.pos(), 3);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut stream = CodeStream::new(&[0x04, 0x81], 0);
        assert_eq!(stream.peek_byte(1), Ok(0x81));
        assert_eq!(stream.peek_byte(2), Err(ErrorKind::NoMemory));
        assert_eq!(stream.read_byte(), Ok(0x04));
        assert_eq!(stream.peek_byte(0), Ok(0x81));
    }
}
