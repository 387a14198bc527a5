// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MC68HC12 instruction tables.
//!
//! Page 0 holds the unprefixed opcodes; page 0x18 holds the prefixed
//! ones, including the long branches that smart-branch promotion targets
//! (`LBcc` shares `Bcc`'s opcode under the 0x18 prefix). The six loop
//! primitives share opcode 0x04 and are disambiguated by post-byte
//! selector bits.

use crate::core::entry::{Cpu, Entry, EntryFlags, EntryPage};

use super::operand::AddrMode;

/// Post-byte requirement of a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSpec {
    None,
    /// Loop primitive: bits 7..5 of the post-byte must equal the selector.
    Loop(u8),
}

#[derive(Clone, Copy)]
pub struct Flags {
    mode1: AddrMode,
    mode2: AddrMode,
    post: PostSpec,
}

impl Flags {
    pub fn mode1(&self) -> AddrMode {
        self.mode1
    }

    pub fn mode2(&self) -> AddrMode {
        self.mode2
    }

    pub fn post(&self) -> PostSpec {
        self.post
    }
}

impl EntryFlags for Flags {
    fn opcode_mask(&self) -> u16 {
        0
    }
}

const fn op1(opcode: u16, mode1: AddrMode, name: &'static str) -> Entry<Flags> {
    Entry::new(
        opcode,
        Flags {
            mode1,
            mode2: AddrMode::None,
            post: PostSpec::None,
        },
        name,
    )
}

const fn inh(opcode: u16, name: &'static str) -> Entry<Flags> {
    op1(opcode, AddrMode::None, name)
}

const fn lp(selector: u8, name: &'static str) -> Entry<Flags> {
    Entry::new(
        0x04,
        Flags {
            mode1: AddrMode::Lp,
            mode2: AddrMode::Rel9,
            post: PostSpec::Loop(selector),
        },
        name,
    )
}

static PAGE0_ENTRIES: &[Entry<Flags>] = &[
    lp(0b000, "DBEQ"),
    lp(0b001, "DBNE"),
    lp(0b010, "TBEQ"),
    lp(0b011, "TBNE"),
    lp(0b100, "IBEQ"),
    lp(0b101, "IBNE"),
    op1(0x05, AddrMode::Idx, "JMP"),
    op1(0x06, AddrMode::Ext, "JMP"),
    op1(0x07, AddrMode::Rel8, "BSR"),
    inh(0x08, "INX"),
    inh(0x09, "DEX"),
    op1(0x15, AddrMode::Idx, "JSR"),
    op1(0x16, AddrMode::Ext, "JSR"),
    op1(0x17, AddrMode::Dir, "JSR"),
    op1(0x20, AddrMode::Rel8, "BRA"),
    op1(0x26, AddrMode::Rel8, "BNE"),
    op1(0x27, AddrMode::Rel8, "BEQ"),
    inh(0x30, "PULX"),
    inh(0x34, "PSHX"),
    op1(0x5A, AddrMode::Dir, "STAA"),
    op1(0x5B, AddrMode::Dir, "STAB"),
    op1(0x6A, AddrMode::Idx, "STAA"),
    op1(0x6B, AddrMode::Idx, "STAB"),
    op1(0x7A, AddrMode::Ext, "STAA"),
    op1(0x7B, AddrMode::Ext, "STAB"),
    op1(0x80, AddrMode::Im8, "SUBA"),
    op1(0x86, AddrMode::Im8, "LDAA"),
    inh(0x87, "CLRA"),
    op1(0x90, AddrMode::Dir, "SUBA"),
    op1(0x96, AddrMode::Dir, "LDAA"),
    op1(0xA0, AddrMode::Idx, "SUBA"),
    op1(0xA6, AddrMode::Idx, "LDAA"),
    inh(0xA7, "NOP"),
    op1(0xB0, AddrMode::Ext, "SUBA"),
    op1(0xB6, AddrMode::Ext, "LDAA"),
    op1(0xC0, AddrMode::Im8, "SUBB"),
    op1(0xC6, AddrMode::Im8, "LDAB"),
    inh(0xC7, "CLRB"),
    op1(0xCC, AddrMode::Im16, "LDD"),
    op1(0xD0, AddrMode::Dir, "SUBB"),
    op1(0xD6, AddrMode::Dir, "LDAB"),
    op1(0xDC, AddrMode::Dir, "LDD"),
    op1(0xE0, AddrMode::Idx, "SUBB"),
    op1(0xE6, AddrMode::Idx, "LDAB"),
    op1(0xEC, AddrMode::Idx, "LDD"),
    op1(0xF0, AddrMode::Ext, "SUBB"),
    op1(0xF6, AddrMode::Ext, "LDAB"),
    op1(0xFC, AddrMode::Ext, "LDD"),
];

#[rustfmt::skip]
static PAGE0_INDEX: &[u16] = &[
    16,         // BEQ
    15,         // BNE
    14,         // BRA
    8,          // BSR
    27,         // CLRA
    37,         // CLRB
    0, 1,       // DBEQ DBNE
    10,         // DEX
    4, 5,       // IBEQ IBNE
    9,          // INX
    6, 7,       // JMP
    11, 12, 13, // JSR
    26, 29, 31, 34, // LDAA
    36, 40, 43, 46, // LDAB
    38, 41, 44, 47, // LDD
    32,         // NOP
    18,         // PSHX
    17,         // PULX
    19, 21, 23, // STAA
    20, 22, 24, // STAB
    25, 28, 30, 33, // SUBA
    35, 39, 42, 45, // SUBB
    2, 3,       // TBEQ TBNE
];

static PAGE18_ENTRIES: &[Entry<Flags>] = &[
    inh(0x06, "ABA"),
    inh(0x0E, "TAB"),
    inh(0x0F, "TBA"),
    inh(0x16, "SBA"),
    inh(0x17, "CBA"),
    op1(0x20, AddrMode::Rel16, "LBRA"),
    op1(0x26, AddrMode::Rel16, "LBNE"),
    op1(0x27, AddrMode::Rel16, "LBEQ"),
];

static PAGE18_INDEX: &[u16] = &[0, 4, 7, 6, 5, 3, 1, 2];

pub const PREFIX: u8 = 0x18;

static PAGES: &[EntryPage<Flags>] = &[
    EntryPage::new(0, PAGE0_ENTRIES, PAGE0_INDEX),
    EntryPage::new(PREFIX, PAGE18_ENTRIES, PAGE18_INDEX),
];

pub static CPU_MC68HC12: Cpu<Flags> = Cpu::new("mc68hc12", PAGES);

/// The 0x18-prefixed long form of a short branch, if the ISA has one.
/// `LBcc` reuses `Bcc`'s opcode, so a lookup by opcode and mode is enough.
pub fn long_branch_for(opcode: u16) -> Option<&'static Entry<Flags>> {
    PAGE18_ENTRIES
        .iter()
        .find(|entry| entry.opcode() == opcode && entry.flags().mode1() == AddrMode::Rel16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::assert_page_consistent;

    #[test]
    fn pages_are_consistent() {
        for page in CPU_MC68HC12.pages() {
            assert_page_consistent(page);
        }
    }

    #[test]
    fn prefix_detection() {
        assert!(CPU_MC68HC12.is_prefix(0x18));
        assert!(!CPU_MC68HC12.is_prefix(0x04));
    }

    #[test]
    fn long_branch_lookup() {
        assert_eq!(long_branch_for(0x20).unwrap().name(), "LBRA");
        assert_eq!(long_branch_for(0x26).unwrap().name(), "LBNE");
        // BSR has no 0x18-prefixed long form.
        assert!(long_branch_for(0x07).is_none());
    }
}
