// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Instruction tables for the NMOS 6502 and the W65C02 extension page.
//!
//! Both pages are unprefixed. The W65C02 page holds only the opcodes the
//! CMOS part adds, so the base page is shared between the two CPU
//! definitions and a CMOS-only mnemonic on the NMOS part reports
//! `UnknownInstruction` rather than `OperandNotAllowed`.

use super::operand::AddrMode;
use crate::core::entry::{Cpu, Entry, EntryFlags, EntryPage};

#[derive(Debug, Clone, Copy)]
pub struct Flags {
    pub mode: AddrMode,
}

impl EntryFlags for Flags {
    fn opcode_mask(&self) -> u16 {
        0
    }
}

const fn op(opcode: u16, name: &'static str, mode: AddrMode) -> Entry<Flags> {
    Entry::new(opcode, Flags { mode }, name)
}

const fn inh(opcode: u16, name: &'static str) -> Entry<Flags> {
    op(opcode, name, AddrMode::None)
}

use AddrMode::*;

#[rustfmt::skip]
static BASE_ENTRIES: &[Entry<Flags>] = &[
    op(0xA9, "LDA", Imm),
    op(0xA5, "LDA", Zpg),
    op(0xB5, "LDA", ZpgX),
    op(0xA1, "LDA", IdxInd),
    op(0xB1, "LDA", IndY),
    op(0xAD, "LDA", Abs),
    op(0xBD, "LDA", AbsX),
    op(0xB9, "LDA", AbsY),
    op(0xA2, "LDX", Imm),
    op(0xA6, "LDX", Zpg),
    op(0xB6, "LDX", ZpgY),
    op(0xAE, "LDX", Abs),
    op(0xBE, "LDX", AbsY),
    op(0xA0, "LDY", Imm),
    op(0xA4, "LDY", Zpg),
    op(0xB4, "LDY", ZpgX),
    op(0xAC, "LDY", Abs),
    op(0xBC, "LDY", AbsX),
    op(0x85, "STA", Zpg),
    op(0x95, "STA", ZpgX),
    op(0x81, "STA", IdxInd),
    op(0x91, "STA", IndY),
    op(0x8D, "STA", Abs),
    op(0x9D, "STA", AbsX),
    op(0x99, "STA", AbsY),
    op(0x86, "STX", Zpg),
    op(0x96, "STX", ZpgY),
    op(0x8E, "STX", Abs),
    op(0x84, "STY", Zpg),
    op(0x94, "STY", ZpgX),
    op(0x8C, "STY", Abs),
    op(0x69, "ADC", Imm),
    op(0x65, "ADC", Zpg),
    op(0x75, "ADC", ZpgX),
    op(0x61, "ADC", IdxInd),
    op(0x71, "ADC", IndY),
    op(0x6D, "ADC", Abs),
    op(0x7D, "ADC", AbsX),
    op(0x79, "ADC", AbsY),
    op(0xC9, "CMP", Imm),
    op(0xC5, "CMP", Zpg),
    op(0xD5, "CMP", ZpgX),
    op(0xC1, "CMP", IdxInd),
    op(0xD1, "CMP", IndY),
    op(0xCD, "CMP", Abs),
    op(0xDD, "CMP", AbsX),
    op(0xD9, "CMP", AbsY),
    op(0x4C, "JMP", Abs),
    op(0x6C, "JMP", Ind),
    op(0x20, "JSR", Abs),
    inh(0x60, "RTS"),
    inh(0xEA, "NOP"),
    inh(0xE8, "INX"),
    inh(0xCA, "DEX"),
    inh(0xC8, "INY"),
    inh(0x88, "DEY"),
    inh(0xAA, "TAX"),
    inh(0x8A, "TXA"),
    op(0x10, "BPL", Rel),
    op(0x30, "BMI", Rel),
    op(0x50, "BVC", Rel),
    op(0x70, "BVS", Rel),
    op(0x90, "BCC", Rel),
    op(0xB0, "BCS", Rel),
    op(0xD0, "BNE", Rel),
    op(0xF0, "BEQ", Rel),
];

#[rustfmt::skip]
static BASE_INDEX: &[u16] = &[
    31, 32, 33, 34, 35, 36, 37, 38,        // ADC
    62, 63, 65, 59, 64, 58, 60, 61,        // BCC BCS BEQ BMI BNE BPL BVC BVS
    39, 40, 41, 42, 43, 44, 45, 46,        // CMP
    53, 55, 52, 54,                        // DEX DEY INX INY
    47, 48, 49,                            // JMP JSR
    0, 1, 2, 3, 4, 5, 6, 7,                // LDA
    8, 9, 10, 11, 12,                      // LDX
    13, 14, 15, 16, 17,                    // LDY
    51, 50,                                // NOP RTS
    18, 19, 20, 21, 22, 23, 24,            // STA
    25, 26, 27,                            // STX
    28, 29, 30,                            // STY
    56, 57,                                // TAX TXA
];

#[rustfmt::skip]
static CMOS_ENTRIES: &[Entry<Flags>] = &[
    op(0x80, "BRA", Rel),
    inh(0xDA, "PHX"),
    inh(0xFA, "PLX"),
    inh(0x5A, "PHY"),
    inh(0x7A, "PLY"),
    op(0x64, "STZ", Zpg),
    op(0x74, "STZ", ZpgX),
    op(0x9C, "STZ", Abs),
    op(0x9E, "STZ", AbsX),
    op(0xB2, "LDA", ZpgInd),
    op(0x92, "STA", ZpgInd),
    op(0x72, "ADC", ZpgInd),
    op(0xD2, "CMP", ZpgInd),
];

#[rustfmt::skip]
static CMOS_INDEX: &[u16] = &[
    11,                                    // ADC
    0,                                     // BRA
    12,                                    // CMP
    9,                                     // LDA
    1, 3, 2, 4,                            // PHX PHY PLX PLY
    10,                                    // STA
    5, 6, 7, 8,                            // STZ
];

static MOS_PAGES: &[EntryPage<Flags>] = &[EntryPage::new(0, BASE_ENTRIES, BASE_INDEX)];

static CMOS_PAGES: &[EntryPage<Flags>] = &[
    EntryPage::new(0, BASE_ENTRIES, BASE_INDEX),
    EntryPage::new(0, CMOS_ENTRIES, CMOS_INDEX),
];

pub static CPU_MOS6502: Cpu<Flags> = Cpu::new("mos6502", MOS_PAGES);
pub static CPU_W65C02: Cpu<Flags> = Cpu::new("w65c02", CMOS_PAGES);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::assert_page_consistent;

    #[test]
    fn base_page_consistent() {
        assert_page_consistent(&MOS_PAGES[0]);
    }

    #[test]
    fn cmos_page_consistent() {
        assert_page_consistent(&CMOS_PAGES[1]);
    }

    #[test]
    fn cmos_opcodes_absent_from_base() {
        for e in CMOS_ENTRIES {
            assert!(
                !BASE_ENTRIES.iter().any(|b| b.opcode() == e.opcode()),
                "duplicate opcode {:02X}",
                e.opcode()
            );
        }
    }
}
