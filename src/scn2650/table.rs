// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Signetics 2650 instruction table.
//!
//! Register and condition-code mnemonics occupy four consecutive
//! opcodes; the table stores the base opcode with a low-bits mask so one
//! entry covers the whole group.

use crate::core::entry::{Cpu, Entry, EntryFlags, EntryPage};

/// What the `,x` mnemonic suffix selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    None,
    Reg,
    Cond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperFmt {
    None,
    /// One immediate byte.
    Imm8,
    /// 7-bit relative displacement, bit 7 = indirect.
    Rel7,
    /// 15-bit absolute address word, bit 15 = indirect.
    Abs15,
}

#[derive(Debug, Clone, Copy)]
pub struct Flags {
    suffix: Suffix,
    oper: OperFmt,
    mask: u16,
}

impl Flags {
    pub fn suffix(&self) -> Suffix {
        self.suffix
    }

    pub fn oper(&self) -> OperFmt {
        self.oper
    }
}

impl EntryFlags for Flags {
    fn opcode_mask(&self) -> u16 {
        self.mask
    }
}

const fn grp(opcode: u16, name: &'static str, suffix: Suffix, oper: OperFmt) -> Entry<Flags> {
    Entry::new(
        opcode,
        Flags {
            suffix,
            oper,
            mask: 0x03,
        },
        name,
    )
}

const fn inh(opcode: u16, name: &'static str) -> Entry<Flags> {
    Entry::new(
        opcode,
        Flags {
            suffix: Suffix::None,
            oper: OperFmt::None,
            mask: 0,
        },
        name,
    )
}

use OperFmt::{Abs15, Imm8, Rel7};
use Suffix::{Cond, Reg};

#[rustfmt::skip]
static ENTRIES: &[Entry<Flags>] = &[
    grp(0x00, "LODZ", Reg, OperFmt::None),
    grp(0x04, "LODI", Reg, Imm8),
    grp(0x08, "LODR", Reg, Rel7),
    grp(0x0C, "LODA", Reg, Abs15),
    inh(0x12, "SPSU"),
    inh(0x13, "SPSL"),
    grp(0x14, "RETC", Cond, OperFmt::None),
    grp(0x18, "BCTR", Cond, Rel7),
    grp(0x1C, "BCTA", Cond, Abs15),
    grp(0x20, "EORZ", Reg, OperFmt::None),
    grp(0x24, "EORI", Reg, Imm8),
    grp(0x3C, "BSTA", Cond, Abs15),
    inh(0x40, "HALT"),
    grp(0x44, "ANDI", Reg, Imm8),
    grp(0x60, "IORZ", Reg, OperFmt::None),
    grp(0x80, "ADDZ", Reg, OperFmt::None),
    grp(0x84, "ADDI", Reg, Imm8),
    grp(0x8C, "ADDA", Reg, Abs15),
    grp(0xC0, "STRZ", Reg, OperFmt::None),
    grp(0xC8, "STRR", Reg, Rel7),
    grp(0xCC, "STRA", Reg, Abs15),
    grp(0xE4, "COMI", Reg, Imm8),
];

#[rustfmt::skip]
static INDEX: &[u16] = &[
    17, 16, 15,                            // ADDA ADDI ADDZ
    13,                                    // ANDI
    8, 7, 11,                              // BCTA BCTR BSTA
    21,                                    // COMI
    10, 9,                                 // EORI EORZ
    12, 14,                                // HALT IORZ
    3, 1, 2, 0,                            // LODA LODI LODR LODZ
    6,                                     // RETC
    5, 4,                                  // SPSL SPSU
    20, 19, 18,                            // STRA STRR STRZ
];

static PAGES: &[EntryPage<Flags>] = &[EntryPage::new(0, ENTRIES, INDEX)];

pub static CPU_SCN2650: Cpu<Flags> = Cpu::new("scn2650", PAGES);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::assert_page_consistent;

    #[test]
    fn page_consistent() {
        assert_page_consistent(&PAGES[0]);
    }

    #[test]
    fn mask_groups_cover_register_variants() {
        let (entry, _) = CPU_SCN2650
            .search_opcode(0, |e, _| Ok(e.match_opcode(0x0E)))
            .unwrap();
        assert_eq!(entry.name(), "LODA");

        // 0x12 sits inside no group; it is its own opcode.
        let (entry, _) = CPU_SCN2650
            .search_opcode(0, |e, _| Ok(e.match_opcode(0x12)))
            .unwrap();
        assert_eq!(entry.name(), "SPSU");
    }
}
