// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! TMS7000 instruction table. The single-operand family repeats across
//! three opcode columns (A, B, register file); each column is its own
//! row here.

use super::operand::AddrMode;
use crate::core::entry::{Cpu, Entry, EntryFlags, EntryPage};

#[derive(Debug, Clone, Copy)]
pub struct Flags {
    mode1: AddrMode,
    mode2: AddrMode,
}

impl Flags {
    pub fn mode1(&self) -> AddrMode {
        self.mode1
    }

    pub fn mode2(&self) -> AddrMode {
        self.mode2
    }
}

impl EntryFlags for Flags {
    fn opcode_mask(&self) -> u16 {
        0
    }
}

const fn op1(opcode: u16, name: &'static str, mode1: AddrMode) -> Entry<Flags> {
    Entry::new(
        opcode,
        Flags {
            mode1,
            mode2: AddrMode::None,
        },
        name,
    )
}

const fn op2(opcode: u16, name: &'static str, mode1: AddrMode, mode2: AddrMode) -> Entry<Flags> {
    Entry::new(opcode, Flags { mode1, mode2 }, name)
}

const fn inh(opcode: u16, name: &'static str) -> Entry<Flags> {
    op1(opcode, name, AddrMode::None)
}

use AddrMode::{At, Pn, Rel, Rn, A, B};

#[rustfmt::skip]
static ENTRIES: &[Entry<Flags>] = &[
    inh(0x00, "NOP"),
    inh(0x01, "IDLE"),
    inh(0x05, "EINT"),
    inh(0x06, "DINT"),
    inh(0x07, "SETC"),
    inh(0x0A, "RETS"),
    inh(0x0B, "RETI"),
    op1(0x8A, "LDA", At),
    op1(0x8B, "STA", At),
    op1(0x8C, "BR", At),
    op1(0xB5, "CLR", A),
    op1(0xC5, "CLR", B),
    op1(0xD5, "CLR", Rn),
    op1(0xB2, "DEC", A),
    op1(0xC2, "DEC", B),
    op1(0xD2, "DEC", Rn),
    op1(0xB3, "INC", A),
    op1(0xC3, "INC", B),
    op1(0xD3, "INC", Rn),
    op1(0xB4, "INV", A),
    op1(0xC4, "INV", B),
    op1(0xD4, "INV", Rn),
    op1(0xB7, "SWAP", A),
    op1(0xC7, "SWAP", B),
    op1(0xD7, "SWAP", Rn),
    op1(0xBB, "DECD", A),
    op1(0xCB, "DECD", B),
    op1(0xDB, "DECD", Rn),
    op1(0xBE, "RL", A),
    op1(0xCE, "RL", B),
    op1(0xDE, "RL", Rn),
    op1(0xBC, "RR", A),
    op1(0xCC, "RR", B),
    op1(0xDC, "RR", Rn),
    op1(0xB8, "PUSH", A),
    op1(0xC8, "PUSH", B),
    op1(0xD8, "PUSH", Rn),
    op1(0xB9, "POP", A),
    op1(0xC9, "POP", B),
    op1(0xD9, "POP", Rn),
    op1(0xE0, "JMP", Rel),
    op1(0xE1, "JN", Rel),
    op1(0xE2, "JZ", Rel),
    op1(0xE3, "JC", Rel),
    op1(0xE4, "JP", Rel),
    op1(0xE5, "JPZ", Rel),
    op1(0xE6, "JNZ", Rel),
    op1(0xE7, "JNC", Rel),
    op2(0x80, "MOVP", Pn, A),
    op2(0x91, "MOVP", Pn, B),
    op2(0x82, "MOVP", A, Pn),
    op2(0x92, "MOVP", B, Pn),
];

#[rustfmt::skip]
static INDEX: &[u16] = &[
    9,                                     // BR
    10, 11, 12,                            // CLR
    13, 14, 15,                            // DEC
    25, 26, 27,                            // DECD
    3, 2, 1,                               // DINT EINT IDLE
    16, 17, 18,                            // INC
    19, 20, 21,                            // INV
    43, 40, 41, 47, 46, 44, 45, 42,        // JC JMP JN JNC JNZ JP JPZ JZ
    7,                                     // LDA
    48, 49, 50, 51,                        // MOVP
    0,                                     // NOP
    37, 38, 39,                            // POP
    34, 35, 36,                            // PUSH
    6, 5,                                  // RETI RETS
    28, 29, 30,                            // RL
    31, 32, 33,                            // RR
    4,                                     // SETC
    8,                                     // STA
    22, 23, 24,                            // SWAP
];

static PAGES: &[EntryPage<Flags>] = &[EntryPage::new(0, ENTRIES, INDEX)];

pub static CPU_TMS7000: Cpu<Flags> = Cpu::new("tms7000", PAGES);
