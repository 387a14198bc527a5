// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Table-driven assembler and disassembler core for historical CPUs.
//!
//! `core` holds the generic instruction-table search and encoding
//! machinery; each architecture plugs in through
//! [`crate::core::registry::CpuModule`].

pub mod cli;
pub mod core;
pub mod mc68hc12;
pub mod mos6502;
pub mod scn2650;
pub mod tms7000;
