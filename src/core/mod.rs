// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Architecture-agnostic assembler/disassembler engine: instruction-table
//! search primitives, page orchestration, operand value codecs, and the
//! call contracts every CPU module implements.

pub mod assembler;
pub mod branch;
pub mod disassembler;
pub mod entry;
pub mod error;
pub mod insn;
pub mod options;
pub mod registry;
pub mod symbol;
pub mod table;
pub mod value;
