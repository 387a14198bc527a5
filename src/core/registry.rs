// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! CPU module registry.
//!
//! The registry is generic and has no knowledge of concrete
//! architectures; each architecture module registers itself with a
//! canonical name, documented aliases, and factories for its assembler
//! and disassembler. Instruction tables stay private to their modules.

use log::debug;

use crate::core::assembler::Assembler;
use crate::core::disassembler::Disassembler;
use crate::core::error::ErrorKind;

/// Registration interface for one CPU architecture.
pub trait CpuModule: Send + Sync {
    /// Canonical CPU name, lowercase (e.g. `"mc68hc12"`).
    fn cpu_name(&self) -> &'static str;

    /// Accepted aliases, matched case-insensitively (e.g. `"2650"`).
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn new_assembler(&self) -> Box<dyn Assembler>;
    fn new_disassembler(&self) -> Box<dyn Disassembler>;
}

/// Lookup over the registered CPU modules.
pub struct ModuleRegistry {
    modules: Vec<Box<dyn CpuModule>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Registry with every architecture this crate ships.
    pub fn with_default_modules() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(crate::mc68hc12::Mc68HC12Module));
        registry.register(Box::new(crate::mos6502::Mos6502Module));
        registry.register(Box::new(crate::mos6502::W65C02Module));
        registry.register(Box::new(crate::scn2650::Scn2650Module));
        registry.register(Box::new(crate::tms7000::Tms7000Module));
        registry
    }

    pub fn register(&mut self, module: Box<dyn CpuModule>) {
        debug!("registering cpu module {}", module.cpu_name());
        self.modules.push(module);
    }

    /// Case-insensitive lookup by canonical name or alias.
    pub fn find(&self, name: &str) -> Option<&dyn CpuModule> {
        let query = name.to_ascii_lowercase();
        self.modules
            .iter()
            .find(|module| {
                module.cpu_name() == query
                    || module
                        .aliases()
                        .iter()
                        .any(|alias| alias.eq_ignore_ascii_case(&query))
            })
            .map(AsRef::as_ref)
    }

    pub fn new_assembler(&self, cpu: &str) -> Result<Box<dyn Assembler>, ErrorKind> {
        self.find(cpu)
            .map(CpuModule::new_assembler)
            .ok_or(ErrorKind::UnknownCpu)
    }

    pub fn new_disassembler(&self, cpu: &str) -> Result<Box<dyn Disassembler>, ErrorKind> {
        self.find(cpu)
            .map(CpuModule::new_disassembler)
            .ok_or(ErrorKind::UnknownCpu)
    }

    pub fn cpu_names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|module| module.cpu_name()).collect()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::with_default_modules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_name_and_alias() {
        let registry = ModuleRegistry::with_default_modules();
        assert!(registry.find("mc68hc12").is_some());
        assert!(registry.find("68HC12").is_some());
        assert!(registry.find("2650").is_some());
        assert!(registry.find("SCN2650").is_some());
        assert!(registry.find("z9000").is_none());
    }

    #[test]
    fn factories_agree_on_cpu_name() {
        let registry = ModuleRegistry::with_default_modules();
        for name in registry.cpu_names() {
            let asm = registry.new_assembler(name).unwrap();
            let dis = registry.new_disassembler(name).unwrap();
            assert_eq!(asm.cpu_name(), name);
            assert_eq!(dis.cpu_name(), name);
        }
    }

    #[test]
    fn cpu_selection_is_idempotent() {
        let registry = ModuleRegistry::with_default_modules();
        let first = registry.new_assembler("mos6502").unwrap();
        let second = registry.new_assembler("mos6502").unwrap();
        assert_eq!(first.cpu_name(), second.cpu_name());

        let line = "LDA #$10";
        let a = first.encode(line, 0x200, None);
        let b = second.encode(line, 0x200, None);
        assert_eq!(a.insn.bytes(), b.insn.bytes());
    }
}
