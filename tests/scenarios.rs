// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! End-to-end scenarios through the module registry: assemble, then
//! disassemble the emitted bytes and compare the canonical listing.

use pretty_assertions::assert_eq;

use retroasm::core::error::ErrorKind;
use retroasm::core::insn::CodeStream;
use retroasm::core::registry::ModuleRegistry;

fn assemble(cpu: &str, line: &str, addr: u32) -> (Vec<u8>, Option<ErrorKind>) {
    let registry = ModuleRegistry::with_default_modules();
    let asm = registry.new_assembler(cpu).unwrap();
    let out = asm.encode(line, addr, None);
    (out.insn.bytes().to_vec(), out.error.map(|err| err.kind))
}

fn disassemble(cpu: &str, bytes: &[u8], addr: u32) -> String {
    let registry = ModuleRegistry::with_default_modules();
    let dis = registry.new_disassembler(cpu).unwrap();
    let mut stream = CodeStream::new(bytes, addr);
    let out = dis.decode(&mut stream, None);
    assert_eq!(out.error, None, "decode of {bytes:02X?} failed");
    out.text()
}

#[test]
fn hc12_extended_subtract_round_trip() {
    let (bytes, error) = assemble("mc68hc12", "SUBB  $F1F2", 0xABCD);
    assert_eq!(error, None);
    assert_eq!(bytes, [0xF0, 0xF1, 0xF2]);
    assert_eq!(disassemble("mc68hc12", &bytes, 0xABCD), "SUBB  $F1F2");
}

#[test]
fn scn2650_indirect_absolute_round_trip() {
    let (bytes, error) = assemble("scn2650", "LODA,R0 *H'19AB'", 0);
    assert_eq!(error, None);
    assert_eq!(bytes, [0x0C, 0x99, 0xAB]);
    assert_eq!(disassemble("scn2650", &bytes, 0), "LODA,R0 *H'19AB'");
}

#[test]
fn tms7000_register_overflow_still_emits() {
    let (bytes, error) = assemble("tms7000", "CLR R256", 0);
    assert_eq!(error, Some(ErrorKind::UndefinedSymbol));
    assert_eq!(bytes, [0xD5, 0x00]);
}

#[test]
fn w65c02_extension_round_trip() {
    let (bytes, error) = assemble("w65c02", "STZ $44", 0);
    assert_eq!(error, None);
    assert_eq!(bytes, [0x64, 0x44]);
    assert_eq!(disassemble("w65c02", &bytes, 0), "STZ   $44");
}

#[test]
fn smart_branch_promotion_through_registry() {
    let registry = ModuleRegistry::with_default_modules();
    let mut asm = registry.new_assembler("68hc12").unwrap();
    asm.options_mut().set("smart-branch", "on").unwrap();
    let out = asm.encode("BRA $1082", 0x1000, None);
    assert_eq!(out.error, None);
    assert_eq!(out.insn.bytes(), &[0x18, 0x20, 0x00, 0x7E]);
    assert_eq!(
        disassemble("mc68hc12", out.insn.bytes(), 0x1000),
        "LBRA  $1082"
    );
}

#[test]
fn search_errors_are_uniform_across_cpus() {
    for cpu in ["mc68hc12", "mos6502", "w65c02", "scn2650", "tms7000"] {
        let (_, error) = assemble(cpu, "QUUX", 0);
        assert_eq!(
            error,
            Some(ErrorKind::UnknownInstruction),
            "unknown mnemonic on {cpu}"
        );
    }
    // Known mnemonic with an operand shape it never takes.
    let (_, error) = assemble("mos6502", "RTS #$10", 0);
    assert_eq!(error, Some(ErrorKind::OperandNotAllowed));
    let (_, error) = assemble("tms7000", "NOP R1", 0);
    assert_eq!(error, Some(ErrorKind::OperandNotAllowed));
}

#[test]
fn aliases_select_the_same_module() {
    let registry = ModuleRegistry::with_default_modules();
    for (alias, canonical) in [
        ("6502", "mos6502"),
        ("65C02", "w65c02"),
        ("HC12", "mc68hc12"),
        ("2650", "scn2650"),
        ("7000", "tms7000"),
    ] {
        let asm = registry.new_assembler(alias).unwrap();
        assert_eq!(asm.cpu_name(), canonical);
        let dis = registry.new_disassembler(alias).unwrap();
        assert_eq!(dis.cpu_name(), canonical);
    }
    assert_eq!(
        registry.new_assembler("pdp11").map(|_| ()).unwrap_err(),
        ErrorKind::UnknownCpu
    );
}

#[test]
fn selection_is_idempotent() {
    let registry = ModuleRegistry::with_default_modules();
    let first = registry.new_assembler("mos6502").unwrap();
    let second = registry.new_assembler("mos6502").unwrap();
    assert_eq!(first.cpu_name(), second.cpu_name());
    let a = first.encode("LDA #$01", 0, None);
    let b = second.encode("LDA #$01", 0, None);
    assert_eq!(a.insn.bytes(), b.insn.bytes());
}

#[test]
fn listing_radix_option_round_trip() {
    let registry = ModuleRegistry::with_default_modules();
    let mut dis = registry.new_disassembler("mos6502").unwrap();
    dis.options_mut().set("list-radix", "dec").unwrap();
    let mut stream = CodeStream::new(&[0xA9, 0x2A], 0);
    let out = dis.decode(&mut stream, None);
    assert_eq!(out.text(), "LDA   #42");
}

#[test]
fn disassembly_resynchronises_after_unknown_opcode() {
    let registry = ModuleRegistry::with_default_modules();
    let dis = registry.new_disassembler("mos6502").unwrap();
    let image = [0xFF, 0xEA];
    let mut stream = CodeStream::new(&image, 0);

    let bad = dis.decode(&mut stream, None);
    assert_eq!(bad.error, Some(ErrorKind::UnknownInstruction));
    assert_eq!(bad.insn.bytes(), &[0xFF]);

    let good = dis.decode(&mut stream, None);
    assert_eq!(good.text(), "NOP");
}
