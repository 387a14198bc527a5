// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Instruction-table rows, pages, and per-CPU page orchestration.
//!
//! An [`Entry`] is one read-only table row: a fixed opcode pattern, a
//! bit-field descriptor of its operand modes (architecture-specific
//! `Flags` type), and the mnemonic. Entries live in [`EntryPage`]s that
//! share an opcode prefix byte; each page carries a parallel alphabetical
//! index so the same data serves both query directions.

use log::trace;

use crate::core::error::ErrorKind;
use crate::core::table::{indexed_search, linear_search, NameLookup};

/// Accessor contract every architecture's flags type provides to the
/// generic search machinery.
pub trait EntryFlags: Copy + 'static {
    /// Mask of "don't care" opcode bits (register number, condition code,
    /// etc. encoded in the opcode itself). Fixed-opcode entries return 0.
    fn opcode_mask(&self) -> u16;
}

/// One instruction-table row. Const-initialized, process-wide read-only.
pub struct Entry<F: EntryFlags> {
    opcode: u16,
    flags: F,
    name: &'static str,
}

impl<F: EntryFlags> Entry<F> {
    pub const fn new(opcode: u16, flags: F, name: &'static str) -> Self {
        Self {
            opcode,
            flags,
            name,
        }
    }

    pub fn opcode(&self) -> u16 {
        self.opcode
    }

    pub fn flags(&self) -> &F {
        &self.flags
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Masked opcode equality: variable bits are ignored.
    pub fn match_opcode(&self, code: u16) -> bool {
        code & !self.flags.opcode_mask() == self.opcode
    }
}

/// A block of entries sharing one opcode prefix (0 means unprefixed),
/// with the alphabetical index used for name search.
pub struct EntryPage<F: EntryFlags> {
    prefix: u8,
    entries: &'static [Entry<F>],
    index: &'static [u16],
}

impl<F: EntryFlags> EntryPage<F> {
    pub const fn new(prefix: u8, entries: &'static [Entry<F>], index: &'static [u16]) -> Self {
        Self {
            prefix,
            entries,
            index,
        }
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn entries(&self) -> &'static [Entry<F>] {
        self.entries
    }

    /// Total byte length of this page's prefix (0 or 1).
    pub fn prefix_len(&self) -> usize {
        usize::from(self.prefix != 0)
    }
}

/// All entry pages for one CPU variant. Stateless; shared freely.
pub struct Cpu<F: EntryFlags> {
    name: &'static str,
    pages: &'static [EntryPage<F>],
}

impl<F: EntryFlags> Cpu<F> {
    pub const fn new(name: &'static str, pages: &'static [EntryPage<F>]) -> Self {
        Self { name, pages }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pages(&self) -> &'static [EntryPage<F>] {
        self.pages
    }

    /// True if `code` selects a multi-byte-opcode page.
    pub fn is_prefix(&self, code: u8) -> bool {
        self.pages
            .iter()
            .any(|page| page.prefix != 0 && page.prefix == code)
    }

    /// Name + operand-acceptance search across all pages, in page order.
    ///
    /// A page where the mnemonic exists but no row accepts the operands is
    /// remembered so the final error distinguishes `OperandNotAllowed`
    /// from `UnknownInstruction`.
    pub fn search_name(
        &self,
        name: &str,
        mut accept: impl FnMut(&Entry<F>, &EntryPage<F>) -> bool,
    ) -> Result<(&'static Entry<F>, &'static EntryPage<F>), ErrorKind> {
        let query = name.to_ascii_uppercase();
        let mut name_seen = false;
        for page in self.pages {
            let lookup = indexed_search(
                page.entries,
                page.index,
                |entry| query.as_str().cmp(entry.name),
                |entry| accept(entry, page),
            );
            match lookup {
                NameLookup::Found(entry) => return Ok((entry, page)),
                NameLookup::NameOnly => name_seen = true,
                NameLookup::NotFound => {}
            }
        }
        let err = if name_seen {
            ErrorKind::OperandNotAllowed
        } else {
            ErrorKind::UnknownInstruction
        };
        trace!("{}: no table row for {query}: {err}", self.name);
        Err(err)
    }

    /// Opcode search across the pages whose prefix equals `prefix`.
    ///
    /// The matcher may need to read additional bytes (post-byte
    /// disambiguation); a failed read aborts the whole search instead of
    /// being mistaken for a non-match.
    pub fn search_opcode(
        &self,
        prefix: u8,
        mut matcher: impl FnMut(&Entry<F>, &EntryPage<F>) -> Result<bool, ErrorKind>,
    ) -> Result<(&'static Entry<F>, &'static EntryPage<F>), ErrorKind> {
        for page in self.pages {
            if page.prefix != prefix {
                continue;
            }
            if let Some(entry) = linear_search(page.entries, |entry| matcher(entry, page))? {
                return Ok((entry, page));
            }
        }
        Err(ErrorKind::UnknownInstruction)
    }
}

/// Table well-formedness checks shared by the per-architecture table
/// tests: index shape, alphabetical order, mask invariants, and agreement
/// between the indexed and linear views of every mnemonic.
#[cfg(test)]
pub(crate) fn assert_page_consistent<F: EntryFlags>(page: &EntryPage<F>) {
    assert_eq!(
        page.index.len(),
        page.entries.len(),
        "index and entry arrays must be parallel"
    );

    let mut covered: Vec<u16> = page.index.to_vec();
    covered.sort_unstable();
    covered.dedup();
    assert_eq!(
        covered.len(),
        page.entries.len(),
        "every entry must be reachable through the index"
    );

    for pair in page.index.windows(2) {
        let a = page.entries[pair[0] as usize].name;
        let b = page.entries[pair[1] as usize].name;
        assert!(a <= b, "index out of alphabetical order: {a} before {b}");
    }

    for entry in page.entries {
        assert_eq!(
            entry.name,
            entry.name.to_ascii_uppercase(),
            "table names are canonical uppercase"
        );
        assert_eq!(
            entry.opcode & entry.flags.opcode_mask(),
            0,
            "variable bits of {} overlap its fixed opcode bits",
            entry.name
        );
    }

    // Indexed search must visit exactly the same same-named set a linear
    // scan finds, for every distinct mnemonic in the page.
    let mut names: Vec<&str> = page.entries.iter().map(|e| e.name).collect();
    names.sort_unstable();
    names.dedup();
    for name in names {
        let linear_count = page.entries.iter().filter(|e| e.name == name).count();
        let mut indexed_count = 0usize;
        let _ = indexed_search(
            page.entries,
            page.index,
            |entry| name.cmp(entry.name),
            |_| {
                indexed_count += 1;
                false
            },
        );
        assert_eq!(
            indexed_count, linear_count,
            "index misses an overload of {name}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    struct TestFlags {
        mask: u16,
    }

    impl EntryFlags for TestFlags {
        fn opcode_mask(&self) -> u16 {
            self.mask
        }
    }

    const fn fixed(opcode: u16, name: &'static str) -> Entry<TestFlags> {
        Entry::new(opcode, TestFlags { mask: 0 }, name)
    }

    static PAGE0: &[Entry<TestFlags>] = &[
        fixed(0x20, "BRA"),
        Entry::new(0x40, TestFlags { mask: 0x03 }, "LOD"),
        fixed(0x60, "ADD"),
        fixed(0x61, "ADD"),
    ];
    static PAGE0_INDEX: &[u16] = &[2, 3, 0, 1];

    static PAGE1: &[Entry<TestFlags>] = &[fixed(0x20, "LBRA")];
    static PAGE1_INDEX: &[u16] = &[0];

    static PAGES: &[EntryPage<TestFlags>] = &[
        EntryPage::new(0, PAGE0, PAGE0_INDEX),
        EntryPage::new(0x18, PAGE1, PAGE1_INDEX),
    ];

    static CPU: Cpu<TestFlags> = Cpu::new("test", PAGES);

    #[test]
    fn match_opcode_ignores_masked_bits() {
        let entry = &PAGE0[1];
        assert!(entry.match_opcode(0x40));
        assert!(entry.match_opcode(0x43));
        assert!(!entry.match_opcode(0x44));
    }

    #[test]
    fn search_name_is_case_insensitive() {
        let (entry, page) = CPU.search_name("bra", |_, _| true).unwrap();
        assert_eq!(entry.opcode(), 0x20);
        assert_eq!(page.prefix(), 0);
    }

    #[test]
    fn search_name_finds_prefixed_page() {
        let (entry, page) = CPU.search_name("LBRA", |_, _| true).unwrap();
        assert_eq!(entry.opcode(), 0x20);
        assert_eq!(page.prefix(), 0x18);
    }

    #[test]
    fn search_name_distinguishes_unknown_from_rejected() {
        let err = CPU.search_name("ADD", |_, _| false).map(|_| ()).unwrap_err();
        assert_eq!(err, ErrorKind::OperandNotAllowed);
        let err = CPU
            .search_name("XYZZY", |_, _| true)
            .map(|_| ())
            .unwrap_err();
        assert_eq!(err, ErrorKind::UnknownInstruction);
    }

    #[test]
    fn search_opcode_filters_by_prefix() {
        let (entry, _) = CPU
            .search_opcode(0x18, |entry, _| Ok(entry.match_opcode(0x20)))
            .unwrap();
        assert_eq!(entry.name(), "LBRA");

        let (entry, _) = CPU
            .search_opcode(0, |entry, _| Ok(entry.match_opcode(0x20)))
            .unwrap();
        assert_eq!(entry.name(), "BRA");
    }

    #[test]
    fn search_opcode_reports_unknown() {
        let err = CPU
            .search_opcode(0, |entry, _| Ok(entry.match_opcode(0xFF)))
            .map(|_| ())
            .unwrap_err();
        assert_eq!(err, ErrorKind::UnknownInstruction);
    }

    #[test]
    fn is_prefix_only_matches_prefixed_pages() {
        assert!(CPU.is_prefix(0x18));
        assert!(!CPU.is_prefix(0x20));
        assert!(!CPU.is_prefix(0));
    }

    #[test]
    fn test_pages_are_consistent() {
        for page in PAGES {
            assert_page_consistent(page);
        }
    }
}
