// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Symbol-table boundary.
//!
//! The expression/symbol machinery lives outside this crate's core; the
//! encoders only need a lookup. Callers own mutation and any concurrent
//! access discipline.

use std::collections::HashMap;

/// Read-only symbol lookup used while encoding operands.
pub trait SymbolTable {
    fn lookup(&self, name: &str) -> Option<i64>;
}

impl SymbolTable for HashMap<String, i64> {
    fn lookup(&self, name: &str) -> Option<i64> {
        self.get(name).copied()
    }
}

impl<T: SymbolTable + ?Sized> SymbolTable for &T {
    fn lookup(&self, name: &str) -> Option<i64> {
        (**self).lookup(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashmap_lookup() {
        let mut table = HashMap::new();
        table.insert("START".to_string(), 0x1000i64);
        assert_eq!(table.lookup("START"), Some(0x1000));
        assert_eq!(table.lookup("MISSING"), None);
    }
}
