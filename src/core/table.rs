// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Generic search primitives over instruction-table slices.
//!
//! Two query directions share the same table data: opcode lookup scans in
//! table order with a matcher predicate (masked compares preclude binary
//! search), while name lookup binary-searches a parallel alphabetical
//! index and then walks the run of same-named entries with a
//! disambiguation predicate.

use std::cmp::Ordering;

use crate::core::error::ErrorKind;

/// Outcome of an indexed name search.
///
/// `NameOnly` is what lets the caller distinguish "mnemonic exists but no
/// table row accepts these operands" from "no such mnemonic".
#[derive(Debug, PartialEq, Eq)]
pub enum NameLookup<'a, E> {
    Found(&'a E),
    NameOnly,
    NotFound,
}

/// Scan `entries` in table order and return the first entry the matcher
/// accepts. The matcher is fallible: reading a post-byte from a truncated
/// stream must surface as an error, not as "no match, try the next entry".
pub fn linear_search<'a, E>(
    entries: &'a [E],
    mut matcher: impl FnMut(&E) -> Result<bool, ErrorKind>,
) -> Result<Option<&'a E>, ErrorKind> {
    for entry in entries {
        if matcher(entry)? {
            return Ok(Some(entry));
        }
    }
    Ok(None)
}

/// Binary-search the alphabetical `index` for the first entry comparing
/// equal, then scan forward while the comparator stays equal, applying
/// `accept` to pick the right overload among same-named entries.
///
/// `compare` is three-way against the queried name: `Less` means the query
/// sorts before the entry.
pub fn indexed_search<'a, E>(
    entries: &'a [E],
    index: &[u16],
    compare: impl Fn(&E) -> Ordering,
    mut accept: impl FnMut(&E) -> bool,
) -> NameLookup<'a, E> {
    // Partition point: first index position whose entry does not sort
    // before the query.
    let mut lo = 0usize;
    let mut hi = index.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let entry = &entries[index[mid] as usize];
        if compare(entry) == Ordering::Greater {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    let mut name_seen = false;
    for pos in &index[lo..] {
        let entry = &entries[*pos as usize];
        if compare(entry) != Ordering::Equal {
            break;
        }
        name_seen = true;
        if accept(entry) {
            return NameLookup::Found(entry);
        }
    }

    if name_seen {
        NameLookup::NameOnly
    } else {
        NameLookup::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        name: &'static str,
        tag: u8,
    }

    const ROWS: &[Row] = &[
        Row { name: "SUB", tag: 0 },
        Row { name: "ADD", tag: 1 },
        Row { name: "ADD", tag: 2 },
        Row { name: "MOV", tag: 3 },
        Row { name: "ADD", tag: 4 },
    ];

    // Alphabetical order of ROWS by name, ties in table order.
    const INDEX: &[u16] = &[1, 2, 4, 3, 0];

    fn compare_to(query: &str) -> impl Fn(&Row) -> Ordering + '_ {
        move |row| query.cmp(row.name)
    }

    #[test]
    fn indexed_search_picks_accepted_overload() {
        let result = indexed_search(ROWS, INDEX, compare_to("ADD"), |row| row.tag == 4);
        match result {
            NameLookup::Found(row) => assert_eq!(row.tag, 4),
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn indexed_search_visits_overloads_in_table_order() {
        let mut seen = Vec::new();
        let _ = indexed_search(ROWS, INDEX, compare_to("ADD"), |row| {
            seen.push(row.tag);
            false
        });
        assert_eq!(seen, vec![1, 2, 4]);
    }

    #[test]
    fn indexed_search_reports_name_only() {
        let result = indexed_search(ROWS, INDEX, compare_to("MOV"), |_| false);
        assert_eq!(result, NameLookup::NameOnly);
    }

    #[test]
    fn indexed_search_reports_not_found() {
        let result = indexed_search(ROWS, INDEX, compare_to("XOR"), |_| true);
        assert_eq!(result, NameLookup::NotFound);
        let result = indexed_search(ROWS, INDEX, compare_to("AAA"), |_| true);
        assert_eq!(result, NameLookup::NotFound);
    }

    #[test]
    fn indexed_search_empty_index() {
        let result = indexed_search(ROWS, &[], compare_to("ADD"), |_| true);
        assert_eq!(result, NameLookup::NotFound);
    }

    #[test]
    fn linear_search_first_match_wins() {
        let found = linear_search(ROWS, |row| Ok(row.name == "ADD"))
            .unwrap()
            .unwrap();
        assert_eq!(found.tag, 1);
    }

    #[test]
    fn linear_search_propagates_matcher_error() {
        let result = linear_search(ROWS, |row| {
            if row.tag == 3 {
                Err(ErrorKind::NoMemory)
            } else {
                Ok(false)
            }
        });
        assert_eq!(result, Err(ErrorKind::NoMemory));
    }

    #[test]
    fn linear_search_no_match() {
        assert_eq!(linear_search(ROWS, |_| Ok(false)), Ok(None));
    }
}
