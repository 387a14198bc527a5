// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Numeric-literal parsing, operand field range checks, and hex rendering.
//!
//! The literal grammar covers the notations the supported architectures'
//! vendor assemblers used: `$2A`/`>2A`/`0x2A`/`2AH`/`H'2A'` hex,
//! `%1010`/`0b`/`B'1010'` binary, `52O`/`52Q` octal, plain or
//! `D`-suffixed decimal.
//! Underscores are visual separators and are ignored.

/// Parse a number literal. Returns `None` for anything that is not a
/// well-formed literal (callers then treat the token as a symbol).
pub fn parse_number(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (is_neg, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let text: String = text.chars().filter(|&c| c != '_').collect();
    let text = text.as_str();

    // Prefix notations first so suffix heuristics (trailing 'B' for
    // binary, 'H' for hex) never misread a prefixed literal like $BB.
    let val = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(hex) = text.strip_prefix('$') {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(hex) = text.strip_prefix('>') {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(hex) = quoted_payload(text, 'H') {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(bin) = quoted_payload(text, 'B') {
        i64::from_str_radix(bin, 2).ok()?
    } else if let Some(bin) = text.strip_prefix('%') {
        i64::from_str_radix(bin, 2).ok()?
    } else if let Some(bin) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        // Only a pure-binary payload counts as 0b notation; 0B8H must
        // fall through to the hex-suffix path below.
        if !bin.is_empty() && bin.bytes().all(|b| b == b'0' || b == b'1') {
            i64::from_str_radix(bin, 2).ok()?
        } else if text.ends_with('h') || text.ends_with('H') {
            i64::from_str_radix(&text[..text.len() - 1], 16).ok()?
        } else {
            return None;
        }
    } else if let Some(oct) = text.strip_prefix("0o").or_else(|| text.strip_prefix("0O")) {
        i64::from_str_radix(oct, 8).ok()?
    } else if text.ends_with('h') || text.ends_with('H') {
        i64::from_str_radix(&text[..text.len() - 1], 16).ok()?
    } else if text.ends_with('b') || text.ends_with('B') {
        let inner = &text[..text.len() - 1];
        if inner.bytes().all(|b| b == b'0' || b == b'1') {
            i64::from_str_radix(inner, 2).ok()?
        } else {
            return None;
        }
    } else if text.ends_with('o') || text.ends_with('O') || text.ends_with('q') || text.ends_with('Q')
    {
        i64::from_str_radix(&text[..text.len() - 1], 8).ok()?
    } else if text.ends_with('d') || text.ends_with('D') {
        text[..text.len() - 1].parse::<i64>().ok()?
    } else {
        text.parse::<i64>().ok()?
    };

    Some(if is_neg { -val } else { val })
}

/// Payload of a quoted literal such as `H'19AB'` or `B'0101'`.
fn quoted_payload(text: &str, letter: char) -> Option<&str> {
    let rest = text
        .strip_prefix(letter)
        .or_else(|| text.strip_prefix(letter.to_ascii_lowercase()))?;
    rest.strip_prefix('\'')?.strip_suffix('\'')
}

/// True when the value does not fit an 8-bit field (-128..=255).
pub fn overflow_u8(value: i64) -> bool {
    !(-128..=0xFF).contains(&value)
}

/// True when the value does not fit a 16-bit field (-32768..=65535).
pub fn overflow_u16(value: i64) -> bool {
    !(-32768..=0xFFFF).contains(&value)
}

/// True when the value does not fit an unsigned field of `bits` width.
pub fn overflow_bits(value: i64, bits: u8) -> bool {
    debug_assert!(bits > 0 && bits < 64);
    value < 0 || value >= 1 << bits
}

/// True when the value does not fit a signed field of `bits` width.
pub fn overflow_sbits(value: i64, bits: u8) -> bool {
    debug_assert!(bits > 1 && bits < 64);
    let half = 1i64 << (bits - 1);
    !(-half..half).contains(&value)
}

/// Fixed-width hex rendering, without any architecture-specific prefix.
pub fn to_hex(value: u32, digits: usize, uppercase: bool) -> String {
    if uppercase {
        format!("{value:0digits$X}")
    } else {
        format!("{value:0digits$x}")
    }
}
