// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Short/long relative-branch form selection ("smart branch").
//!
//! The displacement depends on the instruction length, which depends on
//! the chosen form, so the decision is fixed once here and the caller
//! performs a single emit from the result. Never iterate across
//! instructions: each branch's form choice is local and final.

use log::debug;

use crate::core::error::ErrorKind;

/// How a single-pass assembler treats a forward reference whose target is
/// not yet known. The right answer varies per architecture and must be an
/// explicit, separately tested choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedPolicy {
    /// Treat the target as the current address (displacement 0), keeping
    /// the short form; range validation is deferred to a later pass.
    AssumeShort,
    /// Pessimistically emit the long form so the byte length never needs
    /// to shrink when the symbol resolves.
    ForceLong,
}

/// Byte-length bookkeeping for the two encodings of one branch.
#[derive(Debug, Clone, Copy)]
pub struct BranchSpec {
    /// Total instruction length of the short form, displacement included.
    pub short_len: u32,
    /// Total instruction length of the long form, displacement included.
    pub long_len: u32,
    /// Signed bit width of the short-form displacement field.
    pub short_bits: u8,
}

/// The committed form with its final displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchForm {
    Short(i32),
    Long(i32),
}

/// Decide the branch form for `target` from an instruction at `addr`.
///
/// With `smart` off the short form is mandatory and an out-of-range
/// target is an error; the caller still emits a zero-filled displacement
/// so the listing stays length-correct.
pub fn choose_form(
    spec: BranchSpec,
    addr: u32,
    target: u32,
    resolved: bool,
    smart: bool,
    policy: UnresolvedPolicy,
) -> Result<BranchForm, (BranchForm, ErrorKind)> {
    if !resolved {
        return match policy {
            UnresolvedPolicy::AssumeShort => Ok(BranchForm::Short(0)),
            UnresolvedPolicy::ForceLong => {
                Ok(BranchForm::Long(displacement(addr, spec.long_len, target)))
            }
        };
    }

    let short_disp = displacement(addr, spec.short_len, target);
    let half = 1i32 << (spec.short_bits - 1);
    if (-half..half).contains(&short_disp) {
        return Ok(BranchForm::Short(short_disp));
    }

    if smart {
        let long_disp = displacement(addr, spec.long_len, target);
        debug!(
            "smart branch: target {target:#06x} out of {}-bit range, promoting to long form",
            spec.short_bits
        );
        return Ok(BranchForm::Long(long_disp));
    }

    Err((BranchForm::Short(0), ErrorKind::OperandTooFar))
}

fn displacement(addr: u32, len: u32, target: u32) -> i32 {
    target.wrapping_sub(addr.wrapping_add(len)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const REL8: BranchSpec = BranchSpec {
        short_len: 2,
        long_len: 4,
        short_bits: 8,
    };

    #[test]
    fn in_range_commits_short_form() {
        let form = choose_form(REL8, 0x1000, 0x1081, true, true, UnresolvedPolicy::AssumeShort);
        assert_eq!(form, Ok(BranchForm::Short(127)));
        let form = choose_form(REL8, 0x1000, 0x0F82, true, true, UnresolvedPolicy::AssumeShort);
        assert_eq!(form, Ok(BranchForm::Short(-128)));
    }

    #[test]
    fn one_past_range_promotes_when_smart() {
        // 128 does not fit rel8; displacement is recomputed from the
        // long-form length.
        let form = choose_form(REL8, 0x1000, 0x1082, true, true, UnresolvedPolicy::AssumeShort);
        assert_eq!(form, Ok(BranchForm::Long(126)));
    }

    #[test]
    fn one_past_range_errors_without_smart() {
        let form = choose_form(
            REL8,
            0x1000,
            0x1082,
            true,
            false,
            UnresolvedPolicy::AssumeShort,
        );
        assert_eq!(form, Err((BranchForm::Short(0), ErrorKind::OperandTooFar)));
    }

    #[test]
    fn unresolved_policies_differ() {
        let form = choose_form(REL8, 0x1000, 0, false, true, UnresolvedPolicy::AssumeShort);
        assert_eq!(form, Ok(BranchForm::Short(0)));
        let form = choose_form(REL8, 0x1000, 0x1000, false, true, UnresolvedPolicy::ForceLong);
        assert_eq!(form, Ok(BranchForm::Long(-4)));
    }

    #[test]
    fn backward_branch_across_origin_wraps() {
        let form = choose_form(REL8, 0x0002, 0x0000, true, false, UnresolvedPolicy::AssumeShort);
        assert_eq!(form, Ok(BranchForm::Short(-4)));
    }
}
