// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error taxonomy and accumulation shared by every architecture module.
//!
//! Errors are values, never panics. Encoding and decoding keep going after
//! an error wherever physically possible (zero-filling unresolved fields)
//! so that listings stay byte-aligned; the first error recorded for an
//! instruction wins and later, less specific errors do not overwrite it.

use thiserror::Error;

/// Byte range within one source line, used to point diagnostics at the
/// exact operand that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

/// Flat error taxonomy for table lookup, operand range checks, syntax,
/// and resource exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("unknown instruction")]
    UnknownInstruction,
    #[error("operand not allowed")]
    OperandNotAllowed,
    #[error("unknown register")]
    UnknownRegister,
    #[error("illegal register")]
    IllegalRegister,
    #[error("overflow range")]
    OverflowRange,
    #[error("operand too far")]
    OperandTooFar,
    #[error("operand not aligned")]
    OperandNotAligned,
    #[error("illegal bit number")]
    IllegalBitNumber,
    #[error("not bit addressable")]
    NotBitAddressable,
    #[error("garbage at end of line")]
    GarbageAtEnd,
    #[error("missing closing parenthesis")]
    MissingClosingParen,
    #[error("undefined symbol")]
    UndefinedSymbol,
    #[error("no memory")]
    NoMemory,
    #[error("unknown cpu")]
    UnknownCpu,
    #[error("unknown option")]
    UnknownOption,
    #[error("internal error")]
    InternalError,
}

/// One recorded error with the source span it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorAt {
    pub kind: ErrorKind,
    pub span: Span,
}

impl ErrorAt {
    pub const fn new(kind: ErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl std::fmt::Display for ErrorAt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at column {}", self.kind, self.span.start + 1)
    }
}

/// First-error-wins accumulator.
///
/// Operand parsers carry their own `Reporter` so a garbled operand keeps a
/// precise span independent of the instruction-level error; the
/// instruction merges them with [`Reporter::set_error_if`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    error: Option<ErrorAt>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless one is already present.
    pub fn set_error_if(&mut self, kind: ErrorKind, span: Span) {
        if self.error.is_none() {
            self.error = Some(ErrorAt::new(kind, span));
        }
    }

    /// Merge another reporter's error, keeping ours if both are set.
    pub fn merge(&mut self, other: &Reporter) {
        if let Some(err) = other.error {
            self.set_error_if(err.kind, err.span);
        }
    }

    pub fn error(&self) -> Option<ErrorAt> {
        self.error
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
