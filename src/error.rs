//! Hand-rolled error types for parsing and alignment failures.
//!
//! Mirrors the teacher's own error style: plain enums implementing
//! [`std::fmt::Display`] and [`std::error::Error`], no external error crate.

use std::fmt;

use crate::sequence::nt::NTSequence;

/// A malformed FASTA or ORF XML record.
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    /// True if the parser was able to skip to the next record and continue;
    /// false if the whole input must be rejected.
    pub recovered: bool,
}

impl ParseError {
    #[must_use]
    pub fn new(message: impl Into<String>, recovered: bool) -> ParseError {
        ParseError { message: message.into(), recovered }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Failure of [`crate::align::codon::align_codon`].
///
/// `FrameShiftError` in the original design is a subtype of `AlignmentError`;
/// here it is just another variant carrying the same attached diagnostics.
#[derive(Debug)]
pub enum AlignError {
    /// The nucleotide alignment score fell below the acceptance floor before
    /// any codon projection was attempted. `codon_score` is always 0.0 here,
    /// since codon projection never ran; `aligned_ref`/`aligned_target` are
    /// the plain (pre-codon-projection) nucleotide alignment.
    BelowScoreFloor {
        nt_score: f64,
        codon_score: f64,
        aligned_ref: NTSequence,
        aligned_target: NTSequence,
    },
    /// A frameshift was detected but could not be repaired within the
    /// allotted retries, or no isolated repairable gap run could be found.
    /// `aligned_ref`/`aligned_target` are the plain (pre-codon-projection)
    /// nucleotide alignment, not the failed codon projection.
    Unfixable {
        nt_score: f64,
        codon_score: f64,
        aligned_ref: NTSequence,
        aligned_target: NTSequence,
    },
}

impl fmt::Display for AlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignError::BelowScoreFloor { nt_score, .. } => {
                write!(f, "nucleotide alignment score {nt_score} is below the acceptance floor")
            }
            AlignError::Unfixable { nt_score, codon_score, .. } => {
                write!(f, "unrepairable frameshift: nt_score={nt_score}, codon_score={codon_score}")
            }
        }
    }
}

impl std::error::Error for AlignError {}
