//! The alignment core: the generic affine-gap DP kernel and the codon-aware
//! aligner built on top of it.

pub mod codon;
pub mod dp;

pub use codon::{CodonAlignment, align_codon};
