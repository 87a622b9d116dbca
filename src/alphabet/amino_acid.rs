//! Amino acids, including the translation ambiguity classes and the stop and
//! gap symbols.

use std::fmt;

/// One of the 27 amino acid symbols produced by translation: the twenty
/// standard residues, the 21st residue `U` (selenocysteine), the stop codon,
/// the gap, and four ambiguity classes (`B`, `Z`, `J`, `X`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AminoAcid(u8);

impl AminoAcid {
    pub const A: AminoAcid = AminoAcid(0);
    pub const C: AminoAcid = AminoAcid(1);
    pub const D: AminoAcid = AminoAcid(2);
    pub const E: AminoAcid = AminoAcid(3);
    pub const F: AminoAcid = AminoAcid(4);
    pub const G: AminoAcid = AminoAcid(5);
    pub const H: AminoAcid = AminoAcid(6);
    pub const I: AminoAcid = AminoAcid(7);
    pub const K: AminoAcid = AminoAcid(8);
    pub const L: AminoAcid = AminoAcid(9);
    pub const M: AminoAcid = AminoAcid(10);
    pub const N: AminoAcid = AminoAcid(11);
    pub const P: AminoAcid = AminoAcid(12);
    pub const Q: AminoAcid = AminoAcid(13);
    pub const R: AminoAcid = AminoAcid(14);
    pub const S: AminoAcid = AminoAcid(15);
    pub const T: AminoAcid = AminoAcid(16);
    pub const V: AminoAcid = AminoAcid(17);
    pub const W: AminoAcid = AminoAcid(18);
    pub const Y: AminoAcid = AminoAcid(19);
    pub const STP: AminoAcid = AminoAcid(20);
    pub const GAP: AminoAcid = AminoAcid(21);
    pub const Z: AminoAcid = AminoAcid(22);
    pub const U: AminoAcid = AminoAcid(23);
    pub const B: AminoAcid = AminoAcid(24);
    pub const X: AminoAcid = AminoAcid(25);
    pub const J: AminoAcid = AminoAcid(26);

    /// Number of distinct amino acid symbols, including stop, gap, and the
    /// ambiguity classes.
    pub const COUNT: usize = 27;

    const CHARS: [u8; 27] = *b"ACDEFGHIKLMNPQRSTVWY*-ZUBXJ";

    /// Parses a single amino acid character, case-insensitively. `*` is the
    /// stop codon and `-` is the gap.
    #[inline]
    #[must_use]
    pub fn from_char(c: char) -> Option<AminoAcid> {
        let upper = c.to_ascii_uppercase();
        Self::CHARS.iter().position(|&ch| ch == upper as u8).map(|i| AminoAcid(i as u8))
    }

    /// Constructs an [`AminoAcid`] directly from its table index.
    ///
    /// ## Panics
    ///
    /// Panics if `rep >= AminoAcid::COUNT`.
    #[inline]
    #[must_use]
    pub fn from_index(rep: usize) -> AminoAcid {
        assert!(rep < Self::COUNT, "invalid amino acid index: {rep}");
        AminoAcid(rep as u8)
    }

    /// The index of this symbol, suitable for indexing into a weight matrix.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The uppercase one-letter character for this symbol (`*` for stop, `-`
    /// for gap).
    #[inline]
    #[must_use]
    pub fn to_char(self) -> char {
        Self::CHARS[self.0 as usize] as char
    }

    /// True for the four ambiguity classes (`B`, `Z`, `J`, `X`); false for
    /// the twenty standard residues, `U`, the stop codon, and the gap.
    #[inline]
    #[must_use]
    pub fn is_ambiguity_class(self) -> bool {
        matches!(self, AminoAcid::B | AminoAcid::Z | AminoAcid::J | AminoAcid::X)
    }
}

impl fmt::Display for AminoAcid {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_roundtrip_for_all_symbols() {
        for rep in 0..AminoAcid::COUNT {
            let aa = AminoAcid::from_index(rep);
            assert_eq!(AminoAcid::from_char(aa.to_char()), Some(aa));
        }
    }

    #[test]
    fn stop_and_gap_chars() {
        assert_eq!(AminoAcid::from_char('*'), Some(AminoAcid::STP));
        assert_eq!(AminoAcid::from_char('-'), Some(AminoAcid::GAP));
    }

    #[test]
    fn ambiguity_classes() {
        assert!(AminoAcid::X.is_ambiguity_class());
        assert!(AminoAcid::B.is_ambiguity_class());
        assert!(!AminoAcid::A.is_ambiguity_class());
        assert!(!AminoAcid::STP.is_ambiguity_class());
        assert!(!AminoAcid::U.is_ambiguity_class(), "U is the 21st concrete residue, not an ambiguity class");
    }
}
