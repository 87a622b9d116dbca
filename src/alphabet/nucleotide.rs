//! Nucleotides, including IUPAC ambiguity codes and the alignment gap symbol.

use std::fmt;

/// One of the 16 nucleotide symbols: the four concrete bases, the eleven
/// IUPAC ambiguity codes, and the alignment gap.
///
/// The internal representation is an index into [`Nucleotide::CHARS`], which
/// doubles as the index into [`WeightMatrix`](crate::alphabet::matrices::WeightMatrix)
/// rows/columns for the nucleotide alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nucleotide(u8);

impl Nucleotide {
    pub const A: Nucleotide = Nucleotide(0);
    pub const C: Nucleotide = Nucleotide(1);
    pub const G: Nucleotide = Nucleotide(2);
    pub const T: Nucleotide = Nucleotide(3);
    pub const M: Nucleotide = Nucleotide(4);
    pub const R: Nucleotide = Nucleotide(5);
    pub const W: Nucleotide = Nucleotide(6);
    pub const S: Nucleotide = Nucleotide(7);
    pub const Y: Nucleotide = Nucleotide(8);
    pub const K: Nucleotide = Nucleotide(9);
    pub const V: Nucleotide = Nucleotide(10);
    pub const H: Nucleotide = Nucleotide(11);
    pub const D: Nucleotide = Nucleotide(12);
    pub const B: Nucleotide = Nucleotide(13);
    pub const N: Nucleotide = Nucleotide(14);
    pub const GAP: Nucleotide = Nucleotide(15);

    /// Number of distinct nucleotide symbols, including the gap.
    pub const COUNT: usize = 16;

    const CHARS: [u8; 16] = *b"ACGTMRWSYKVHDBN-";

    /// Parses a single FASTA nucleotide character. `U` is accepted as a
    /// synonym for `T`, and matching is case-insensitive.
    ///
    /// ## Errors
    ///
    /// Returns `None` if `c` is not one of `{A,C,G,T,U,M,R,W,S,Y,K,V,H,D,B,N,-}`
    /// (case-insensitive).
    #[inline]
    #[must_use]
    pub fn from_char(c: char) -> Option<Nucleotide> {
        let rep = match c.to_ascii_uppercase() {
            'A' => 0,
            'C' => 1,
            'G' => 2,
            'T' | 'U' => 3,
            'M' => 4,
            'R' => 5,
            'W' => 6,
            'S' => 7,
            'Y' => 8,
            'K' => 9,
            'V' => 10,
            'H' => 11,
            'D' => 12,
            'B' => 13,
            'N' => 14,
            '-' => 15,
            _ => return None,
        };
        Some(Nucleotide(rep))
    }

    /// Constructs a [`Nucleotide`] directly from its table index.
    ///
    /// ## Panics
    ///
    /// Panics if `rep >= Nucleotide::COUNT`.
    #[inline]
    #[must_use]
    pub fn from_index(rep: usize) -> Nucleotide {
        assert!(rep < Self::COUNT, "invalid nucleotide index: {rep}");
        Nucleotide(rep as u8)
    }

    /// The index of this symbol, suitable for indexing into a weight matrix.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The uppercase FASTA character for this symbol.
    #[inline]
    #[must_use]
    pub fn to_char(self) -> char {
        Self::CHARS[self.0 as usize] as char
    }

    /// True for the eleven ambiguity codes and the gap symbol; false only for
    /// the four concrete bases.
    ///
    /// This mirrors the original library's definition, under which the gap is
    /// also considered "ambiguous" for the purpose of triplet translation: a
    /// triplet containing a lone gap alongside concrete bases cannot be
    /// translated unambiguously either, and falls back to [`AminoAcid::X`](crate::alphabet::amino_acid::AminoAcid::X).
    #[inline]
    #[must_use]
    pub fn is_ambiguous_or_gap(self) -> bool {
        self.0 > Self::T.0
    }

    /// The concrete bases (`{A,C,G,T}`) this symbol expands to. The gap
    /// expands to itself, and a concrete base expands to the singleton set
    /// containing itself.
    #[must_use]
    pub fn expand(self) -> Vec<Nucleotide> {
        match self {
            Nucleotide::A | Nucleotide::C | Nucleotide::G | Nucleotide::T | Nucleotide::GAP => vec![self],
            Nucleotide::M => vec![Nucleotide::A, Nucleotide::C],
            Nucleotide::R => vec![Nucleotide::A, Nucleotide::G],
            Nucleotide::W => vec![Nucleotide::A, Nucleotide::T],
            Nucleotide::S => vec![Nucleotide::C, Nucleotide::G],
            Nucleotide::Y => vec![Nucleotide::C, Nucleotide::T],
            Nucleotide::K => vec![Nucleotide::G, Nucleotide::T],
            Nucleotide::V => vec![Nucleotide::A, Nucleotide::C, Nucleotide::G],
            Nucleotide::H => vec![Nucleotide::A, Nucleotide::C, Nucleotide::T],
            Nucleotide::D => vec![Nucleotide::A, Nucleotide::G, Nucleotide::T],
            Nucleotide::B => vec![Nucleotide::C, Nucleotide::G, Nucleotide::T],
            Nucleotide::N => vec![Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T],
            _ => unreachable!("exhaustive over Nucleotide::COUNT variants"),
        }
    }

    /// The reverse complement of this symbol. `N` and the gap are their own
    /// reverse complement.
    #[must_use]
    pub fn reverse_complement(self) -> Nucleotide {
        match self {
            Nucleotide::A => Nucleotide::T,
            Nucleotide::C => Nucleotide::G,
            Nucleotide::G => Nucleotide::C,
            Nucleotide::T => Nucleotide::A,
            Nucleotide::GAP => Nucleotide::GAP,
            Nucleotide::M => Nucleotide::K,
            Nucleotide::R => Nucleotide::Y,
            Nucleotide::W => Nucleotide::W,
            Nucleotide::S => Nucleotide::S,
            Nucleotide::Y => Nucleotide::R,
            Nucleotide::K => Nucleotide::M,
            Nucleotide::V => Nucleotide::B,
            Nucleotide::H => Nucleotide::D,
            Nucleotide::D => Nucleotide::H,
            Nucleotide::B => Nucleotide::V,
            Nucleotide::N => Nucleotide::N,
            _ => unreachable!("exhaustive over Nucleotide::COUNT variants"),
        }
    }

    /// Replaces an ambiguity code with one of the concrete bases it
    /// represents, drawn uniformly at random from an explicit generator.
    /// Concrete bases and the gap are returned unchanged.
    #[must_use]
    pub fn sample_ambiguity<R: rand::Rng + ?Sized>(self, rng: &mut R) -> Nucleotide {
        if self == Nucleotide::GAP || !self.is_ambiguous_or_gap() {
            return self;
        }
        let options = self.expand();
        options[rng.random_range(0..options.len())]
    }

    /// The smallest IUPAC symbol whose expansion is exactly the union of the
    /// expansions of every member of `nucleotides`. The gap is dropped from
    /// the input before the computation; a singleton (post-drop) input
    /// returns its one element.
    ///
    /// Returns `None` if `nucleotides` contains only gaps, or is empty.
    #[must_use]
    pub fn single_nucleotide(nucleotides: &[Nucleotide]) -> Option<Nucleotide> {
        let mut without_gap: Vec<Nucleotide> = nucleotides.iter().copied().filter(|&n| n != Nucleotide::GAP).collect();
        without_gap.sort_unstable();
        without_gap.dedup();

        if without_gap.len() == 1 {
            return Some(without_gap[0]);
        }
        if without_gap.is_empty() {
            return None;
        }

        let mut union: Vec<Nucleotide> = without_gap.iter().flat_map(|n| n.expand()).collect();
        union.sort_unstable();
        union.dedup();

        let has = |n: Nucleotide| union.contains(&n);
        let (a, c, g, t) = (has(Nucleotide::A), has(Nucleotide::C), has(Nucleotide::G), has(Nucleotide::T));

        Some(match (a, c, g, t) {
            (true, true, true, true) => Nucleotide::N,
            (true, true, true, false) => Nucleotide::V,
            (true, true, false, true) => Nucleotide::H,
            (true, false, true, true) => Nucleotide::D,
            (false, true, true, true) => Nucleotide::B,
            (true, true, false, false) => Nucleotide::M,
            (false, false, true, true) => Nucleotide::K,
            (true, false, false, true) => Nucleotide::W,
            (false, true, true, false) => Nucleotide::S,
            (false, true, false, true) => Nucleotide::Y,
            (true, false, true, false) => Nucleotide::R,
            _ => return None,
        })
    }
}

impl fmt::Display for Nucleotide {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_complement_is_involution() {
        for rep in 0..Nucleotide::COUNT {
            let nt = Nucleotide::from_index(rep);
            assert_eq!(nt.reverse_complement().reverse_complement(), nt);
        }
    }

    #[test]
    fn ambiguity_classification() {
        for &nt in &[Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T] {
            assert!(!nt.is_ambiguous_or_gap());
        }
        assert!(Nucleotide::N.is_ambiguous_or_gap());
        assert!(Nucleotide::GAP.is_ambiguous_or_gap());
    }

    #[test]
    fn single_nucleotide_roundtrip() {
        let set = [Nucleotide::A, Nucleotide::G];
        assert_eq!(Nucleotide::single_nucleotide(&set), Some(Nucleotide::R));

        let singleton = [Nucleotide::GAP, Nucleotide::T];
        assert_eq!(Nucleotide::single_nucleotide(&singleton), Some(Nucleotide::T));

        let all_gap = [Nucleotide::GAP, Nucleotide::GAP];
        assert_eq!(Nucleotide::single_nucleotide(&all_gap), None);
    }

    #[test]
    fn from_char_accepts_u_as_t() {
        assert_eq!(Nucleotide::from_char('u'), Some(Nucleotide::T));
        assert_eq!(Nucleotide::from_char('x'), None);
    }

    #[test]
    fn sample_ambiguity_is_reproducible_from_a_seeded_generator() {
        use rand::SeedableRng;
        use rand_xoshiro::Xoshiro256StarStar;

        let mut rng_a = Xoshiro256StarStar::seed_from_u64(7);
        let mut rng_b = Xoshiro256StarStar::seed_from_u64(7);
        let drawn_a: Vec<Nucleotide> = (0..20).map(|_| Nucleotide::N.sample_ambiguity(&mut rng_a)).collect();
        let drawn_b: Vec<Nucleotide> = (0..20).map(|_| Nucleotide::N.sample_ambiguity(&mut rng_b)).collect();
        assert_eq!(drawn_a, drawn_b);
        assert!(drawn_a.iter().all(|n| Nucleotide::N.expand().contains(n)));
    }
}
