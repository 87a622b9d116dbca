//! The standard genetic code: codon-to-amino-acid translation, including the
//! ambiguity-aware reduction used when a codon contains IUPAC ambiguity
//! codes.

use crate::alphabet::amino_acid::AminoAcid;
use crate::alphabet::nucleotide::Nucleotide;

/// Translates one concrete codon (no ambiguity codes) to its amino acid.
///
/// A codon made up entirely of gaps translates to [`AminoAcid::GAP`]. A
/// codon containing any ambiguity code or a gap alongside concrete bases
/// translates to [`AminoAcid::X`]; callers that need the ambiguity-aware
/// reduction (`B`/`Z`/`J`) should use [`translate_ambiguous`] instead.
#[must_use]
pub fn translate(n0: Nucleotide, n1: Nucleotide, n2: Nucleotide) -> AminoAcid {
    if n0 == Nucleotide::GAP && n1 == Nucleotide::GAP && n2 == Nucleotide::GAP {
        return AminoAcid::GAP;
    }
    if n0.is_ambiguous_or_gap() || n1.is_ambiguous_or_gap() || n2.is_ambiguous_or_gap() {
        return AminoAcid::X;
    }
    translate_concrete(n0, n1, n2)
}

/// Every distinct amino acid a (possibly ambiguous) codon can translate to:
/// expands every ambiguity code to its concrete bases, translates each
/// resulting concrete codon, and returns the sorted, deduplicated set. An
/// all-gap codon returns the singleton `[GAP]`.
#[must_use]
pub fn translate_all(n0: Nucleotide, n1: Nucleotide, n2: Nucleotide) -> Vec<AminoAcid> {
    if n0 == Nucleotide::GAP && n1 == Nucleotide::GAP && n2 == Nucleotide::GAP {
        return vec![AminoAcid::GAP];
    }

    let mut distinct: Vec<AminoAcid> = Vec::new();
    for a in n0.expand() {
        for b in n1.expand() {
            for c in n2.expand() {
                let aa = translate_concrete(a, b, c);
                if !distinct.contains(&aa) {
                    distinct.push(aa);
                }
            }
        }
    }
    distinct.sort_unstable();
    distinct
}

/// Translates a (possibly ambiguous) codon, reducing the set obtained from
/// [`translate_all`] to a single symbol:
///
/// - a single distinct amino acid translates to itself;
/// - exactly `{D, N}` reduces to [`AminoAcid::B`];
/// - exactly `{E, Q}` reduces to [`AminoAcid::Z`];
/// - exactly `{L, I}` reduces to [`AminoAcid::J`];
/// - any other set of two or more distinct amino acids reduces to
///   [`AminoAcid::X`].
#[must_use]
pub fn translate_ambiguous(n0: Nucleotide, n1: Nucleotide, n2: Nucleotide) -> AminoAcid {
    match translate_all(n0, n1, n2).as_slice() {
        [one] => *one,
        [AminoAcid::D, AminoAcid::N] => AminoAcid::B,
        [AminoAcid::E, AminoAcid::Q] => AminoAcid::Z,
        [AminoAcid::I, AminoAcid::L] => AminoAcid::J,
        _ => AminoAcid::X,
    }
}

/// Every concrete codon that translates to the given amino acid under the
/// standard genetic code. Returns an empty vector for [`AminoAcid::GAP`] and
/// the ambiguity classes (`B`, `Z`, `J`, `U`, `X`), none of which are
/// produced by [`translate`] on a concrete codon.
#[must_use]
pub fn codons_for(aa: AminoAcid) -> Vec<(Nucleotide, Nucleotide, Nucleotide)> {
    let bases = [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T];
    let mut out = Vec::new();
    for &a in &bases {
        for &b in &bases {
            for &c in &bases {
                if translate_concrete(a, b, c) == aa {
                    out.push((a, b, c));
                }
            }
        }
    }
    out
}

/// Looks up a single concrete (non-ambiguous, non-gap) codon in the standard
/// genetic code table.
///
/// ## Panics
///
/// Panics if any of `n0`, `n1`, `n2` is an ambiguity code or the gap; callers
/// must resolve ambiguity before calling this.
fn translate_concrete(n0: Nucleotide, n1: Nucleotide, n2: Nucleotide) -> AminoAcid {
    use AminoAcid as AA;
    match (n0.index(), n1.index(), n2.index()) {
        (3, 3, 3) => AA::F,
        (3, 3, 1) => AA::F,
        (3, 3, 0) => AA::L,
        (3, 3, 2) => AA::L,
        (1, 3, 3) => AA::L,
        (1, 3, 1) => AA::L,
        (1, 3, 0) => AA::L,
        (1, 3, 2) => AA::L,
        (0, 3, 3) => AA::I,
        (0, 3, 1) => AA::I,
        (0, 3, 0) => AA::I,
        (0, 3, 2) => AA::M,
        (2, 3, 3) => AA::V,
        (2, 3, 1) => AA::V,
        (2, 3, 0) => AA::V,
        (2, 3, 2) => AA::V,

        (3, 1, 3) => AA::S,
        (3, 1, 1) => AA::S,
        (3, 1, 0) => AA::S,
        (3, 1, 2) => AA::S,
        (1, 1, 3) => AA::P,
        (1, 1, 1) => AA::P,
        (1, 1, 0) => AA::P,
        (1, 1, 2) => AA::P,
        (0, 1, 3) => AA::T,
        (0, 1, 1) => AA::T,
        (0, 1, 0) => AA::T,
        (0, 1, 2) => AA::T,
        (2, 1, 3) => AA::A,
        (2, 1, 1) => AA::A,
        (2, 1, 0) => AA::A,
        (2, 1, 2) => AA::A,

        (3, 0, 3) => AA::Y,
        (3, 0, 1) => AA::Y,
        (3, 0, 0) => AA::STP,
        (3, 0, 2) => AA::STP,
        (1, 0, 3) => AA::H,
        (1, 0, 1) => AA::H,
        (1, 0, 0) => AA::Q,
        (1, 0, 2) => AA::Q,
        (0, 0, 3) => AA::N,
        (0, 0, 1) => AA::N,
        (0, 0, 0) => AA::K,
        (0, 0, 2) => AA::K,
        (2, 0, 3) => AA::D,
        (2, 0, 1) => AA::D,
        (2, 0, 0) => AA::E,
        (2, 0, 2) => AA::E,

        (3, 2, 3) => AA::C,
        (3, 2, 1) => AA::C,
        (3, 2, 0) => AA::STP,
        (3, 2, 2) => AA::W,
        (1, 2, 3) => AA::R,
        (1, 2, 1) => AA::R,
        (1, 2, 0) => AA::R,
        (1, 2, 2) => AA::R,
        (0, 2, 3) => AA::S,
        (0, 2, 1) => AA::S,
        (0, 2, 0) => AA::R,
        (0, 2, 2) => AA::R,
        (2, 2, 3) => AA::G,
        (2, 2, 1) => AA::G,
        (2, 2, 0) => AA::G,
        (2, 2, 2) => AA::G,

        _ => unreachable!("translate_concrete called with an ambiguous or gap nucleotide"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_stop_codons() {
        assert_eq!(translate(Nucleotide::A, Nucleotide::T, Nucleotide::G), AminoAcid::M);
        assert_eq!(translate(Nucleotide::T, Nucleotide::A, Nucleotide::A), AminoAcid::STP);
        assert_eq!(translate(Nucleotide::T, Nucleotide::G, Nucleotide::A), AminoAcid::STP);
    }

    #[test]
    fn all_gap_codon_is_gap() {
        assert_eq!(translate(Nucleotide::GAP, Nucleotide::GAP, Nucleotide::GAP), AminoAcid::GAP);
    }

    #[test]
    fn mixed_gap_is_x() {
        assert_eq!(translate(Nucleotide::A, Nucleotide::GAP, Nucleotide::G), AminoAcid::X);
    }

    #[test]
    fn ambiguous_reduction_to_asx_and_glx() {
        // GAY = GAC (D) / GAT (D) -> D, not ambiguous.
        assert_eq!(translate_ambiguous(Nucleotide::G, Nucleotide::A, Nucleotide::Y), AminoAcid::D);
        // RAY = AAY|GAY = {N, D} -> B.
        assert_eq!(translate_ambiguous(Nucleotide::R, Nucleotide::A, Nucleotide::Y), AminoAcid::B);
        // SAR = GAR|CAR = {E/D? } check CAR = CAA/CAG = Q; GAR = GAA/GAG = E -> {Q,E} -> Z.
        assert_eq!(translate_ambiguous(Nucleotide::S, Nucleotide::A, Nucleotide::R), AminoAcid::Z);
    }

    #[test]
    fn codons_for_roundtrips_through_translate() {
        for rep in 0..AminoAcid::COUNT {
            let aa = AminoAcid::from_index(rep);
            for (a, b, c) in codons_for(aa) {
                assert_eq!(translate(a, b, c), aa);
            }
        }
    }
}
