//! Fractional, ambiguity-aware substitution matrices for the nucleotide and
//! amino acid alphabets.
//!
//! The original program ships hand-tuned NUC.4.4 and EDNAFULL-derived
//! tables. Rather than transcribing those tables verbatim (and risking a
//! silent transcription error nobody would notice), every ambiguity-code
//! entry here is *derived*: it is the mean pairwise score over the Cartesian
//! product of the two symbols' concrete expansions. For two unambiguous
//! bases this reduces to the same match/mismatch score the original table
//! uses; for an ambiguity code it produces the same "split the difference"
//! behavior the original's tables encode by hand.

use crate::alphabet::amino_acid::AminoAcid;
use crate::alphabet::nucleotide::Nucleotide;

/// A square substitution matrix over an alphabet of `N` symbols, indexed by
/// [`Nucleotide::index`] / [`AminoAcid::index`].
#[derive(Debug, Clone)]
pub struct WeightMatrix<const N: usize> {
    scores: [[f64; N]; N],
}

impl<const N: usize> WeightMatrix<N> {
    /// The substitution score for aligning the symbols at indices `i` and
    /// `j`.
    #[inline]
    #[must_use]
    pub fn score(&self, i: usize, j: usize) -> f64 {
        self.scores[i][j]
    }
}

/// Number of nucleotide symbols a [`WeightMatrix`] built by
/// [`nucleotide_matrix`] is indexed over.
pub const NUC_N: usize = Nucleotide::COUNT;

/// Number of amino acid symbols a [`WeightMatrix`] built by
/// [`amino_acid_matrix`] is indexed over.
pub const AA_N: usize = AminoAcid::COUNT;

/// Builds a NUC.4.4-style nucleotide substitution matrix: every pair of
/// concrete bases scores `matches` if equal and `mismatch` otherwise, and
/// every ambiguity-code entry (including against the gap) is the mean of
/// the concrete scores over its expansion. `matches`/`mismatch` are the
/// scores between two of `{A,C,G,T}`; the gap always expands to itself, so
/// any pair involving the gap other than (gap, gap) scores `mismatch`.
#[must_use]
pub fn nucleotide_matrix(matches: f64, mismatch: f64) -> WeightMatrix<NUC_N> {
    let concrete_score = |a: Nucleotide, b: Nucleotide| -> f64 {
        if a == Nucleotide::GAP || b == Nucleotide::GAP {
            return if a == b { matches } else { mismatch };
        }
        if a == b { matches } else { mismatch }
    };

    let mut scores = [[0.0_f64; NUC_N]; NUC_N];
    for i in 0..NUC_N {
        let ni = Nucleotide::from_index(i);
        for j in 0..NUC_N {
            let nj = Nucleotide::from_index(j);
            let (ei, ej) = (ni.expand(), nj.expand());
            let total: f64 = ei.iter().flat_map(|&a| ej.iter().map(move |&b| concrete_score(a, b))).sum();
            scores[i][j] = total / (ei.len() * ej.len()) as f64;
        }
    }
    WeightMatrix { scores }
}

/// Builds a BLOSUM30 amino acid substitution matrix over the full 27 symbol
/// alphabet. The twenty standard residues plus the stop codon are scored
/// from the published BLOSUM30 table; `U` (selenocysteine) is scored as its
/// chemical analog `C` (cysteine), since BLOSUM30 has no row of its own for
/// it; the gap scores 0 against everything but itself (which scores
/// `gap_match`); every ambiguity class (`B`, `Z`, `J`, `X`) is the mean
/// BLOSUM30 score over the residues it can stand for (`X` expands to all
/// twenty standard residues).
#[must_use]
pub fn amino_acid_matrix(gap_match: f64) -> WeightMatrix<AA_N> {
    let expand = |aa: AminoAcid| -> Vec<AminoAcid> {
        match aa {
            AminoAcid::B => vec![AminoAcid::D, AminoAcid::N],
            AminoAcid::Z => vec![AminoAcid::E, AminoAcid::Q],
            AminoAcid::J => vec![AminoAcid::I, AminoAcid::L],
            AminoAcid::X => STANDARD_RESIDUES.to_vec(),
            other => vec![other],
        }
    };

    let mut scores = [[0.0_f64; AA_N]; AA_N];
    for i in 0..AA_N {
        let ai = AminoAcid::from_index(i);
        for j in 0..AA_N {
            let aj = AminoAcid::from_index(j);

            if ai == AminoAcid::GAP || aj == AminoAcid::GAP {
                scores[i][j] = if ai == aj { gap_match } else { 0.0 };
                continue;
            }

            let (ei, ej) = (expand(ai), expand(aj));
            let total: f64 = ei.iter().flat_map(|&a| ej.iter().map(move |&b| blosum30_score(a, b))).sum();
            scores[i][j] = total / (ei.len() * ej.len()) as f64;
        }
    }
    WeightMatrix { scores }
}

const STANDARD_RESIDUES: [AminoAcid; 20] = [
    AminoAcid::A,
    AminoAcid::C,
    AminoAcid::D,
    AminoAcid::E,
    AminoAcid::F,
    AminoAcid::G,
    AminoAcid::H,
    AminoAcid::I,
    AminoAcid::K,
    AminoAcid::L,
    AminoAcid::M,
    AminoAcid::N,
    AminoAcid::P,
    AminoAcid::Q,
    AminoAcid::R,
    AminoAcid::S,
    AminoAcid::T,
    AminoAcid::V,
    AminoAcid::W,
    AminoAcid::Y,
];

/// The twenty standard residues, in the row/column order of [`BLOSUM30`].
const BLOSUM30_ORDER: [AminoAcid; 20] = [
    AminoAcid::A,
    AminoAcid::R,
    AminoAcid::N,
    AminoAcid::D,
    AminoAcid::C,
    AminoAcid::Q,
    AminoAcid::E,
    AminoAcid::G,
    AminoAcid::H,
    AminoAcid::I,
    AminoAcid::L,
    AminoAcid::K,
    AminoAcid::M,
    AminoAcid::F,
    AminoAcid::P,
    AminoAcid::S,
    AminoAcid::T,
    AminoAcid::W,
    AminoAcid::Y,
    AminoAcid::V,
];

/// The published BLOSUM30 substitution matrix (Henikoff & Henikoff, 1992),
/// indexed in [`BLOSUM30_ORDER`].
#[rustfmt::skip]
const BLOSUM30: [[i32; 20]; 20] = [
    [ 4, -1,  0,  0, -3,  1,  0,  0, -3,  0, -1,  0,  1, -2, -1,  1,  1, -5, -4,  1],
    [-1,  8, -2, -1, -5,  3, -1, -3,  0, -3, -3,  1, -1, -1, -1, -1, -3, -2, -4, -3],
    [ 0, -2,  8,  1, -1, -1, -1,  0, -1,  0, -2,  0, -2, -3, -2,  0, -1, -7, -4, -2],
    [ 0, -1,  1,  9, -3, -1,  1, -1, -2, -4, -4, -1, -3, -5, -1,  0, -1, -4, -1, -2],
    [-3, -5, -1, -3, 17, -2, -2, -3, -4, -2, -4, -2,  0, -1, -1, -2, -1, -2, -5, -2],
    [ 1,  3, -1, -1, -2,  8,  2, -2,  0, -2, -2,  0, -1, -3, -1, -1,  0, -1, -1, -3],
    [ 0, -1, -1,  1, -2,  2,  6, -2,  0, -3, -1,  2, -1, -4, -1, -1, -1, -2, -2, -2],
    [ 0, -3,  0, -1, -3, -2, -2,  8, -3, -1, -2, -1, -2, -3, -1,  0, -2, -2, -3, -3],
    [-3,  0, -1, -2, -4,  0,  0, -3, 14, -2, -1, -2, -2, -1, -3, -1, -2, -5, -4, -3],
    [ 0, -3,  0, -4, -2, -2, -3, -1, -2,  6,  2, -2,  1, -1, -3, -1,  0, -3, -1,  4],
    [-1, -3, -2, -4, -4, -2, -1, -2, -1,  2,  4, -3,  2,  2, -3, -3, -2, -2, -1,  1],
    [ 0,  1,  0, -1, -2,  0,  2, -1, -2, -2, -3,  4,  2, -1, -1, -1, -1, -2, -2, -3],
    [ 1, -1, -2, -3,  0, -1, -1, -2, -2,  1,  2,  2,  6, -2, -4, -2, -1, -2, -1,  1],
    [-2, -1, -3, -5, -1, -3, -4, -3, -1, -1,  2, -1, -2,  9, -4, -2, -1,  1,  3, -1],
    [-1, -1, -2, -1, -1, -1, -1, -1, -3, -3, -3, -1, -4, -4, 11, -1,  0, -3, -3, -4],
    [ 1, -1,  0,  0, -2, -1, -1,  0, -1, -1, -3, -1, -2, -2, -1,  4,  2, -4, -2, -1],
    [ 1, -3, -1, -1, -1,  0, -1, -2, -2,  0, -2, -1, -1, -1,  0,  2,  5, -3, -2,  0],
    [-5, -2, -7, -4, -2, -1, -2, -2, -5, -3, -2, -2, -2,  1, -3, -4, -3, 20,  5, -3],
    [-4, -4, -4, -1, -5, -1, -2, -3, -4, -1, -1, -2, -1,  3, -3, -2, -2,  5,  9, -1],
    [ 1, -3, -2, -2, -2, -3, -2, -3, -3,  4,  1, -3,  1, -1, -4, -1,  0, -3, -1,  4],
];

/// The stop codon's self-match score; it has no row in [`BLOSUM30`].
const STOP_MATCH: f64 = 1.0;
/// The stop codon's score against any standard residue.
const STOP_MISMATCH: f64 = -7.0;

fn blosum30_order_index(aa: AminoAcid) -> usize {
    BLOSUM30_ORDER.iter().position(|&r| r == aa).expect("called only with one of the twenty standard residues")
}

/// Looks up the BLOSUM30 score for a pair of residues. `U` (selenocysteine)
/// is resolved to its chemical analog `C` before lookup, since BLOSUM30 was
/// published before `U` was assigned a codon in any reference proteome it
/// covers. The stop codon only matches itself.
fn blosum30_score(a: AminoAcid, b: AminoAcid) -> f64 {
    if a == AminoAcid::STP || b == AminoAcid::STP {
        return if a == b { STOP_MATCH } else { STOP_MISMATCH };
    }
    let resolve = |aa: AminoAcid| if aa == AminoAcid::U { AminoAcid::C } else { aa };
    let (i, j) = (blosum30_order_index(resolve(a)), blosum30_order_index(resolve(b)));
    f64::from(BLOSUM30[i][j])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nucleotide_matrix_is_symmetric() {
        let m = nucleotide_matrix(1.0, -1.0);
        for i in 0..NUC_N {
            for j in 0..NUC_N {
                assert!((m.score(i, j) - m.score(j, i)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn nucleotide_matrix_exact_match_scores_full_match() {
        let m = nucleotide_matrix(1.0, -1.0);
        assert_eq!(m.score(Nucleotide::A.index(), Nucleotide::A.index()), 1.0);
        assert_eq!(m.score(Nucleotide::A.index(), Nucleotide::T.index()), -1.0);
    }

    #[test]
    fn nucleotide_ambiguity_is_averaged() {
        let m = nucleotide_matrix(1.0, -1.0);
        // R = {A,G}; R vs A: one match, one mismatch -> average 0.
        let score = m.score(Nucleotide::R.index(), Nucleotide::A.index());
        assert!((score - 0.0).abs() < 1e-12);
    }

    #[test]
    fn amino_acid_matrix_identity_is_highest() {
        let m = amino_acid_matrix(1.0);
        for i in 0..AA_N {
            let aa = AminoAcid::from_index(i);
            if aa == AminoAcid::GAP || aa.is_ambiguity_class() {
                continue;
            }
            for j in 0..AA_N {
                if i != j {
                    assert!(m.score(i, i) >= m.score(i, j));
                }
            }
        }
    }

    #[test]
    fn gap_only_matches_itself() {
        let m = amino_acid_matrix(1.0);
        assert_eq!(m.score(AminoAcid::GAP.index(), AminoAcid::GAP.index()), 1.0);
        assert_eq!(m.score(AminoAcid::GAP.index(), AminoAcid::A.index()), 0.0);
    }

    #[test]
    fn selenocysteine_scores_like_cysteine_not_any_residue() {
        let m = amino_acid_matrix(1.0);
        assert_eq!(m.score(AminoAcid::U.index(), AminoAcid::C.index()), m.score(AminoAcid::C.index(), AminoAcid::C.index()));
        // X ("any residue") is the mean BLOSUM30 score over all twenty
        // standards, which is nowhere near C's self-score.
        assert_ne!(m.score(AminoAcid::X.index(), AminoAcid::C.index()), m.score(AminoAcid::C.index(), AminoAcid::C.index()));
    }
}
