//! The parallel batch driver: maps "align one target" across the target
//! list, yielding results in input order regardless of completion order.

use rayon::prelude::*;

use crate::align::codon::{self, align_codon};
use crate::alphabet::matrices::{AA_N, NUC_N, WeightMatrix};
use crate::error::AlignError;
use crate::reference::Reference;
use crate::result::AlignmentResult;
use crate::sequence::nt::NTSequence;

/// Alignment parameters shared by every task in a batch.
pub struct BatchConfig {
    pub gap_open: f64,
    pub gap_ext: f64,
    pub max_frame_shifts: u32,
    pub progress: bool,
}

/// Aligns every target against `reference`, one task per target, using
/// whatever global rayon thread pool is active. `rayon`'s indexed
/// `map`/`collect` preserves the input order of `targets` in the returned
/// vector regardless of which task finishes first.
#[must_use]
pub fn align_batch(
    reference: &Reference, targets: Vec<NTSequence>, config: &BatchConfig, nuc_matrix: &WeightMatrix<NUC_N>, aa_matrix: &WeightMatrix<AA_N>,
) -> Vec<AlignmentResult> {
    let total = targets.len();
    targets
        .into_par_iter()
        .enumerate()
        .map(|(index, target)| {
            let result = align_one(reference, target, config, nuc_matrix, aa_matrix);
            if config.progress {
                eprintln!("aligned {} ({}/{total})", result.name, index + 1);
            }
            result
        })
        .collect()
}

fn align_one(reference: &Reference, target: NTSequence, config: &BatchConfig, nuc_matrix: &WeightMatrix<NUC_N>, aa_matrix: &WeightMatrix<AA_N>) -> AlignmentResult {
    let name = target.name.clone();

    if target.ungapped_len() <= codon::MIN_TARGET_LEN - 1 {
        return AlignmentResult::too_short(name);
    }

    match align_codon(&reference.sequence, target, config.max_frame_shifts, config.gap_open, config.gap_ext, nuc_matrix, aa_matrix) {
        Ok(aligned) => AlignmentResult::success(name, aligned.aligned_ref, aligned.aligned_target, aligned.score, aligned.corrected_frameshifts, &reference.regions),
        Err(AlignError::BelowScoreFloor { nt_score, .. }) => {
            eprintln!("{name}: alignment failed, nucleotide score {nt_score} is below the acceptance floor");
            AlignmentResult::failure(name, format!("nucleotide alignment score {nt_score} below floor"))
        }
        Err(AlignError::Unfixable { nt_score, codon_score, .. }) => {
            eprintln!("{name}: unrepairable frameshift (nt_score={nt_score}, codon_score={codon_score})");
            AlignmentResult::failure(name, format!("unrepairable frameshift: nt_score={nt_score}, codon_score={codon_score}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::matrices::{amino_acid_matrix, nucleotide_matrix};
    use crate::alphabet::nucleotide::Nucleotide;
    use crate::reference::Reference;

    fn seq(name: &str, s: &str) -> NTSequence {
        NTSequence::new(name, "", s.chars().map(|c| Nucleotide::from_char(c).unwrap()).collect())
    }

    #[test]
    fn batch_preserves_input_order() {
        let reference = Reference::whole_orf(seq("ref", "ATGAAACCCGGG"));
        let targets = vec![seq("a", "ATGAAACCCGGG"), seq("b", "ATG"), seq("c", "ATGAAACCCGGG")];
        let config = BatchConfig { gap_open: 10.0, gap_ext: 3.3, max_frame_shifts: 3, progress: false };
        let nuc = nucleotide_matrix(5.0, -4.0);
        let aa = amino_acid_matrix(6.0);
        let results = align_batch(&reference, targets, &config, &nuc, &aa);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "a");
        assert_eq!(results[1].name, "b");
        assert_eq!(results[2].name, "c");
        assert_eq!(results[1].status, crate::result::AlignmentStatus::TooShort);
    }
}
