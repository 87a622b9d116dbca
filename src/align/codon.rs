//! The codon-aware aligner: plain nucleotide alignment, three-frame
//! amino-acid alignment, projection of AA gaps onto codon boundaries, and
//! the frameshift-detection/repair loop.

use crate::align::dp::{self, AlignedColumn, ScoreMatrix};
use crate::alphabet::matrices::{AA_N, NUC_N, WeightMatrix};
use crate::alphabet::nucleotide::Nucleotide;
use crate::error::AlignError;
use crate::sequence::nt::NTSequence;

/// The nucleotide alignment score floor below which [`align_codon`] gives up
/// without attempting codon projection.
const NT_SCORE_FLOOR: f64 = 200.0;

/// The maximum tolerated gap between the plain NT score and the
/// codon-projected NT score before a frameshift repair is attempted.
const ACCEPTANCE_MARGIN: f64 = 100.0;

/// Width of the neighborhood (on either side of a gap run's boundaries)
/// that must be free of other gaps for the run to be treated as an
/// isolated, repairable frameshift.
const ISOLATION_WINDOW: usize = 10;

/// Shortest target accepted by [`align_codon`]; shorter targets are the
/// caller's `TooShort` case.
pub const MIN_TARGET_LEN: usize = 7;

/// The result of a successful [`align_codon`] call.
pub struct CodonAlignment {
    pub aligned_ref: NTSequence,
    pub aligned_target: NTSequence,
    pub score: f64,
    pub corrected_frameshifts: u32,
}

struct Matrices<'a> {
    nuc: &'a WeightMatrix<NUC_N>,
    aa: &'a WeightMatrix<AA_N>,
    gap_open: f64,
    gap_ext: f64,
}

/// Aligns `target` against `reference`, producing an equal-length,
/// codon-aligned pair. `reference` is shared read-only across concurrent
/// alignments; `target` is consumed.
///
/// ## Errors
///
/// Returns [`AlignError::BelowScoreFloor`] if the plain nucleotide alignment
/// scores below 200, or [`AlignError::Unfixable`] if a frameshift cannot be
/// repaired within `max_frame_shifts` retries.
///
/// ## Panics
///
/// Panics if `target`, after stripping pre-existing gaps, has fewer than
/// [`MIN_TARGET_LEN`] bases; callers must handle short targets as `TooShort`
/// before calling this.
pub fn align_codon(
    reference: &NTSequence, target: NTSequence, max_frame_shifts: u32, gap_open: f64, gap_ext: f64, nuc_matrix: &WeightMatrix<NUC_N>,
    aa_matrix: &WeightMatrix<AA_N>,
) -> Result<CodonAlignment, AlignError> {
    let name = target.name.clone();
    let description = target.description.clone();
    let target_bases: Vec<Nucleotide> = target.stripped_of_gaps().as_slice().to_vec();
    assert!(target_bases.len() >= MIN_TARGET_LEN, "align_codon called on a target shorter than MIN_TARGET_LEN");

    let ref_bases: Vec<Nucleotide> = reference.stripped_of_gaps().as_slice().to_vec();
    let matrices = Matrices { nuc: nuc_matrix, aa: aa_matrix, gap_open, gap_ext };

    let (ref_codon, target_codon, score, corrected) = align_codon_inner(&ref_bases, target_bases, max_frame_shifts, &matrices)?;

    Ok(CodonAlignment {
        aligned_ref: NTSequence::new(reference.name.clone(), reference.description.clone(), ref_codon),
        aligned_target: NTSequence::new(name, description, target_codon),
        score,
        corrected_frameshifts: corrected,
    })
}

fn align_codon_inner(
    ref_bases: &[Nucleotide], target_bases: Vec<Nucleotide>, max_frame_shifts: u32, matrices: &Matrices,
) -> Result<(Vec<Nucleotide>, Vec<Nucleotide>, f64, u32), AlignError> {
    let nuc_score = |i: usize, j: usize| matrices.nuc.score(i, j);

    let ref_idx: Vec<usize> = ref_bases.iter().map(|n| n.index()).collect();
    let target_idx: Vec<usize> = target_bases.iter().map(|n| n.index()).collect();
    let (aligned_ref_nt, aligned_target_nt, nt_score) = dp::align(&ref_idx, &target_idx, &nuc_score, matrices.gap_open, matrices.gap_ext);

    if nt_score < NT_SCORE_FLOOR {
        return Err(AlignError::BelowScoreFloor {
            nt_score,
            codon_score: 0.0,
            aligned_ref: NTSequence::new("ref", "", to_gapped_bases(&aligned_ref_nt)),
            aligned_target: NTSequence::new("target", "", to_gapped_bases(&aligned_target_nt)),
        });
    }

    let (ref_codon, target_codon) = project_best_frame(ref_bases, &target_bases, matrices);
    let ref_codon_cols = to_aligned_columns(&ref_codon);
    let target_codon_cols = to_aligned_columns(&target_codon);
    let nt_codon_score = dp::compute_align_score(&ref_codon_cols, &target_codon_cols, &nuc_score, matrices.gap_open, matrices.gap_ext);

    if nt_score - nt_codon_score <= ACCEPTANCE_MARGIN {
        return Ok((ref_codon, target_codon, nt_codon_score, 0));
    }

    match find_repairable_frameshift(&aligned_ref_nt, &aligned_target_nt) {
        Some((seq2pos, insert_count)) if max_frame_shifts > 0 => {
            let mut repaired = target_bases;
            repaired.splice(seq2pos..seq2pos, std::iter::repeat_n(Nucleotide::N, insert_count));
            let (ref_out, target_out, score, corrected) = align_codon_inner(ref_bases, repaired, max_frame_shifts - 1, matrices)?;
            Ok((ref_out, target_out, score, corrected + 1))
        }
        _ => Err(AlignError::Unfixable {
            nt_score,
            codon_score: nt_codon_score,
            aligned_ref: NTSequence::new("ref", "", to_gapped_bases(&aligned_ref_nt)),
            aligned_target: NTSequence::new("target", "", to_gapped_bases(&aligned_target_nt)),
        }),
    }
}

/// Translates `reference` once and `target` in each of the three reading
/// frames, AA-aligns each frame against the reference, keeps the
/// highest-scoring frame (ties favor the smaller frame), and projects that
/// AA alignment's gaps onto codon boundaries of fresh copies of `reference`
/// and `target`.
fn project_best_frame(ref_bases: &[Nucleotide], target_bases: &[Nucleotide], matrices: &Matrices) -> (Vec<Nucleotide>, Vec<Nucleotide>) {
    let reference = NTSequence::new("", "", ref_bases.to_vec());
    let ref_aa = reference.translate(0);
    let ref_aa_idx: Vec<usize> = ref_aa.as_slice().iter().map(|a| a.index()).collect();
    let aa_score = |i: usize, j: usize| matrices.aa.score(i, j);

    let mut best: Option<(usize, usize, Vec<AlignedColumn>, Vec<AlignedColumn>, f64)> = None;
    for frame in 0..3 {
        if target_bases.len() <= frame {
            continue;
        }
        let usable_codons = (target_bases.len() - frame) / 3;
        if usable_codons == 0 {
            continue;
        }
        let window_len = 3 * usable_codons;
        let target = NTSequence::new("", "", target_bases.to_vec());
        let target_aa = target.translate(frame);
        let target_aa_idx: Vec<usize> = target_aa.as_slice().iter().map(|a| a.index()).collect();

        let (aligned_ref_aa, aligned_target_aa, score) = dp::align(&ref_aa_idx, &target_aa_idx, &aa_score, matrices.gap_open, matrices.gap_ext);

        let better = match &best {
            None => true,
            Some((_, _, _, _, best_score)) => score > *best_score,
        };
        if better {
            best = Some((frame, window_len, aligned_ref_aa, aligned_target_aa, score));
        }
    }

    let (frame, window_len, ref_aa_aligned, target_aa_aligned, _) =
        best.expect("at least one reading frame is always usable for a target of MIN_TARGET_LEN or more");

    splice_frame(ref_bases, target_bases, frame, window_len, &ref_aa_aligned, &target_aa_aligned)
}

/// Walks one amino-acid alignment and produces codon-aligned nucleotide
/// copies of `ref_bases` and `target_bases`, re-splicing the bases that fell
/// outside `target`'s chosen reading-frame window back in as gapped-on-the-
/// reference overhang.
fn splice_frame(
    ref_bases: &[Nucleotide], target_bases: &[Nucleotide], frame: usize, window_len: usize, ref_aa_aligned: &[AlignedColumn],
    target_aa_aligned: &[AlignedColumn],
) -> (Vec<Nucleotide>, Vec<Nucleotide>) {
    let aligned_len = ref_aa_aligned.len();
    let mut ref_codon = ref_bases.to_vec();
    let mut target_codon = target_bases[frame..frame + window_len].to_vec();

    let mut first_nongap_aa: Option<usize> = None;
    let mut last_nongap_aa: Option<usize> = None;

    for i in 0..aligned_len {
        let pos = 3 * i;
        if ref_aa_aligned[i].is_none() {
            let at = pos.min(ref_codon.len());
            ref_codon.splice(at..at, std::iter::repeat_n(Nucleotide::GAP, 3));
        }
        if target_aa_aligned[i].is_none() {
            let at = pos.min(target_codon.len());
            target_codon.splice(at..at, std::iter::repeat_n(Nucleotide::GAP, 3));
        } else {
            first_nongap_aa.get_or_insert(i);
            last_nongap_aa = Some(i);
        }
    }

    let prefix = &target_bases[..frame];
    let tail = &target_bases[frame + window_len..];

    if let (Some(first), Some(last)) = (first_nongap_aa, last_nongap_aa) {
        let first_nongap_pos = 3 * first;
        let last_nongap_pos = 3 * (last + 1);

        // Insert the tail before the prefix so the prefix's insertion index
        // (computed against the pre-splice array) stays valid.
        let tail_at = last_nongap_pos.min(target_codon.len());
        target_codon.splice(tail_at..tail_at, tail.iter().copied());
        ref_codon.splice(tail_at.min(ref_codon.len())..tail_at.min(ref_codon.len()), std::iter::repeat_n(Nucleotide::GAP, tail.len()));

        let prefix_at = first_nongap_pos.saturating_sub(frame).min(target_codon.len());
        target_codon.splice(prefix_at..prefix_at, prefix.iter().copied());
        ref_codon.splice(prefix_at.min(ref_codon.len())..prefix_at.min(ref_codon.len()), std::iter::repeat_n(Nucleotide::GAP, prefix.len()));
    } else {
        // The target carried no non-gap codon in the chosen frame at all;
        // append the frame-shifted bases at the end rather than lose them.
        target_codon.extend(prefix.iter().copied());
        target_codon.extend(tail.iter().copied());
        ref_codon.extend(std::iter::repeat_n(Nucleotide::GAP, prefix.len() + tail.len()));
    }

    (ref_codon, target_codon)
}

fn to_aligned_columns(bases: &[Nucleotide]) -> Vec<AlignedColumn> {
    bases.iter().map(|&n| if n == Nucleotide::GAP { None } else { Some(n.index()) }).collect()
}

/// The inverse of [`to_aligned_columns`]: renders a plain NT alignment's
/// columns back to nucleotides, `None` becoming the gap.
fn to_gapped_bases(aligned: &[AlignedColumn]) -> Vec<Nucleotide> {
    aligned.iter().map(|&c| c.map_or(Nucleotide::GAP, Nucleotide::from_index)).collect()
}

/// A contiguous run of gap columns in one side of the plain NT alignment.
struct GapRun {
    start: usize,
    len: usize,
    in_ref: bool,
}

/// Scans the plain NT alignment left-to-right for the first isolated gap
/// run whose length is not a multiple of three, returning the insertion
/// point into the pre-alignment target and the number of `N`s to insert.
fn find_repairable_frameshift(aligned_ref: &[AlignedColumn], aligned_target: &[AlignedColumn]) -> Option<(usize, usize)> {
    let len = aligned_ref.len();
    let ref_gap: Vec<bool> = aligned_ref.iter().map(Option::is_none).collect();
    let target_gap: Vec<bool> = aligned_target.iter().map(Option::is_none).collect();

    let mut runs = Vec::new();
    collect_runs(&ref_gap, true, &mut runs);
    collect_runs(&target_gap, false, &mut runs);
    runs.sort_by_key(|r| r.start);

    for run in &runs {
        if run.len % 3 == 0 {
            continue;
        }
        if !is_isolated(run, &ref_gap, &target_gap, len) {
            continue;
        }

        let seq2pos = aligned_target[..run.start].iter().filter(|c| c.is_some()).count();
        let insert_count = if run.in_ref { 3 - run.len % 3 } else { run.len % 3 };
        return Some((seq2pos, insert_count));
    }
    None
}

fn collect_runs(gaps: &[bool], in_ref: bool, out: &mut Vec<GapRun>) {
    let mut i = 0;
    while i < gaps.len() {
        if gaps[i] {
            let start = i;
            while i < gaps.len() && gaps[i] {
                i += 1;
            }
            out.push(GapRun { start, len: i - start, in_ref });
        } else {
            i += 1;
        }
    }
}

fn is_isolated(run: &GapRun, ref_gap: &[bool], target_gap: &[bool], len: usize) -> bool {
    let before = run.start.saturating_sub(ISOLATION_WINDOW)..run.start;
    let end = run.start + run.len;
    let after = end..(end + ISOLATION_WINDOW).min(len);

    let clear = |range: std::ops::Range<usize>| range.into_iter().all(|k| !ref_gap[k] && !target_gap[k]);
    clear(before) && clear(after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::matrices::{amino_acid_matrix, nucleotide_matrix};

    fn seq(name: &str, s: &str) -> NTSequence {
        NTSequence::new(name, "", s.chars().map(|c| Nucleotide::from_char(c).unwrap()).collect())
    }

    fn run(reference: &str, target: &str, max_frame_shifts: u32) -> Result<CodonAlignment, AlignError> {
        let nuc = nucleotide_matrix(5.0, -4.0);
        let aa = amino_acid_matrix(6.0);
        align_codon(&seq("ref", reference), seq("target", target), max_frame_shifts, 10.0, 3.3, &nuc, &aa)
    }

    #[test]
    fn identity_alignment_has_no_gaps() {
        let result = run("ATGGCCTGA", "ATGGCCTGA", 3).unwrap();
        assert_eq!(result.aligned_ref.as_slice(), result.aligned_target.as_slice());
        assert_eq!(result.corrected_frameshifts, 0);
        assert_eq!(result.aligned_ref.len() % 3, 0);
    }

    #[test]
    fn codon_deletion_is_codon_aligned() {
        let result = run("ATGAAACCCGGG", "ATGAAAGGG", 3).unwrap();
        assert_eq!(result.aligned_ref.len(), result.aligned_target.len());
        assert_eq!(result.aligned_ref.len() % 3, 0);
        assert_eq!(result.corrected_frameshifts, 0);
        let target_codons: Vec<&[Nucleotide]> = result.aligned_target.as_slice().chunks(3).collect();
        assert!(target_codons.iter().any(|c| c.iter().all(|&n| n == Nucleotide::GAP)));
    }

    #[test]
    fn isolated_single_base_deletion_is_repaired() {
        let result = run("ATGAAACCCGGG", "ATGAACCCGGG", 2).unwrap();
        assert_eq!(result.corrected_frameshifts, 1);
        assert_eq!(result.aligned_ref.len(), result.aligned_target.len());
        assert_eq!(result.aligned_ref.len() % 3, 0);
    }

    #[test]
    fn too_low_scoring_alignment_is_rejected() {
        let err = run("ATGAAACCCGGGATGAAACCCGGG", "TTTTTTTTTTTTTTTTTTTTTTTT", 3).unwrap_err();
        assert!(matches!(err, AlignError::BelowScoreFloor { .. }));
    }
}
