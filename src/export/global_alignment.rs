//! The GlobalAlignment FASTA serializer: reconciles every target's own
//! insertion columns onto one shared coordinate system so the whole batch
//! can be viewed (or loaded into a multiple-alignment viewer) side by side.
//!
//! Grounded on the original exporter's `computeGlobalAlignment` /
//! `alignToGlobalAlignment` pair: first a pass over every result to find the
//! widest insertion run at each reference codon slot, then a second pass
//! that pads every result's own insertion run up to that width.

use crate::alphabet::nucleotide::Nucleotide;
use crate::reference::{Reference, fasta};
use crate::result::{AlignmentResult, AlignmentStatus};
use crate::sequence::nt::NTSequence;

type Codon = [Nucleotide; 3];

/// Splits a codon-aligned `(ref, target)` pair into the `ref_aa_len + 1`
/// insertion slots (codons where the reference is gapped) and the
/// `ref_aa_len` anchor codons (where the reference is not gapped). Slot `k`
/// holds the insertion run immediately before anchor `k`; slot `ref_aa_len`
/// holds the trailing run after the last anchor.
fn decompose(aligned_ref: &[Nucleotide], aligned_target: &[Nucleotide]) -> (Vec<Vec<Codon>>, Vec<(Codon, Codon)>) {
    let num_codons = aligned_ref.len() / 3;
    let mut insertions = Vec::new();
    let mut anchors = Vec::new();
    let mut current: Vec<Codon> = Vec::new();

    for k in 0..num_codons {
        let ref_codon: Codon = [aligned_ref[3 * k], aligned_ref[3 * k + 1], aligned_ref[3 * k + 2]];
        let target_codon: Codon = [aligned_target[3 * k], aligned_target[3 * k + 1], aligned_target[3 * k + 2]];
        if ref_codon.iter().all(|&n| n == Nucleotide::GAP) {
            current.push(target_codon);
        } else {
            insertions.push(std::mem::take(&mut current));
            anchors.push((ref_codon, target_codon));
        }
    }
    insertions.push(current);
    (insertions, anchors)
}

fn gap_codon() -> Codon {
    [Nucleotide::GAP, Nucleotide::GAP, Nucleotide::GAP]
}

/// Renders the shared-coordinate FASTA block: one record per successful
/// result (plus the reference itself, when `include_reference` is set),
/// every record padded to the same total codon width.
#[must_use]
pub fn write(results: &[AlignmentResult], reference: &Reference, include_reference: bool) -> String {
    let ref_aa_len = reference.aa_len();
    let mut max_insert = vec![0usize; ref_aa_len + 1];

    let decomposed: Vec<Option<(Vec<Vec<Codon>>, Vec<(Codon, Codon)>)>> = results
        .iter()
        .map(|result| {
            if result.status != AlignmentStatus::Success {
                return None;
            }
            let aligned_ref = result.aligned_ref.as_ref()?;
            let aligned_target = result.aligned_target.as_ref()?;
            let (insertions, anchors) = decompose(aligned_ref.as_slice(), aligned_target.as_slice());
            for (k, run) in insertions.iter().enumerate() {
                max_insert[k] = max_insert[k].max(run.len());
            }
            Some((insertions, anchors))
        })
        .collect();

    let mut out = String::new();

    if include_reference {
        let mut bases = Vec::new();
        let ref_bases = reference.sequence.as_slice();
        for k in 0..=ref_aa_len {
            bases.extend(std::iter::repeat_n(Nucleotide::GAP, 3 * max_insert[k]));
            if k < ref_aa_len {
                bases.extend_from_slice(&ref_bases[3 * k..3 * k + 3]);
            }
        }
        out.push_str(&fasta::write_record(&NTSequence::new(reference.sequence.name.clone(), reference.sequence.description.clone(), bases)));
    }

    for (result, decomposed) in results.iter().zip(decomposed.iter()) {
        let Some((insertions, anchors)) = decomposed else { continue };
        let mut bases = Vec::new();
        for k in 0..=ref_aa_len {
            for codon in &insertions[k] {
                bases.extend_from_slice(codon);
            }
            for _ in insertions[k].len()..max_insert[k] {
                bases.extend_from_slice(&gap_codon());
            }
            if k < ref_aa_len {
                bases.extend_from_slice(&anchors[k].1);
            }
        }
        out.push_str(&fasta::write_record(&NTSequence::new(result.name.clone(), String::new(), bases)));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Region;

    fn seq(name: &str, s: &str) -> NTSequence {
        NTSequence::new(name, "", s.chars().map(|c| Nucleotide::from_char(c).unwrap()).collect())
    }

    #[test]
    fn reconciles_differing_insertion_widths() {
        let reference = Reference { sequence: seq("ref", "ATGAAACCCGGG"), regions: vec![Region::new("P", 0, 4)] };

        // target a inserts one codon after position 1, target b inserts none there.
        let result_a = AlignmentResult::success("a", seq("ref", "ATGAAA---CCCGGG"), seq("a", "ATGAAATTTCCCGGG"), 40.0, 0, &reference.regions);
        let result_b = AlignmentResult::success("b", seq("ref", "ATGAAACCCGGG"), seq("b", "ATGAAACCCGGG"), 48.0, 0, &reference.regions);

        let out = write(&[result_a, result_b], &reference, true);
        assert!(out.contains("ATGAAATTTCCCGGG"));
        assert!(out.contains("ATGAAA---CCCGGG")); // b padded to the same width as a
    }
}
