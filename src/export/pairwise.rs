//! The PairwiseAlignments FASTA serializer: for each successful target, the
//! aligned reference and aligned target as a two-record FASTA block.

use crate::alphabet::genetic_code;
use crate::alphabet::nucleotide::Nucleotide;
use crate::export::ExportAlphabet;
use crate::reference::fasta;
use crate::result::{AlignmentResult, AlignmentStatus};
use crate::sequence::nt::NTSequence;

const LINE_WRAP: usize = 70;

/// Renders one reference/target FASTA pair per successful result. When
/// `alphabet` is [`ExportAlphabet::AminoAcids`], both sequences are
/// translated codon-by-codon first. When `with_insertions` is false, codon
/// columns where the reference is gapped (insertions relative to the
/// reference) are dropped from both sequences.
#[must_use]
pub fn write(results: &[AlignmentResult], alphabet: ExportAlphabet, with_insertions: bool) -> String {
    let mut out = String::new();
    for result in results {
        if result.status != AlignmentStatus::Success {
            continue;
        }
        let aligned_ref = result.aligned_ref.as_ref().expect("Success result carries an aligned reference");
        let aligned_target = result.aligned_target.as_ref().expect("Success result carries an aligned target");

        match alphabet {
            ExportAlphabet::Nucleotides => {
                let (ref_out, target_out) =
                    if with_insertions { (aligned_ref.clone(), aligned_target.clone()) } else { strip_insertions(aligned_ref, aligned_target) };
                out.push_str(&fasta::write_record(&ref_out));
                out.push_str(&fasta::write_record(&target_out));
            }
            ExportAlphabet::AminoAcids => {
                let (ref_aa, target_aa) = translate_pair(aligned_ref, aligned_target, with_insertions);
                out.push_str(&write_aa_record(&aligned_ref.name, &aligned_ref.description, &ref_aa));
                out.push_str(&write_aa_record(&aligned_target.name, &aligned_target.description, &target_aa));
            }
        }
    }
    out
}

fn strip_insertions(aligned_ref: &NTSequence, aligned_target: &NTSequence) -> (NTSequence, NTSequence) {
    let mut ref_bases = Vec::new();
    let mut target_bases = Vec::new();
    for (ref_codon, target_codon) in aligned_ref.as_slice().chunks(3).zip(aligned_target.as_slice().chunks(3)) {
        if ref_codon.iter().all(|&n| n == Nucleotide::GAP) {
            continue;
        }
        ref_bases.extend_from_slice(ref_codon);
        target_bases.extend_from_slice(target_codon);
    }
    (
        NTSequence::new(aligned_ref.name.clone(), aligned_ref.description.clone(), ref_bases),
        NTSequence::new(aligned_target.name.clone(), aligned_target.description.clone(), target_bases),
    )
}

fn translate_pair(aligned_ref: &NTSequence, aligned_target: &NTSequence, with_insertions: bool) -> (String, String) {
    let mut ref_aa = String::new();
    let mut target_aa = String::new();
    for (ref_codon, target_codon) in aligned_ref.as_slice().chunks(3).zip(aligned_target.as_slice().chunks(3)) {
        let ref_is_gap = ref_codon.iter().all(|&n| n == Nucleotide::GAP);
        if ref_is_gap && !with_insertions {
            continue;
        }
        ref_aa.push(genetic_code::translate(ref_codon[0], ref_codon[1], ref_codon[2]).to_char());
        target_aa.push(genetic_code::translate_ambiguous(target_codon[0], target_codon[1], target_codon[2]).to_char());
    }
    (ref_aa, target_aa)
}

fn write_aa_record(name: &str, description: &str, body: &str) -> String {
    let mut out = if description.is_empty() { format!(">{name}\n") } else { format!(">{name} {description}\n") };
    for chunk in body.as_bytes().chunks(LINE_WRAP) {
        out.push_str(std::str::from_utf8(chunk).expect("amino acid body is ASCII"));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Region;

    fn seq(s: &str) -> NTSequence {
        NTSequence::new("t", "", s.chars().map(|c| Nucleotide::from_char(c).unwrap()).collect())
    }

    #[test]
    fn identity_pair_is_unchanged() {
        let regions = vec![Region::new("P", 0, 4)];
        let result = AlignmentResult::success("q", seq("ATGAAACCCGGG"), seq("ATGAAACCCGGG"), 48.0, 0, &regions);
        let out = write(&[result], ExportAlphabet::Nucleotides, true);
        assert!(out.contains("ATGAAACCCGGG"));
    }

    #[test]
    fn amino_acid_export_translates_both_sequences() {
        let regions = vec![Region::new("P", 0, 4)];
        let result = AlignmentResult::success("q", seq("ATGAAACCCGGG"), seq("ATGAAAGGGGGG"), 40.0, 0, &regions);
        let out = write(&[result], ExportAlphabet::AminoAcids, true);
        assert!(out.contains("MKPG"));
        assert!(out.contains("MKGG"));
    }
}
