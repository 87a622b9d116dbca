//! The MutationTable CSV serializer: one row per reference amino acid
//! position, reporting for each target whether it carries a mutation there
//! (`y`/`n`), blank where the target doesn't reach that position.
//!
//! A simplified cousin of the PositionTable: where that table reports the
//! residue itself, this one reports only presence/absence of a difference
//! from the reference, mirroring the original exporter's mutation-presence
//! columns without its `_insN` insertion-column expansion.

use crate::alphabet::genetic_code;
use crate::reference::Region;
use crate::result::{AlignmentResult, AlignmentStatus, aligned_pos};

/// Renders the table: header `region,position,reference` followed by one
/// column per result, then one row per `(region, position)` pair.
#[must_use]
pub fn write(results: &[AlignmentResult], regions: &[Region]) -> String {
    let mut out = String::from("region,position,reference");
    for result in results {
        out.push(',');
        out.push_str(&result.name);
    }
    out.push('\n');

    for region in regions {
        for offset in 0..region.len() {
            let r = region.begin + offset;
            let mut ref_aa_char = None;

            out.push_str(&region.name);
            out.push(',');
            out.push_str(&(offset + 1).to_string());
            out.push(',');

            let mut row = String::new();
            for result in results {
                row.push(',');
                if result.status != AlignmentStatus::Success {
                    continue;
                }
                let aligned_ref = result.aligned_ref.as_ref().expect("Success result carries an aligned reference");
                let aligned_target = result.aligned_target.as_ref().expect("Success result carries an aligned target");
                let ref_codon = aligned_ref.as_slice();
                let k = aligned_pos(ref_codon, r);
                if k * 3 + 2 >= ref_codon.len() {
                    continue;
                }
                let ref_aa = genetic_code::translate(ref_codon[3 * k], ref_codon[3 * k + 1], ref_codon[3 * k + 2]);
                if ref_aa_char.is_none() {
                    ref_aa_char = Some(ref_aa.to_char());
                }

                let target_codon = aligned_target.as_slice();
                if k * 3 + 2 >= target_codon.len() {
                    continue;
                }
                let target_aas = genetic_code::translate_all(target_codon[3 * k], target_codon[3 * k + 1], target_codon[3 * k + 2]);
                let differs = target_aas.len() > 1 || target_aas[0] != ref_aa;
                row.push(if differs { 'y' } else { 'n' });
            }

            out.push(ref_aa_char.unwrap_or(' '));
            out.push_str(&row);
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::nucleotide::Nucleotide;
    use crate::sequence::nt::NTSequence;

    fn seq(s: &str) -> NTSequence {
        NTSequence::new("t", "", s.chars().map(|c| Nucleotide::from_char(c).unwrap()).collect())
    }

    #[test]
    fn marks_mutated_and_unmutated_positions() {
        let regions = vec![Region::new("P", 0, 4)];
        let result = AlignmentResult::success("q1", seq("ATGAAACCCGGG"), seq("ATGAAAGGGGGG"), 40.0, 0, &regions);
        let out = write(&[result], &regions);
        assert!(out.contains("P,1,M,n\n"));
        assert!(out.contains("P,3,P,y\n"));
    }
}
