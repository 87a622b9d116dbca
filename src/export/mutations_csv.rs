//! The Mutations CSV serializer: one row per target, one `begin,end,mutations`
//! column triple per reference region.

use crate::reference::Region;
use crate::result::{AlignmentResult, AlignmentStatus, aa_mutations};

fn status_str(status: AlignmentStatus) -> &'static str {
    match status {
        AlignmentStatus::Success => "Success",
        AlignmentStatus::TooShort => "FailTooShort",
        AlignmentStatus::Failure => "Failure",
        AlignmentStatus::InternalError => "InternalError",
    }
}

/// Renders the Mutations CSV: header `seqid,status,score,frameshifts`
/// followed by a `begin [prefix],end [prefix],mutations [prefix]` triple
/// per region (the `[prefix]` suffix on each column name is only added when
/// more than one region exists). `begin`/`end` are 1-based positions within
/// the region marking the extent of the target's coverage there.
#[must_use]
pub fn write(results: &[AlignmentResult], regions: &[Region]) -> String {
    let multi = regions.len() > 1;
    let mut out = String::from("seqid,status,score,frameshifts");
    for region in regions {
        if multi {
            out.push_str(&format!(",begin {0},end {0},mutations {0}", region.name));
        } else {
            out.push_str(",begin,end,mutations");
        }
    }
    out.push('\n');

    for result in results {
        out.push_str(&result.name);
        out.push(',');
        out.push_str(status_str(result.status));
        out.push(',');
        if let Some(score) = result.score {
            out.push_str(&format!("{score:.2}"));
        }
        out.push(',');
        if let Some(frameshifts) = result.corrected_frameshifts {
            out.push_str(&frameshifts.to_string());
        }

        for region in regions {
            out.push(',');
            out.push(',');
            out.push(',');

            let found = result.regions.iter().find(|p| p.name == region.name).zip(result.aligned_ref.as_ref()).zip(result.aligned_target.as_ref());
            let Some(((projected, aligned_ref), aligned_target)) = found else { continue };
            if projected.target_begin as isize >= projected.target_end {
                continue;
            }

            let begin_1based = (projected.target_begin - projected.begin + 1).to_string();
            let end_1based =
                if projected.target_end >= projected.begin as isize { (projected.target_end - projected.begin as isize + 1).to_string() } else { String::new() };
            let mutations = aa_mutations(aligned_ref.as_slice(), aligned_target.as_slice(), projected).join(" ");

            // Overwrite the three empty placeholders just pushed.
            out.truncate(out.len() - 3);
            out.push_str(&begin_1based);
            out.push(',');
            out.push_str(&end_1based);
            out.push(',');
            out.push_str(&mutations);
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::nucleotide::Nucleotide;
    use crate::result::AlignmentResult;
    use crate::sequence::nt::NTSequence;

    fn seq(s: &str) -> NTSequence {
        NTSequence::new("t", "", s.chars().map(|c| Nucleotide::from_char(c).unwrap()).collect())
    }

    #[test]
    fn single_region_header_has_no_prefix() {
        let regions = vec![Region::new("P", 0, 4)];
        let out = write(&[], &regions);
        assert_eq!(out, "seqid,status,score,frameshifts,begin,end,mutations\n");
    }

    #[test]
    fn multi_region_header_has_prefix() {
        let regions = vec![Region::new("P1", 0, 2), Region::new("P2", 2, 4)];
        let out = write(&[], &regions);
        assert!(out.contains("begin P1,end P1,mutations P1"));
        assert!(out.contains("begin P2,end P2,mutations P2"));
    }

    #[test]
    fn too_short_row_has_empty_region_columns() {
        let regions = vec![Region::new("P", 0, 4)];
        let result = AlignmentResult::too_short("q1");
        let out = write(&[result], &regions);
        assert_eq!(out, "seqid,status,score,frameshifts,begin,end,mutations\nq1,FailTooShort,,,,,\n");
    }

    #[test]
    fn identity_alignment_row_has_no_mutations() {
        let regions = vec![Region::new("P", 0, 4)];
        let result = AlignmentResult::success("q1", seq("ATGAAACCCGGG"), seq("ATGAAACCCGGG"), 48.0, 0, &regions);
        let out = write(&[result], &regions);
        assert_eq!(out, "seqid,status,score,frameshifts,begin,end,mutations\nq1,Success,48.00,0,1,4,\n");
    }
}
