//! Result serialization: the five output formats selectable with
//! `--exportKind`, plus the `--exportAlphabet` switch shared by the formats
//! that can render either nucleotides or amino acids.

pub mod global_alignment;
pub mod mutation_table;
pub mod mutations_csv;
pub mod pairwise;
pub mod position_table;

use std::fmt::Display;

use clap::ValueEnum;
use clap::builder::PossibleValue;

use crate::reference::Reference;
use crate::result::AlignmentResult;

/// Which output format to render.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ExportKind {
    MutationsCsv,
    PairwiseAlignments,
    GlobalAlignment,
    PositionTable,
    MutationTable,
}

impl Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportKind::MutationsCsv => write!(f, "MutationsCSV"),
            ExportKind::PairwiseAlignments => write!(f, "PairwiseAlignments"),
            ExportKind::GlobalAlignment => write!(f, "GlobalAlignment"),
            ExportKind::PositionTable => write!(f, "PositionTable"),
            ExportKind::MutationTable => write!(f, "MutationTable"),
        }
    }
}

impl ValueEnum for ExportKind {
    fn value_variants<'a>() -> &'a [Self] {
        &[ExportKind::MutationsCsv, ExportKind::PairwiseAlignments, ExportKind::GlobalAlignment, ExportKind::PositionTable, ExportKind::MutationTable]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            ExportKind::MutationsCsv => PossibleValue::new("Mutations").alias("MutationsCSV"),
            ExportKind::PairwiseAlignments => PossibleValue::new("PairwiseAlignments"),
            ExportKind::GlobalAlignment => PossibleValue::new("GlobalAlignment"),
            ExportKind::PositionTable => PossibleValue::new("PositionTable"),
            ExportKind::MutationTable => PossibleValue::new("MutationTable"),
        })
    }
}

/// Which alphabet a sequence-rendering export format should use. Ignored by
/// the CSV table formats, which always operate in amino-acid coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum ExportAlphabet {
    #[default]
    Nucleotides,
    AminoAcids,
}

impl Display for ExportAlphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportAlphabet::Nucleotides => write!(f, "NT"),
            ExportAlphabet::AminoAcids => write!(f, "AA"),
        }
    }
}

impl ValueEnum for ExportAlphabet {
    fn value_variants<'a>() -> &'a [Self] {
        &[ExportAlphabet::Nucleotides, ExportAlphabet::AminoAcids]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            ExportAlphabet::Nucleotides => PossibleValue::new("Nucleotides").alias("NT"),
            ExportAlphabet::AminoAcids => PossibleValue::new("AminoAcids").alias("AA"),
        })
    }
}

/// Parameters controlling how a batch of results is rendered, independent of
/// which [`ExportKind`] is chosen.
pub struct ExportOptions {
    pub kind: ExportKind,
    pub alphabet: ExportAlphabet,
    pub with_insertions: bool,
    pub include_reference: bool,
}

/// Renders `results` under the given `options`.
#[must_use]
pub fn render(results: &[AlignmentResult], reference: &Reference, options: &ExportOptions) -> String {
    match options.kind {
        ExportKind::MutationsCsv => mutations_csv::write(results, &reference.regions),
        ExportKind::PairwiseAlignments => pairwise::write(results, options.alphabet, options.with_insertions),
        ExportKind::GlobalAlignment => global_alignment::write(results, reference, options.include_reference),
        ExportKind::PositionTable => position_table::write(results, &reference.regions),
        ExportKind::MutationTable => mutation_table::write(results, &reference.regions),
    }
}
