//! The command line surface: a raw `clap`-derived argument struct plus a
//! `parse_*` pass that validates it into the configuration the rest of the
//! crate consumes, mirroring the split the teacher uses for its own
//! `aligner` subcommand (`AlignerArgs`/`ParsedAlignerArgs`/`parse_aligner_args`).

use std::fmt::Display;
use std::path::PathBuf;

use clap::builder::PossibleValue;
use clap::{CommandFactory, Parser, ValueEnum, error::ErrorKind};

use crate::export::{ExportAlphabet, ExportKind, ExportOptions};

/// A clap enum for `yes`/`no`-valued flags.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    #[must_use]
    pub fn as_bool(self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

impl Display for YesNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YesNo::Yes => write!(f, "yes"),
            YesNo::No => write!(f, "no"),
        }
    }
}

impl ValueEnum for YesNo {
    fn value_variants<'a>() -> &'a [Self] {
        &[YesNo::Yes, YesNo::No]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            YesNo::Yes => PossibleValue::new("yes"),
            YesNo::No => PossibleValue::new("no"),
        })
    }
}

/// The raw command line arguments, as parsed by clap.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct AlignerArgs {
    /// Path to the reference ORF: `.fasta` (single record) or `.xml` (ORF
    /// description with named protein regions)
    pub reference_file: PathBuf,

    /// Path to the FASTA file containing the target sequences to align
    pub targets_file: PathBuf,

    #[arg(long = "exportKind", default_value_t = ExportKind::MutationsCsv)]
    /// Which output format to render on standard output
    pub export_kind: ExportKind,

    #[arg(long = "exportAlphabet", default_value_t = ExportAlphabet::Nucleotides)]
    /// Alphabet used by the sequence-rendering export formats
    pub export_alphabet: ExportAlphabet,

    #[arg(long = "exportWithInsertions", default_value_t = YesNo::No)]
    /// Whether sequence-rendering export formats keep columns where the
    /// reference is gapped (insertions relative to the reference)
    pub export_with_insertions: YesNo,

    #[arg(long = "exportReferenceSequence", default_value_t = YesNo::No)]
    /// Whether the GlobalAlignment export includes the reference as its own
    /// record
    pub export_reference_sequence: YesNo,

    #[arg(long = "gapExtensionPenalty", default_value_t = 3.3)]
    /// The per-nucleotide penalty for extending a gap
    pub gap_extension_penalty: f64,

    #[arg(long = "gapOpenPenalty", default_value_t = 10.0)]
    /// The penalty for opening a new gap
    pub gap_open_penalty: f64,

    #[arg(long = "maxFrameShifts", default_value_t = 3)]
    /// The maximum number of single-base frameshifts the aligner will
    /// attempt to repair per target
    pub max_frame_shifts: u32,

    #[arg(long = "progress", default_value_t = YesNo::No)]
    /// Whether to report batch progress to standard error
    pub progress: YesNo,

    #[arg(long)]
    /// Number of worker threads for the batch driver; defaults to all
    /// available CPUs
    pub threads: Option<usize>,

    #[arg(long)]
    /// Directory to write NT-only (pre-codon-projection) alignments with
    /// score above the acceptance floor, for debugging
    pub nt_debug: Option<PathBuf>,
}

/// The validated configuration built from [`AlignerArgs`].
pub struct ParsedAlignerArgs {
    pub reference_file: PathBuf,
    pub targets_file: PathBuf,
    pub export: ExportOptions,
    pub gap_open_penalty: f64,
    pub gap_extension_penalty: f64,
    pub max_frame_shifts: u32,
    pub progress: bool,
    pub threads: Option<usize>,
    pub nt_debug: Option<PathBuf>,
}

/// Validates the raw arguments.
///
/// [`abort_clap`] is called if either gap penalty is not positive.
#[must_use]
pub fn parse_aligner_args(args: AlignerArgs) -> ParsedAlignerArgs {
    if args.gap_open_penalty <= 0.0 {
        abort_clap(ErrorKind::InvalidValue, "--gapOpenPenalty must be a positive real number");
    }
    if args.gap_extension_penalty <= 0.0 {
        abort_clap(ErrorKind::InvalidValue, "--gapExtensionPenalty must be a positive real number");
    }

    ParsedAlignerArgs {
        reference_file: args.reference_file,
        targets_file: args.targets_file,
        export: ExportOptions {
            kind: args.export_kind,
            alphabet: args.export_alphabet,
            with_insertions: args.export_with_insertions.as_bool(),
            include_reference: args.export_reference_sequence.as_bool(),
        },
        gap_open_penalty: args.gap_open_penalty,
        gap_extension_penalty: args.gap_extension_penalty,
        max_frame_shifts: args.max_frame_shifts,
        progress: args.progress.as_bool(),
        threads: args.threads,
        nt_debug: args.nt_debug,
    }
}

/// Aborts clap with a custom parsing error message.
pub fn abort_clap(kind: ErrorKind, message: impl std::fmt::Display) -> ! {
    AlignerArgs::command().error(kind, message).exit()
}
