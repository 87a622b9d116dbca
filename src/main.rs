use std::fs;
use std::path::Path;

use clap::Parser;
use codonalign::align::dp;
use codonalign::alphabet::matrices::{AA_N, NUC_N, WeightMatrix, amino_acid_matrix, nucleotide_matrix};
use codonalign::alphabet::nucleotide::Nucleotide;
use codonalign::batch::{self, BatchConfig};
use codonalign::cli::{self, AlignerArgs};
use codonalign::export;
use codonalign::reference::{Reference, fasta, orf_xml};
use codonalign::sequence::nt::NTSequence;

fn main() {
    let args = cli::parse_aligner_args(AlignerArgs::parse());

    let reference = match load_reference(&args.reference_file) {
        Ok(reference) => reference,
        Err(message) => {
            eprintln!("error loading reference: {message}");
            std::process::exit(1);
        }
    };

    let targets_text = match fs::read_to_string(&args.targets_file) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error reading targets file: {err}");
            std::process::exit(1);
        }
    };
    let (targets, parse_errors) = fasta::parse_records(&targets_text);
    for err in &parse_errors {
        eprintln!("dropping malformed target record: {err}");
    }

    let threads = args.threads.unwrap_or_else(num_cpus::get);
    rayon::ThreadPoolBuilder::new().num_threads(threads).build_global().expect("the global rayon thread pool is only built once");

    let nuc_matrix: WeightMatrix<NUC_N> = nucleotide_matrix(5.0, -4.0);
    let aa_matrix: WeightMatrix<AA_N> = amino_acid_matrix(6.0);

    if let Some(dir) = &args.nt_debug {
        write_nt_debug(dir, &reference, &targets, &nuc_matrix, args.gap_open_penalty, args.gap_extension_penalty);
    }

    let config =
        BatchConfig { gap_open: args.gap_open_penalty, gap_ext: args.gap_extension_penalty, max_frame_shifts: args.max_frame_shifts, progress: args.progress };
    let results = batch::align_batch(&reference, targets, &config, &nuc_matrix, &aa_matrix);

    let rendered = export::render(&results, &reference, &args.export);
    print!("{rendered}");
}

fn load_reference(path: &Path) -> Result<Reference, String> {
    let text = fs::read_to_string(path).map_err(|err| err.to_string())?;
    let is_xml = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
    if is_xml {
        orf_xml::parse(&text).map_err(|err| err.to_string())
    } else {
        fasta::parse_single(&text).map(Reference::whole_orf).map_err(|err| err.to_string())
    }
}

/// Writes the plain (pre-codon-projection) nucleotide alignment for every
/// target scoring above the acceptance floor into `dir`, one FASTA file per
/// target, for debugging the codon-projection step in isolation from the
/// rest of `align_codon`.
fn write_nt_debug(dir: &Path, reference: &Reference, targets: &[NTSequence], nuc_matrix: &WeightMatrix<NUC_N>, gap_open: f64, gap_ext: f64) {
    if let Err(err) = fs::create_dir_all(dir) {
        eprintln!("could not create --nt-debug directory: {err}");
        return;
    }

    let ref_bases = reference.sequence.as_slice();
    let ref_idx: Vec<usize> = ref_bases.iter().map(Nucleotide::index).collect();
    let score_fn = |i: usize, j: usize| nuc_matrix.score(i, j);

    for target in targets {
        let target_bases = target.stripped_of_gaps();
        let target_idx: Vec<usize> = target_bases.as_slice().iter().map(Nucleotide::index).collect();
        let (aligned_ref, aligned_target, score) = dp::align(&ref_idx, &target_idx, &score_fn, gap_open, gap_ext);
        if score <= 200.0 {
            continue;
        }

        let render = |cols: &[Option<usize>]| -> String { cols.iter().map(|c| c.map_or('-', |i| Nucleotide::from_index(i).to_char())).collect() };
        let ref_line = render(&aligned_ref);
        let target_line = render(&aligned_target);

        let file_path = dir.join(format!("{}.fasta", target.name));
        let contents = format!(">{}\n{ref_line}\n>{}\n{target_line}\n", reference.sequence.name, target.name);
        if let Err(err) = fs::write(&file_path, contents) {
            eprintln!("could not write --nt-debug file {}: {err}", file_path.display());
        }
    }
}
