//! FASTA parsing and writing for the reference and target nucleotide
//! sequences.
//!
//! Grammar: a record starts with `>`; the name is the first
//! whitespace-delimited token on the header line and the rest of the line is
//! the free-text description. The body is the concatenation of subsequent
//! lines up to (but not including) the next `>`, with newlines, carriage
//! returns, and spaces ignored. `*` is accepted in the body (mapped to `N`,
//! since the nucleotide alphabet itself has no stop symbol); any other
//! character is a parse error, and the parser skips to the next `>` to
//! recover.

use crate::alphabet::nucleotide::Nucleotide;
use crate::error::ParseError;
use crate::sequence::nt::NTSequence;

const LINE_WRAP: usize = 70;

fn char_to_nucleotide(c: char) -> Option<Nucleotide> {
    if c == '*' {
        Some(Nucleotide::N)
    } else {
        Nucleotide::from_char(c)
    }
}

/// Parses every well-formed record in `text`. Malformed records are dropped
/// and reported as a recoverable [`ParseError`] rather than failing the
/// whole input.
#[must_use]
pub fn parse_records(text: &str) -> (Vec<NTSequence>, Vec<ParseError>) {
    let mut sequences = Vec::new();
    let mut errors = Vec::new();

    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix('>') else { continue };
        let mut parts = header.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or("").to_string();
        let description = parts.next().unwrap_or("").trim().to_string();

        let mut body = Vec::new();
        let mut malformed = false;
        while let Some(&next) = lines.peek() {
            if next.starts_with('>') {
                break;
            }
            let body_line = lines.next().unwrap();
            for c in body_line.chars() {
                if c.is_whitespace() {
                    continue;
                }
                match char_to_nucleotide(c) {
                    Some(n) => body.push(n),
                    None => malformed = true,
                }
            }
        }

        if malformed {
            errors.push(ParseError::new(format!("record {name:?} contains invalid FASTA characters"), true));
            continue;
        }
        sequences.push(NTSequence::new(name, description, body));
    }

    (sequences, errors)
}

/// Parses `text` as a single-record reference FASTA.
///
/// ## Errors
///
/// Returns a non-recoverable [`ParseError`] if `text` does not contain
/// exactly one well-formed record.
pub fn parse_single(text: &str) -> Result<NTSequence, ParseError> {
    let (mut sequences, errors) = parse_records(text);
    match (sequences.len(), errors.is_empty()) {
        (1, true) => Ok(sequences.remove(0)),
        (0, _) => Err(ParseError::new("no valid FASTA record found in reference file", false)),
        _ => Err(ParseError::new("expected exactly one FASTA record in reference file", false)),
    }
}

/// Renders `seq` as a FASTA record, wrapping the body at 70 columns.
#[must_use]
pub fn write_record(seq: &NTSequence) -> String {
    let mut out = if seq.description.is_empty() {
        format!(">{}\n", seq.name)
    } else {
        format!(">{} {}\n", seq.name, seq.description)
    };
    let body = seq.to_fasta_body();
    for chunk in body.as_bytes().chunks(LINE_WRAP) {
        out.push_str(std::str::from_utf8(chunk).expect("FASTA body is ASCII"));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_record_with_description() {
        let text = ">ref some description\nATG\nGCC\nTGA\n";
        let seq = parse_single(text).unwrap();
        assert_eq!(seq.name, "ref");
        assert_eq!(seq.description, "some description");
        assert_eq!(seq.to_fasta_body(), "ATGGCCTGA");
    }

    #[test]
    fn recovers_from_malformed_record() {
        let text = ">bad\nATGZZZ\n>good\nATG\n";
        let (sequences, errors) = parse_records(text);
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].name, "good");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].recovered);
    }

    #[test]
    fn write_then_parse_round_trips_body() {
        let original = NTSequence::new("t", "desc", "ATGGCCTGA".chars().map(|c| Nucleotide::from_char(c).unwrap()).collect());
        let text = write_record(&original);
        let parsed = parse_single(&text).unwrap();
        assert_eq!(parsed.as_slice(), original.as_slice());
    }
}
