//! ORF XML parsing: the structured reference description that supplies
//! named sub-regions alongside the nucleotide sequence.
//!
//! Root `<orf name="..." referenceSequence="..."/>` with one or more
//! `<protein abbreviation="..." startPosition="..." stopPosition="..."/>`
//! children carrying 1-based nucleotide positions, optionally wrapped in
//! `<genomes><genome organismName="..."><openReadingFrame .../></genome></genomes>`.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::alphabet::nucleotide::Nucleotide;
use crate::error::ParseError;
use crate::reference::{Reference, Region};
use crate::sequence::nt::NTSequence;

/// Parses an ORF XML document into a [`Reference`].
///
/// ## Errors
///
/// Returns a non-recoverable [`ParseError`] if the XML is malformed, the
/// `<orf>`/`<openReadingFrame>` element or its `referenceSequence` attribute
/// is missing, the sequence contains a character outside the nucleotide
/// alphabet, or the sequence length is not a multiple of 3.
pub fn parse(text: &str) -> Result<Reference, ParseError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut name: Option<String> = None;
    let mut reference_sequence: Option<String> = None;
    let mut proteins: Vec<(String, usize, usize)> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(|e| ParseError::new(format!("XML parse error: {e}"), false))? {
            Event::Eof => break,
            Event::Start(e) | Event::Empty(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                match tag.as_str() {
                    "orf" | "openReadingFrame" => {
                        for attr in e.attributes().flatten() {
                            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                            let value = attr.unescape_value().map_err(|err| ParseError::new(err.to_string(), false))?.into_owned();
                            match key.as_str() {
                                "name" => name = Some(value),
                                "referenceSequence" => reference_sequence = Some(value),
                                _ => {}
                            }
                        }
                    }
                    "protein" => {
                        let mut abbreviation = None;
                        let mut start = None;
                        let mut stop = None;
                        for attr in e.attributes().flatten() {
                            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                            let value = attr.unescape_value().map_err(|err| ParseError::new(err.to_string(), false))?.into_owned();
                            match key.as_str() {
                                "abbreviation" => abbreviation = Some(value),
                                "startPosition" => start = value.parse::<usize>().ok(),
                                "stopPosition" => stop = value.parse::<usize>().ok(),
                                _ => {}
                            }
                        }
                        if let (Some(abbreviation), Some(start), Some(stop)) = (abbreviation, start, stop) {
                            proteins.push((abbreviation, start, stop));
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
        buf.clear();
    }

    let reference_sequence = reference_sequence.ok_or_else(|| ParseError::new("ORF XML is missing a referenceSequence attribute", false))?;

    let mut bases = Vec::with_capacity(reference_sequence.len());
    for c in reference_sequence.chars().filter(|c| !c.is_whitespace()) {
        let n = Nucleotide::from_char(c).ok_or_else(|| ParseError::new(format!("invalid nucleotide character '{c}' in referenceSequence"), false))?;
        bases.push(n);
    }
    if bases.len() % 3 != 0 {
        return Err(ParseError::new("referenceSequence length is not a multiple of 3", false));
    }

    let sequence = NTSequence::new(name.unwrap_or_default(), "", bases);
    let regions = if proteins.is_empty() {
        vec![Region::new("P", 0, sequence.len() / 3)]
    } else {
        proteins.into_iter().map(|(abbreviation, start, stop)| Region::new(abbreviation, (start - 1) / 3, (stop - 1) / 3)).collect()
    };

    Ok(Reference { sequence, regions })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_orf_with_one_protein() {
        let xml = r#"<orf name="seg" referenceSequence="ATGGCCTGA">
            <protein abbreviation="P" startPosition="1" stopPosition="9"/>
        </orf>"#;
        let reference = parse(xml).unwrap();
        assert_eq!(reference.sequence.to_fasta_body(), "ATGGCCTGA");
        assert_eq!(reference.regions.len(), 1);
        assert_eq!(reference.regions[0].name, "P");
        assert_eq!(reference.regions[0].begin, 0);
    }

    #[test]
    fn parses_genomes_wrapper() {
        let xml = r#"<genomes>
            <genome organismName="x">
                <openReadingFrame name="seg" referenceSequence="ATGAAACCCGGG">
                    <protein abbreviation="P1" startPosition="1" stopPosition="6"/>
                    <protein abbreviation="P2" startPosition="7" stopPosition="12"/>
                </openReadingFrame>
            </genome>
        </genomes>"#;
        let reference = parse(xml).unwrap();
        assert_eq!(reference.regions.len(), 2);
        assert_eq!(reference.regions[0].name, "P1");
        assert_eq!(reference.regions[1].name, "P2");
    }

    #[test]
    fn rejects_non_multiple_of_three() {
        let xml = r#"<orf name="seg" referenceSequence="ATGGCCTG"/>"#;
        assert!(parse(xml).is_err());
    }
}
