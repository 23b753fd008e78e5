//! PHYLIP format reader, writer and sniffer.
//!
//! Supports strict and relaxed identifiers in sequential layout.
//!
//! ## PHYLIP Format
//!
//! The first line contains the number of sequences and the sequence length:
//! ```text
//! 3 16
//! ```
//!
//! ### Sequential Format
//! Each row is a sequence identifier (10 chars, padded) followed by all of
//! its residues. Residues may be split into space separated chunks:
//! ```text
//! 3 16
//! seq1      ACCGTTGTA- GTAGCT
//! sequence-2A--GTCGAA- GTACCT
//! 3         AGAGTTGAAG GTATCT
//! ```
//!
//! ### Relaxed Identifiers
//! Some tools end the identifier at the first whitespace instead of at a
//! fixed column:
//! ```text
//! 2 8
//! a_longer_name ACGTACGT
//! b TGCATGCA
//! ```
//!
//! Interleaved files are not decoded: rows whose residue count does not
//! match the header are skipped unless strict mode is enabled.

mod header;
mod ids;
mod reader;
mod writer;

use std::collections::HashMap;
use std::io::BufRead;

use log::debug;
use thiserror::Error;

use super::lines::LineSource;
use crate::model::ModelError;

pub use header::{parse_header, probe_header, Header};
pub use ids::{is_delimiter, relaxed_ids, strict_ids, strict_ids_with_width, IdParser, ID_WIDTH};
pub use reader::{
    read_alignment, read_collection, read_nth_sequence, read_records, read_sequences,
    PhylipRecords, ReadOptions, Record,
};
pub use writer::{chunk_residues, write_alignment, CHUNK_SIZE};

/// Errors that can occur during PHYLIP reading and writing.
#[derive(Error, Debug)]
pub enum PhylipError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty PHYLIP file")]
    EmptyFile,

    #[error("Invalid header: header must contain exactly two integers, found {found} elements in '{line}'")]
    HeaderTokenCount { found: usize, line: String },

    #[error("Invalid header: header values must be integers, got '{0}'")]
    HeaderNotInteger(String),

    #[error("Invalid header: header values must be positive, got '{0}'")]
    HeaderNotPositive(String),

    #[error("Line {line}: no identifier delimiter found")]
    MissingIdDelimiter { line: usize },

    #[error("Alignment can only be written in PHYLIP format if there is at least one sequence (empty alignment)")]
    EmptyAlignment,

    #[error("Alignment can only be written in PHYLIP format if there is at least one position (zero-length sequences)")]
    ZeroLengthSequences,

    #[error("Identifier exceeds width: '{id}' is longer than {width} characters")]
    IdTooLong { id: String, width: usize },

    #[error("Identifier '{0}' ends in whitespace, which is lost in the padded identifier field")]
    IdTrailingWhitespace(String),

    #[error("Requested sequence index out of range: asked for sequence {requested}, found {available}")]
    SequenceIndexOutOfRange { requested: usize, available: usize },

    #[error("Line {line}: sequence '{id}' has length {found}, expected {expected}")]
    SequenceLengthMismatch {
        line: usize,
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("Expected {expected} sequences but found {found}")]
    SequenceCountMismatch { expected: usize, found: usize },

    #[error("Invalid alignment: {0}")]
    InvalidAlignment(#[from] ModelError),
}

/// Result type for PHYLIP operations.
pub type PhylipResult<T> = Result<T, PhylipError>;

/// Metadata returned alongside a sniff verdict. PHYLIP never fills it.
pub type SniffMetadata = HashMap<String, String>;

/// Checks whether a stream plausibly holds a PHYLIP file.
///
/// Reads the first line as a header and then requires one more line to
/// exist; nothing past the second line is consumed. Malformed headers and
/// I/O failures give a negative verdict instead of an error.
pub fn sniff<R: BufRead + ?Sized>(reader: &mut R) -> (bool, SniffMetadata) {
    let mut lines = LineSource::new(reader);

    let is_match = match lines.next() {
        Some(Ok(line)) => match probe_header(&line) {
            Some(header) => {
                debug!(
                    "PHYLIP sniff: header {} x {}",
                    header.sequence_count, header.sequence_length
                );
                matches!(lines.next(), Some(Ok(_)))
            }
            None => false,
        },
        _ => false,
    };

    debug!("PHYLIP sniff result: {is_match}");
    (is_match, SniffMetadata::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_valid() {
        let content = "2 5\na         ACCGT\nb         ACCGT\n";
        let (is_match, metadata) = sniff(&mut content.as_bytes());
        assert!(is_match);
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_sniff_malformed_headers() {
        for content in ["", "\n", "5\nx\n", "1 2 3\nx\n", "a b\nx\n", "2 x\nx\n", ">seq1\nACGT\n"] {
            let (is_match, _) = sniff(&mut content.as_bytes());
            assert!(!is_match, "unexpected match for {content:?}");
        }
    }

    #[test]
    fn test_sniff_header_only() {
        let (is_match, _) = sniff(&mut "2 5\n".as_bytes());
        assert!(!is_match);
    }

    #[test]
    fn test_sniff_reads_two_lines_only() {
        let mut content = String::from("3 4\nnot really a record at all\n");
        for _ in 0..1000 {
            content.push_str("@@@ garbage that would never decode @@@\n");
        }
        let mut reader = content.as_bytes();
        let (is_match, _) = sniff(&mut reader);
        assert!(is_match);

        let rest = std::str::from_utf8(reader).unwrap();
        assert!(rest.starts_with("@@@ garbage"));
    }

    #[test]
    fn test_sniff_does_not_skip_leading_blank() {
        let (is_match, _) = sniff(&mut "\n2 5\na         ACCGT\n".as_bytes());
        assert!(!is_match);
    }
}
