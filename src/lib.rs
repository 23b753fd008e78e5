//! # phylipio - PHYLIP alignment codec
//!
//! Streaming reader, writer and sniffer for sequential PHYLIP multiple
//! sequence alignments.
//!
//! ## Architecture
//!
//! - `model`: Sequences, collections and alignments
//! - `formats::lines`: Lazy line reading shared by text formats
//! - `formats::phylip`: Header parsing, identifier strategies, the record
//!   decoder with its adapters, the writer and the sniffer
//! - `formats`: Format registry and file-level entry points
//!
//! ## Example
//!
//! ```
//! use phylipio::formats::phylip::{read_alignment, write_alignment, ReadOptions};
//! use phylipio::model::SequenceType;
//!
//! let input = "2 12\nseq1      ACGTACGTAC GT\nseq2      TGCATGCATG CA\n";
//! let alignment = read_alignment(input.as_bytes(), ReadOptions::default(), SequenceType::Dna).unwrap();
//! assert_eq!(alignment.ids(), vec!["seq1", "seq2"]);
//!
//! let mut out = Vec::new();
//! write_alignment(&alignment, &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), input);
//! ```

pub mod formats;
pub mod model;
