//! Format registry and file-level entry points.
//!
//! A [`FormatRegistry`] maps a format name to its sniffer, reader and
//! writer. The composing application builds one at start-up (usually with
//! [`FormatRegistry::with_defaults`]) and dispatches through it.
//!
//! Format detection priority:
//! 1. Explicit format name
//! 2. File extension
//! 3. Content-based detection (registered sniffers, in registration order)

pub mod lines;
pub mod phylip;

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::model::{Alignment, SequenceType};
use phylip::{ReadOptions, SniffMetadata};

/// Errors that can occur during file-level operations.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty file")]
    EmptyFile,

    #[error("Could not determine file format")]
    UnknownFormat,

    #[error("No registered format named '{0}'")]
    UnregisteredFormat(String),

    #[error("PHYLIP error: {0}")]
    PhylipError(#[from] phylip::PhylipError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Probes a stream; see [`phylip::sniff`].
pub type Sniffer = fn(&mut dyn BufRead) -> (bool, SniffMetadata);
/// Decodes a whole stream into an alignment.
pub type AlignmentReader = fn(&mut dyn BufRead, &ReadOptions) -> ParseResult<Alignment>;
/// Encodes an alignment to a stream.
pub type AlignmentWriter = fn(&Alignment, &mut dyn Write) -> ParseResult<()>;

/// One registered format.
#[derive(Clone, Copy)]
pub struct FormatEntry {
    pub name: &'static str,
    /// Lowercase file extensions, without the dot
    pub extensions: &'static [&'static str],
    pub sniffer: Sniffer,
    pub reader: AlignmentReader,
    pub writer: AlignmentWriter,
}

impl std::fmt::Debug for FormatEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatEntry")
            .field("name", &self.name)
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}

fn phylip_sniffer(reader: &mut dyn BufRead) -> (bool, SniffMetadata) {
    phylip::sniff(reader)
}

fn phylip_reader(reader: &mut dyn BufRead, options: &ReadOptions) -> ParseResult<Alignment> {
    Ok(phylip::read_alignment(reader, *options, SequenceType::Generic)?)
}

fn phylip_writer(alignment: &Alignment, writer: &mut dyn Write) -> ParseResult<()> {
    Ok(phylip::write_alignment(alignment, writer)?)
}

/// The PHYLIP registration.
pub const PHYLIP: FormatEntry = FormatEntry {
    name: "phylip",
    extensions: &["phy", "phylip", "ph"],
    sniffer: phylip_sniffer,
    reader: phylip_reader,
    writer: phylip_writer,
};

/// Name-to-format table owned by the composing application.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    entries: Vec<FormatEntry>,
}

impl FormatRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in format.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PHYLIP);
        registry
    }

    /// Adds a format, replacing any entry with the same name.
    pub fn register(&mut self, entry: FormatEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Looks a format up by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&FormatEntry> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    /// Detects format from file extension.
    pub fn detect_format_from_extension<P: AsRef<Path>>(&self, path: P) -> Option<&FormatEntry> {
        let ext = path.as_ref().extension().and_then(OsStr::to_str)?.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.extensions.contains(&ext.as_str()))
    }

    /// Detects the format of a file by running the sniffers on its content.
    ///
    /// The file is reopened for every sniffer, so no rewinding is needed.
    pub fn detect_format_from_content<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> ParseResult<Option<&FormatEntry>> {
        for entry in &self.entries {
            let mut reader = BufReader::new(File::open(&path)?);
            let (is_match, _) = (entry.sniffer)(&mut reader);
            if is_match {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }

    /// Detects the format of a file: extension first, then content.
    pub fn detect_format<P: AsRef<Path>>(&self, path: P) -> ParseResult<&FormatEntry> {
        if let Some(entry) = self.detect_format_from_extension(&path) {
            debug!("Format '{}' detected from extension", entry.name);
            return Ok(entry);
        }
        match self.detect_format_from_content(&path)? {
            Some(entry) => {
                debug!("Format '{}' detected from content", entry.name);
                Ok(entry)
            }
            None => Err(ParseError::UnknownFormat),
        }
    }

    /// Resolves an explicit format name, or detects one from the file.
    pub fn resolve<P: AsRef<Path>>(
        &self,
        path: P,
        forced_format: Option<&str>,
    ) -> ParseResult<&FormatEntry> {
        match forced_format {
            Some(name) => self
                .get(name)
                .ok_or_else(|| ParseError::UnregisteredFormat(name.to_string())),
            None => self.detect_format(path),
        }
    }

    /// Parses an alignment file with optional format specification.
    pub fn parse_file_with_options<P: AsRef<Path>>(
        &self,
        path: P,
        forced_format: Option<&str>,
        options: &ReadOptions,
    ) -> ParseResult<Alignment> {
        let entry = self.resolve(&path, forced_format)?;
        let mut reader = open_nonempty(&path)?;
        (entry.reader)(&mut reader, options)
    }

    /// Writes an alignment in the named format.
    pub fn write<W: Write>(
        &self,
        format: &str,
        alignment: &Alignment,
        writer: &mut W,
    ) -> ParseResult<()> {
        let entry = self
            .get(format)
            .ok_or_else(|| ParseError::UnregisteredFormat(format.to_string()))?;
        (entry.writer)(alignment, writer)
    }
}

/// Opens a file for buffered reading, rejecting empty files.
pub fn open_nonempty<P: AsRef<Path>>(path: P) -> ParseResult<BufReader<File>> {
    let file = File::open(&path)?;
    if file.metadata()?.len() == 0 {
        return Err(ParseError::EmptyFile);
    }
    Ok(BufReader::with_capacity(1024 * 1024, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["phylip"]);
        assert_eq!(registry.get("PHYLIP").map(|e| e.name), Some("phylip"));
        assert!(registry.get("fasta").is_none());
    }

    #[test]
    fn test_register_replaces_same_name() {
        fn never(_: &mut dyn BufRead) -> (bool, SniffMetadata) {
            (false, SniffMetadata::new())
        }

        let mut registry = FormatRegistry::with_defaults();
        registry.register(FormatEntry {
            sniffer: never,
            ..PHYLIP
        });
        assert_eq!(registry.names().len(), 1);

        let mut content = "2 5\na         ACCGT\n".as_bytes();
        let entry = registry.get("phylip").unwrap();
        assert!(!(entry.sniffer)(&mut content).0);
    }

    #[test]
    fn test_detect_from_extension() {
        let registry = FormatRegistry::with_defaults();
        for path in ["test.phy", "test.phylip", "test.PH", "dir/x.Phy"] {
            assert_eq!(
                registry.detect_format_from_extension(path).map(|e| e.name),
                Some("phylip"),
                "{path}"
            );
        }
        assert!(registry.detect_format_from_extension("test.fasta").is_none());
        assert!(registry.detect_format_from_extension("noext").is_none());
    }

    #[test]
    fn test_registered_sniffer_on_stream() {
        let registry = FormatRegistry::with_defaults();
        let entry = registry.get("phylip").unwrap();
        let mut good = "2 5\na         ACCGT\n".as_bytes();
        let mut bad = ">seq1\nACGT\n".as_bytes();
        assert!((entry.sniffer)(&mut good).0);
        assert!(!(entry.sniffer)(&mut bad).0);
    }

    #[test]
    fn test_write_through_registry() {
        use crate::model::Sequence;

        let registry = FormatRegistry::with_defaults();
        let alignment = Alignment::new(vec![Sequence::new("a", "ACGT")]).unwrap();
        let mut out = Vec::new();
        registry.write("phylip", &alignment, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 4\na         ACGT\n");

        assert!(matches!(
            registry.write("nexus", &alignment, &mut Vec::new()),
            Err(ParseError::UnregisteredFormat(_))
        ));
    }
}
