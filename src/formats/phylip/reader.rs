//! Streaming PHYLIP decoder and the adapters built on top of it.

use std::io::BufRead;

use log::debug;

use super::header::{parse_header, Header};
use super::ids::{strict_ids, IdParser};
use super::{PhylipError, PhylipResult};
use crate::formats::lines::LineSource;
use crate::model::{Alignment, Sequence, SequenceCollection, SequenceType};

/// Decoder settings.
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// Splits each row into `(residues, identifier)`
    pub id_parser: IdParser,
    /// Reserved for interleaved decoding; currently has no effect
    pub interleaved: bool,
    /// Raise on rows whose length disagrees with the header, and on a
    /// final row count that differs from the header
    pub strict: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            id_parser: strict_ids,
            interleaved: false,
            strict: false,
        }
    }
}

impl ReadOptions {
    pub fn id_parser(mut self, id_parser: IdParser) -> Self {
        self.id_parser = id_parser;
        self
    }

    pub fn interleaved(mut self, interleaved: bool) -> Self {
        self.interleaved = interleaved;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// One decoded alignment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub residues: String,
}

impl Record {
    /// Wraps the row into a sequence of the given type.
    pub fn into_sequence(self, sequence_type: SequenceType) -> Sequence {
        Sequence::with_type(self.id, self.residues, sequence_type)
    }
}

enum State {
    AwaitingHeader,
    Streaming(Header),
    Done,
}

/// Lazy, forward-only iterator over the rows of a PHYLIP stream.
///
/// The header is read on the first call to `next`. Rows whose residue
/// count differs from the header are skipped (or raised in strict mode).
/// After the first error the iterator is exhausted.
pub struct PhylipRecords<R> {
    lines: LineSource<R>,
    options: ReadOptions,
    state: State,
    yielded: usize,
}

impl<R: BufRead> PhylipRecords<R> {
    pub fn new(reader: R, options: ReadOptions) -> Self {
        Self {
            lines: LineSource::skipping_blanks(reader),
            options,
            state: State::AwaitingHeader,
            yielded: 0,
        }
    }

    /// The parsed header, once the first row has been requested.
    pub fn header(&self) -> Option<Header> {
        match self.state {
            State::Streaming(header) => Some(header),
            _ => None,
        }
    }

    fn read_header(&mut self) -> PhylipResult<Header> {
        let line = self.lines.next().ok_or(PhylipError::EmptyFile)??;
        let header = parse_header(&line)?;
        debug!(
            "PHYLIP header: {} sequences of length {}",
            header.sequence_count, header.sequence_length
        );
        Ok(header)
    }

    fn next_record(&mut self, header: Header) -> PhylipResult<Option<Record>> {
        while let Some(line) = self.lines.next() {
            let line = line?;
            let line_number = self.lines.line_number();
            let (residues, id) = (self.options.id_parser)(&line)
                .ok_or(PhylipError::MissingIdDelimiter { line: line_number })?;

            let found = residues.chars().count();
            if found == header.sequence_length {
                self.yielded += 1;
                return Ok(Some(Record { id, residues }));
            }

            if self.options.strict {
                return Err(PhylipError::SequenceLengthMismatch {
                    line: line_number,
                    id,
                    expected: header.sequence_length,
                    found,
                });
            }
            // TODO: stitch interleaved blocks here instead of skipping them
            debug!(
                "Line {line_number}: skipping '{id}' with {found} residues (expected {})",
                header.sequence_length
            );
        }

        if self.options.strict && self.yielded != header.sequence_count {
            return Err(PhylipError::SequenceCountMismatch {
                expected: header.sequence_count,
                found: self.yielded,
            });
        }
        Ok(None)
    }
}

impl<R: BufRead> Iterator for PhylipRecords<R> {
    type Item = PhylipResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let header = match self.state {
            State::Done => return None,
            State::Streaming(header) => header,
            State::AwaitingHeader => match self.read_header() {
                Ok(header) => {
                    self.state = State::Streaming(header);
                    header
                }
                Err(e) => {
                    self.state = State::Done;
                    return Some(Err(e));
                }
            },
        };

        match self.next_record(header) {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.state = State::Done;
                None
            }
            Err(e) => {
                self.state = State::Done;
                Some(Err(e))
            }
        }
    }
}

/// Streams the raw rows of a PHYLIP file.
pub fn read_records<R: BufRead>(reader: R, options: ReadOptions) -> PhylipRecords<R> {
    PhylipRecords::new(reader, options)
}

/// Streams the rows as sequences of the given type.
pub fn read_sequences<R: BufRead>(
    reader: R,
    options: ReadOptions,
    sequence_type: SequenceType,
) -> impl Iterator<Item = PhylipResult<Sequence>> {
    read_records(reader, options).map(move |r| r.map(|r| r.into_sequence(sequence_type)))
}

/// Returns the `seq_num`-th sequence (1-based), discarding earlier rows.
///
/// Rows after the requested one are not read.
pub fn read_nth_sequence<R: BufRead>(
    reader: R,
    options: ReadOptions,
    seq_num: usize,
    sequence_type: SequenceType,
) -> PhylipResult<Sequence> {
    let mut available = 0;
    if seq_num > 0 {
        for sequence in read_sequences(reader, options, sequence_type) {
            let sequence = sequence?;
            available += 1;
            if available == seq_num {
                return Ok(sequence);
            }
        }
    }
    Err(PhylipError::SequenceIndexOutOfRange {
        requested: seq_num,
        available,
    })
}

/// Reads every row into a collection. Identifiers must be unique.
pub fn read_collection<R: BufRead>(
    reader: R,
    options: ReadOptions,
    sequence_type: SequenceType,
) -> PhylipResult<SequenceCollection> {
    let sequences = read_sequences(reader, options, sequence_type).collect::<PhylipResult<_>>()?;
    Ok(SequenceCollection::new(sequences)?)
}

/// Reads every row into an alignment. Identifiers must be unique.
pub fn read_alignment<R: BufRead>(
    reader: R,
    options: ReadOptions,
    sequence_type: SequenceType,
) -> PhylipResult<Alignment> {
    let sequences = read_sequences(reader, options, sequence_type).collect::<PhylipResult<_>>()?;
    Ok(Alignment::new(sequences)?)
}
