//! Data model for sequences and alignments.
//!
//! This module contains the in-memory containers the PHYLIP codec
//! reads into and writes from:
//! - `Sequence`: one identifier plus its residues
//! - `SequenceCollection`: ordered sequences with unique identifiers
//! - `Alignment`: a collection whose sequences all share one length

use std::collections::HashSet;

use thiserror::Error;

/// Errors raised when building a collection or an alignment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
    #[error("Duplicate sequence identifier: '{0}'")]
    DuplicateId(String),

    #[error("Sequence '{id}' has length {found}, expected {expected}")]
    UnequalLengths {
        id: String,
        expected: usize,
        found: usize,
    },
}

/// The residue alphabet a sequence is interpreted under.
///
/// No alphabet validation happens on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceType {
    #[default]
    Generic,
    Dna,
    Rna,
    Protein,
}

impl std::fmt::Display for SequenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceType::Generic => write!(f, "generic"),
            SequenceType::Dna => write!(f, "DNA"),
            SequenceType::Rna => write!(f, "RNA"),
            SequenceType::Protein => write!(f, "protein"),
        }
    }
}

/// Represents a single sequence with its identifier and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier
    pub id: String,
    /// The residues, whitespace already removed
    pub data: String,
    /// Alphabet the residues are interpreted under
    pub sequence_type: SequenceType,
}

impl Sequence {
    /// Creates a new generic sequence.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self::with_type(id, data, SequenceType::Generic)
    }

    /// Creates a new sequence of the given type.
    pub fn with_type(
        id: impl Into<String>,
        data: impl Into<String>,
        sequence_type: SequenceType,
    ) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
            sequence_type,
        }
    }

    /// Returns the length of the sequence in residues.
    pub fn len(&self) -> usize {
        self.data.chars().count()
    }

    /// Returns true if the sequence has no residues.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the residues as a string slice.
    pub fn as_str(&self) -> &str {
        &self.data
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.data)
    }
}

fn check_unique_ids(sequences: &[Sequence]) -> Result<(), ModelError> {
    let mut seen = HashSet::with_capacity(sequences.len());
    for seq in sequences {
        if !seen.insert(seq.id.as_str()) {
            return Err(ModelError::DuplicateId(seq.id.clone()));
        }
    }
    Ok(())
}

/// An ordered set of sequences with unique identifiers.
///
/// Lengths may differ between members.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SequenceCollection {
    sequences: Vec<Sequence>,
}

impl SequenceCollection {
    /// Creates a collection, rejecting duplicate identifiers.
    pub fn new(sequences: Vec<Sequence>) -> Result<Self, ModelError> {
        check_unique_ids(&sequences)?;
        Ok(Self { sequences })
    }

    /// Returns the number of sequences.
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Returns true if the collection holds no sequences.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Identifiers in collection order.
    pub fn ids(&self) -> Vec<&str> {
        self.sequences.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.sequences.iter()
    }

    pub fn into_sequences(self) -> Vec<Sequence> {
        self.sequences
    }
}

impl<'a> IntoIterator for &'a SequenceCollection {
    type Item = &'a Sequence;
    type IntoIter = std::slice::Iter<'a, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.iter()
    }
}

/// Represents an alignment of multiple sequences.
///
/// Every identifier is unique and every sequence has the same length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alignment {
    sequences: Vec<Sequence>,
    sequence_length: usize,
}

impl Alignment {
    /// Creates a new alignment from a vector of sequences.
    pub fn new(sequences: Vec<Sequence>) -> Result<Self, ModelError> {
        check_unique_ids(&sequences)?;
        let sequence_length = Self::validate_lengths(&sequences)?;
        Ok(Self {
            sequences,
            sequence_length,
        })
    }

    /// Validates that all sequences have the same length.
    fn validate_lengths(sequences: &[Sequence]) -> Result<usize, ModelError> {
        let Some(first) = sequences.first() else {
            return Ok(0);
        };
        let expected = first.len();
        for seq in &sequences[1..] {
            let found = seq.len();
            if found != expected {
                return Err(ModelError::UnequalLengths {
                    id: seq.id.clone(),
                    expected,
                    found,
                });
            }
        }
        Ok(expected)
    }

    /// Returns the number of sequences.
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Returns the shared length of the sequences (0 when empty).
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    /// Returns true if the alignment is empty.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Identifiers in alignment order.
    pub fn ids(&self) -> Vec<&str> {
        self.sequences.iter().map(|s| s.id.as_str()).collect()
    }

    /// Returns the maximum identifier length in characters.
    pub fn max_id_length(&self) -> usize {
        self.sequences
            .iter()
            .map(|s| s.id.chars().count())
            .max()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.sequences.iter()
    }
}

impl<'a> IntoIterator for &'a Alignment {
    type Item = &'a Sequence;
    type IntoIter = std::slice::Iter<'a, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.iter()
    }
}

impl TryFrom<SequenceCollection> for Alignment {
    type Error = ModelError;

    fn try_from(collection: SequenceCollection) -> Result<Self, Self::Error> {
        Alignment::new(collection.into_sequences())
    }
}
