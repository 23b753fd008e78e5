//! Strict, sequential PHYLIP writer.

use std::io::Write;

use log::info;

use super::ids::{is_delimiter, ID_WIDTH};
use super::{PhylipError, PhylipResult};
use crate::model::Alignment;

/// Width of the space separated residue groups on each output row.
pub const CHUNK_SIZE: usize = 10;

/// Splits `residues` into groups of `size` characters joined by `sep`.
pub fn chunk_residues(residues: &str, size: usize, sep: char) -> String {
    let mut out = String::with_capacity(residues.len() + residues.len() / size.max(1));
    for (i, c) in residues.chars().enumerate() {
        if i > 0 && size > 0 && i % size == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

fn validate(alignment: &Alignment) -> PhylipResult<()> {
    if alignment.is_empty() {
        return Err(PhylipError::EmptyAlignment);
    }
    if alignment.sequence_length() == 0 {
        return Err(PhylipError::ZeroLengthSequences);
    }
    if alignment.max_id_length() > ID_WIDTH {
        let id = alignment
            .ids()
            .into_iter()
            .find(|id| id.chars().count() > ID_WIDTH)
            .unwrap_or_default();
        return Err(PhylipError::IdTooLong {
            id: id.to_string(),
            width: ID_WIDTH,
        });
    }
    // Padding is indistinguishable from trailing spaces once written.
    if let Some(id) = alignment.ids().into_iter().find(|id| id.ends_with(is_delimiter)) {
        return Err(PhylipError::IdTrailingWhitespace(id.to_string()));
    }
    Ok(())
}

/// Writes an alignment as strict, sequential PHYLIP.
///
/// The header is `"<count> <length>"`. Each row is the identifier padded
/// to 10 characters followed by the residues in groups of 10. Nothing is
/// written unless the alignment is non-empty, has at least one column and
/// all identifiers fit in 10 characters without trailing whitespace.
pub fn write_alignment<W: Write + ?Sized>(alignment: &Alignment, writer: &mut W) -> PhylipResult<()> {
    validate(alignment)?;

    writeln!(
        writer,
        "{} {}",
        alignment.sequence_count(),
        alignment.sequence_length()
    )?;
    for seq in alignment {
        writeln!(
            writer,
            "{:<width$}{}",
            seq.id,
            chunk_residues(seq.as_str(), CHUNK_SIZE, ' '),
            width = ID_WIDTH
        )?;
    }
    writer.flush()?;

    info!(
        "Wrote {} sequences of length {} in PHYLIP format",
        alignment.sequence_count(),
        alignment.sequence_length()
    );
    Ok(())
}
