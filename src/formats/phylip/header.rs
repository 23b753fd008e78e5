use super::{PhylipError, PhylipResult};

/// Dimensions declared on the first line of a PHYLIP file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Number of rows (sequences)
    pub sequence_count: usize,
    /// Number of columns (residues per sequence)
    pub sequence_length: usize,
}

/// Parses a header line: exactly two positive integers separated by
/// whitespace, with optional surrounding whitespace.
pub fn parse_header(line: &str) -> PhylipResult<Header> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(PhylipError::HeaderTokenCount {
            found: parts.len(),
            line: line.trim().to_string(),
        });
    }

    let mut values = [0usize; 2];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse()
            .map_err(|_| PhylipError::HeaderNotInteger(line.trim().to_string()))?;
    }

    let [sequence_count, sequence_length] = values;
    if sequence_count == 0 || sequence_length == 0 {
        return Err(PhylipError::HeaderNotPositive(line.trim().to_string()));
    }

    Ok(Header {
        sequence_count,
        sequence_length,
    })
}

/// Non-failing variant of [`parse_header`] for format probing.
pub fn probe_header(line: &str) -> Option<Header> {
    parse_header(line).ok()
}
