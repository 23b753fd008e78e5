//! Splitting of alignment rows into residues and identifier.
//!
//! Both strategies return `(residues, identifier)`. Residues always have
//! every ASCII whitespace character removed, so chunked rows such as
//! `ACGTACGTAC GTA` decode to `ACGTACGTACGTA`. Other Unicode spaces are
//! kept as residues.

/// Fixed identifier width of strict PHYLIP.
pub const ID_WIDTH: usize = 10;

/// Row tokenizer handed to the reader.
///
/// Returns `None` when the row cannot be split.
pub type IdParser = fn(&str) -> Option<(String, String)>;

/// Space, tab, newline, carriage return, vertical tab and form feed.
pub fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|&c| !is_delimiter(c)).collect()
}

/// Strict identifiers: the first [`ID_WIDTH`] characters of the row.
pub fn strict_ids(line: &str) -> Option<(String, String)> {
    strict_ids_with_width(line, ID_WIDTH)
}

/// Strict identifiers with a custom field width.
///
/// The identifier keeps leading and embedded spaces; the trailing padding
/// added by writers is dropped, so an identifier that really ends in
/// spaces cannot be recovered. Writers reject such identifiers. Rows
/// shorter than `width` are all identifier.
pub fn strict_ids_with_width(line: &str, width: usize) -> Option<(String, String)> {
    let split = line
        .char_indices()
        .nth(width)
        .map_or(line.len(), |(idx, _)| idx);
    let (id, rest) = line.split_at(split);
    Some((strip_whitespace(rest), id.trim_end_matches(' ').to_string()))
}

/// Relaxed identifiers: leading whitespace is ignored, then everything
/// before the next whitespace character is the identifier.
pub fn relaxed_ids(line: &str) -> Option<(String, String)> {
    let line = line.trim_start_matches(is_delimiter);
    let (pos, _) = line
        .char_indices()
        .skip(1)
        .find(|&(_, c)| is_delimiter(c))?;
    Some((strip_whitespace(&line[pos..]), line[..pos].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(parser: IdParser, line: &str) -> (String, String) {
        parser(line).unwrap()
    }

    #[test]
    fn test_strict_padded() {
        let (seq, id) = split(strict_ids, "seq1      ACCGTTGTA- GTAGCT");
        assert_eq!(id, "seq1");
        assert_eq!(seq, "ACCGTTGTA-GTAGCT");
    }

    #[test]
    fn test_strict_full_width() {
        let (seq, id) = split(strict_ids, "sequence-2A--GTCGAA- GTACCT");
        assert_eq!(id, "sequence-2");
        assert_eq!(seq, "A--GTCGAA-GTACCT");
    }

    #[test]
    fn test_strict_embedded_spaces() {
        let (seq, id) = split(strict_ids, "Salmo gairAAGCCTTGGC AGTGCAGGGT");
        assert_eq!(id, "Salmo gair");
        assert_eq!(seq, "AAGCCTTGGCAGTGCAGGGT");

        let (_, id) = split(strict_ids, "H. SapiensACCGG");
        assert_eq!(id, "H. Sapiens");
    }

    #[test]
    fn test_strict_empty_id() {
        let (seq, id) = split(strict_ids, "          ACGT");
        assert_eq!(id, "");
        assert_eq!(seq, "ACGT");
    }

    #[test]
    fn test_strict_short_line() {
        let (seq, id) = split(strict_ids, "abc");
        assert_eq!(id, "abc");
        assert_eq!(seq, "");
    }

    #[test]
    fn test_strict_strips_all_whitespace() {
        let (seq, _) = split(strict_ids, "x         AC GT\tAC  GT ");
        assert_eq!(seq, "ACGTACGT");
    }

    #[test]
    fn test_strict_multibyte_id() {
        let (seq, id) = split(strict_ids, "séquence_1ACGT");
        assert_eq!(id, "séquence_1");
        assert_eq!(seq, "ACGT");
    }

    #[test]
    fn test_strict_custom_width() {
        let (seq, id) = split(|l| strict_ids_with_width(l, 4), "abcdACGT");
        assert_eq!(id, "abcd");
        assert_eq!(seq, "ACGT");
    }

    #[test]
    fn test_relaxed() {
        let (seq, id) = split(relaxed_ids, "a_much_longer_name ACGT ACGT");
        assert_eq!(id, "a_much_longer_name");
        assert_eq!(seq, "ACGTACGT");

        let (seq, id) = split(relaxed_ids, "b\tTGCA");
        assert_eq!(id, "b");
        assert_eq!(seq, "TGCA");
    }

    #[test]
    fn test_relaxed_skips_leading_whitespace() {
        let (seq, id) = split(relaxed_ids, " x ACGT");
        assert_eq!(id, "x");
        assert_eq!(seq, "ACGT");

        let (seq, id) = split(relaxed_ids, "  \talpha AC GT");
        assert_eq!(id, "alpha");
        assert_eq!(seq, "ACGT");

        assert_eq!(relaxed_ids("   "), None);
    }

    #[test]
    fn test_only_ascii_whitespace_is_stripped() {
        let (seq, id) = split(strict_ids, "x         AC\u{a0}GT\x0bAC\u{3000}");
        assert_eq!(id, "x");
        assert_eq!(seq, "AC\u{a0}GTAC\u{3000}");

        let (seq, id) = split(relaxed_ids, "na\u{a0}me\x0bACGT");
        assert_eq!(id, "na\u{a0}me");
        assert_eq!(seq, "ACGT");
    }

    #[test]
    fn test_relaxed_without_delimiter() {
        assert_eq!(relaxed_ids("nodelimiter"), None);
        assert_eq!(relaxed_ids(""), None);
    }
}
