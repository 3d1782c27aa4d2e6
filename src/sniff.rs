//! Input format detection from a leading byte sample.
//!
//! The input file's encoding and CSV dialect are detected once, from the
//! first [`SAMPLE_LEN`] bytes of the stream. Callers read the sample, run
//! [`sniff`], then seek back to offset 0 and parse the whole stream with
//! the detected [`Format`].

use encoding_rs::{Encoding, UTF_8};

use crate::error::{SniffError, SniffResult};

/// Number of leading bytes inspected during format detection.
pub const SAMPLE_LEN: usize = 16384;

/// Delimiters considered during detection.
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Lexical conventions of a delimited input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character (standard double-quote convention).
    pub quote: u8,
}

/// Detected input format: character encoding plus CSV dialect.
#[derive(Debug, Clone, Copy)]
pub struct Format {
    pub encoding: &'static Encoding,
    pub dialect: Dialect,
}

/// Detect the encoding and dialect of an input file from its leading sample.
///
/// The sample must start at offset 0 of the stream. Fails with
/// [`SniffError::EmptyInput`] on an empty sample and
/// [`SniffError::NoDelimiter`] when no candidate delimiter occurs a
/// consistent, nonzero number of times per line.
pub fn sniff(sample: &[u8]) -> SniffResult<Format> {
    if sample.is_empty() {
        return Err(SniffError::EmptyInput);
    }

    let encoding = detect_encoding(sample);
    let (text, _, _) = encoding.decode(sample);

    // A sample that filled the buffer was usually cut mid-line.
    let truncated = sample.len() >= SAMPLE_LEN;
    let delimiter = detect_delimiter(&text, truncated)?;

    Ok(Format {
        encoding,
        dialect: Dialect {
            delimiter,
            quote: b'"',
        },
    })
}

/// Detect the character encoding of raw bytes using chardet.
fn detect_encoding(sample: &[u8]) -> &'static Encoding {
    let (charset, _confidence, _language) = chardet::detect(sample);
    Encoding::for_label(chardet::charset2encoding(&charset).as_bytes()).unwrap_or(UTF_8)
}

/// Detect the field delimiter from decoded sample text.
///
/// A candidate wins when it appears the same nonzero number of times in
/// every sampled line, counting only occurrences outside double quotes.
/// When several candidates qualify, the most frequent one wins.
fn detect_delimiter(text: &str, truncated: bool) -> SniffResult<u8> {
    let lines = sample_lines(text, truncated);
    if lines.is_empty() {
        return Err(SniffError::EmptyInput);
    }

    let mut best: Option<(u8, usize)> = None;
    for &candidate in &DELIMITER_CANDIDATES {
        let per_line = unquoted_count(lines[0], candidate);
        if per_line == 0 {
            continue;
        }
        if lines[1..]
            .iter()
            .any(|line| unquoted_count(line, candidate) != per_line)
        {
            continue;
        }
        if best.map_or(true, |(_, count)| per_line > count) {
            best = Some((candidate, per_line));
        }
    }

    best.map(|(delimiter, _)| delimiter)
        .ok_or(SniffError::NoDelimiter)
}

/// Split sample text into the complete, non-empty lines usable for counting.
fn sample_lines(text: &str, truncated: bool) -> Vec<&str> {
    let mut lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .collect();

    // The last line of a truncated sample may be cut mid-record. Drop it
    // unless it is the only line we have.
    if truncated && !text.ends_with('\n') && lines.len() > 1 {
        lines.pop();
    }

    lines.retain(|line| !line.trim().is_empty());
    lines
}

/// Count occurrences of `needle` in a line, ignoring quoted sections.
fn unquoted_count(line: &str, needle: u8) -> usize {
    let mut count = 0;
    let mut in_quotes = false;
    for &byte in line.as_bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if byte == needle && !in_quotes {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_comma() {
        let format = sniff(b"a,b,c\n1,2,3\n4,5,6\n").unwrap();
        assert_eq!(format.dialect.delimiter, b',');
        assert_eq!(format.dialect.quote, b'"');
    }

    #[test]
    fn test_detect_semicolon() {
        let format = sniff(b"a;b;c\n1;2;3\n").unwrap();
        assert_eq!(format.dialect.delimiter, b';');
    }

    #[test]
    fn test_detect_tab() {
        let format = sniff(b"a\tb\tc\n1\t2\t3\n").unwrap();
        assert_eq!(format.dialect.delimiter, b'\t');
    }

    #[test]
    fn test_quoted_delimiters_not_counted() {
        // The comma inside quotes must not break per-line consistency.
        let format = sniff(b"a;b\n\"x,,,y\";2\n\"p\";3\n").unwrap();
        assert_eq!(format.dialect.delimiter, b';');
    }

    #[test]
    fn test_inconsistent_counts_rejected() {
        let err = sniff(b"a b c\n1 2\n").unwrap_err();
        assert!(matches!(err, SniffError::NoDelimiter));
    }

    #[test]
    fn test_single_column_rejected() {
        let err = sniff(b"header\nvalue\n").unwrap_err();
        assert!(matches!(err, SniffError::NoDelimiter));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = sniff(b"").unwrap_err();
        assert!(matches!(err, SniffError::EmptyInput));
    }

    #[test]
    fn test_no_trailing_newline() {
        let format = sniff(b"a,b\n1,2").unwrap();
        assert_eq!(format.dialect.delimiter, b',');
    }

    #[test]
    fn test_truncated_sample_drops_partial_line() {
        // Build a sample that fills the buffer and is cut mid-record.
        let mut sample = Vec::new();
        while sample.len() < SAMPLE_LEN {
            sample.extend_from_slice(b"aaa,bbb,ccc\n");
        }
        sample.truncate(SAMPLE_LEN);
        let format = sniff(&sample).unwrap();
        assert_eq!(format.dialect.delimiter, b',');
    }

    #[test]
    fn test_detect_latin1_encoding() {
        // "Société;ville\n..." with an ISO-8859-1 e-acute (0xE9).
        let mut sample = b"Soci\xE9t\xE9;ville\n".to_vec();
        for _ in 0..50 {
            sample.extend_from_slice(b"Caf\xE9 M\xFCller;Paris\n");
        }
        let format = sniff(&sample).unwrap();
        assert_eq!(format.dialect.delimiter, b';');
        let (decoded, _, _) = format.encoding.decode(&sample);
        assert!(decoded.contains("Société"));
    }
}
