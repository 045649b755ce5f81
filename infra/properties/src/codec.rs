//! Reading and writing the `.properties` text format.
//!
//! Reading accepts everything a `java.util.Properties` loader accepts: `#`/`!` comments,
//! `=`, `:` or whitespace separators, backslash line continuations and `\t \n \r \f \uXXXX`
//! escapes. Writing always produces one `key=value` line per entry in the order given, with
//! every character outside printable ASCII escaped, so the output is plain ASCII.

use crate::error::PropertiesError;
use std::fmt::Write as _;

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Decodes raw file bytes. UTF-8 is tried first; anything else is read as ISO-8859-1.
pub(crate) fn text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

/// Parses the pairs in file order. Later duplicates are kept; the caller decides who wins.
///
/// # Errors
/// Returns [`PropertiesError::Malformed`] for a broken `\uXXXX` escape or an unpaired
/// UTF-16 surrogate. The line number is that of the first physical line of the entry.
pub(crate) fn decode(text: &str) -> Result<Vec<(String, String)>, PropertiesError> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut physical = normalized.split('\n').enumerate();
    let mut pairs = Vec::new();

    while let Some((index, raw)) = physical.next() {
        let line = raw.trim_start_matches(WHITESPACE);
        if line.is_empty() || line.starts_with(['#', '!']) {
            continue;
        }

        let mut logical = line.to_owned();
        while continues(&logical) {
            logical.pop();
            match physical.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                None => break,
            }
        }

        pairs.push(split_pair(&logical, index + 1)?);
    }

    Ok(pairs)
}

/// An odd run of trailing backslashes joins the next physical line.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_pair(line: &str, line_no: usize) -> Result<(String, String), PropertiesError> {
    let chars: Vec<char> = line.chars().collect();

    let mut key_end = chars.len();
    let mut has_separator = false;
    let mut escaped = false;
    for (i, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' {
            key_end = i;
            has_separator = true;
            break;
        } else if WHITESPACE.contains(&c) {
            key_end = i;
            break;
        }
    }

    let mut value_start = (key_end + 1).min(chars.len());
    while let Some(&c) = chars.get(value_start) {
        if WHITESPACE.contains(&c) {
            value_start += 1;
        } else if !has_separator && (c == '=' || c == ':') {
            has_separator = true;
            value_start += 1;
        } else {
            break;
        }
    }

    let key = unescape(&chars[..key_end], line_no)?;
    let value = unescape(&chars[value_start..], line_no)?;
    Ok((key, value))
}

fn unescape(chars: &[char], line_no: usize) -> Result<String, PropertiesError> {
    let mut units: Vec<u16> = Vec::with_capacity(chars.len());
    let mut iter = chars.iter().copied();

    while let Some(c) = iter.next() {
        if c != '\\' {
            let mut buf = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }

        let decoded = match iter.next() {
            None => break,
            Some('t') => '\t',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('f') => '\x0c',
            Some('u') => {
                let hex: String = iter.by_ref().take(4).collect();
                let unit = (hex.len() == 4)
                    .then(|| u16::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .ok_or_else(|| malformed(line_no, format!("invalid escape \\u{hex}")))?;
                units.push(unit);
                continue;
            },
            Some(other) => other,
        };
        let mut buf = [0u16; 2];
        units.extend_from_slice(decoded.encode_utf16(&mut buf));
    }

    String::from_utf16(&units).map_err(|_| malformed(line_no, "unpaired UTF-16 surrogate".into()))
}

fn malformed(line: usize, message: String) -> PropertiesError {
    PropertiesError::Malformed { line, message: message.into(), context: None }
}

/// Renders a complete file. `entries` must already be in the desired order.
pub(crate) fn encode<'a, I>(header: Option<&str>, entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();

    if let Some(header) = header {
        out.push('#');
        for c in header.chars() {
            match c {
                '\r' | '\n' => out.push(' '),
                c => push_ascii(&mut out, c),
            }
        }
        out.push('\n');
    }

    for (key, value) in entries {
        escape(&mut out, key, true);
        out.push('=');
        escape(&mut out, value, false);
        out.push('\n');
    }

    out
}

fn escape(out: &mut String, text: &str, is_key: bool) {
    for (i, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '\\' | '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            },
            c => push_ascii(out, c),
        }
    }
}

fn push_ascii(out: &mut String, c: char) {
    if (' '..='~').contains(&c) {
        out.push(c);
        return;
    }
    let mut buf = [0u16; 2];
    for unit in c.encode_utf16(&mut buf) {
        let _ = write!(out, "\\u{unit:04X}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(text: &str) -> Vec<(String, String)> {
        decode(text).expect("valid properties")
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_owned(), value.to_owned())
    }

    #[test]
    fn separators_and_whitespace() {
        let parsed = pairs("a=1\nb: 2\nc 3\n  d   =   4\ne\nf=\n");
        assert_eq!(
            parsed,
            vec![
                pair("a", "1"),
                pair("b", "2"),
                pair("c", "3"),
                pair("d", "4"),
                pair("e", ""),
                pair("f", ""),
            ]
        );
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let parsed = pairs("#Generated by kiln\n! also a comment\n\n   \nkey=value # not a comment\n");
        assert_eq!(parsed, vec![pair("key", "value # not a comment")]);
    }

    #[test]
    fn continuation_joins_lines_and_strips_indent() {
        let parsed = pairs("list=alpha, \\\n      beta, \\\n      gamma\nnext=1\n");
        assert_eq!(parsed, vec![pair("list", "alpha, beta, gamma"), pair("next", "1")]);
    }

    #[test]
    fn even_backslashes_do_not_continue() {
        let parsed = pairs("path=C:\\\\\nother=x\n");
        assert_eq!(parsed, vec![pair("path", "C:\\"), pair("other", "x")]);
    }

    #[test]
    fn trailing_continuation_at_eof_is_dropped() {
        assert_eq!(pairs("dangling=end\\"), vec![pair("dangling", "end")]);
    }

    #[test]
    fn escapes_in_keys_and_values() {
        let parsed = pairs("my\\ key\\=x=tab\\there\nuni=caf\\u00e9\nemoji=\\uD83D\\uDE00\n");
        assert_eq!(
            parsed,
            vec![pair("my key=x", "tab\there"), pair("uni", "café"), pair("emoji", "😀")]
        );
    }

    #[test]
    fn crlf_and_cr_line_endings() {
        assert_eq!(pairs("a=1\r\nb=2\rc=3"), vec![pair("a", "1"), pair("b", "2"), pair("c", "3")]);
    }

    #[test]
    fn broken_unicode_escape_reports_line() {
        let err = decode("ok=1\n\nbad=\\u12G4\n").expect_err("malformed escape");
        assert!(matches!(err, PropertiesError::Malformed { line: 3, .. }), "{err}");

        let err = decode("short=\\u12").expect_err("truncated escape");
        assert!(matches!(err, PropertiesError::Malformed { line: 1, .. }));

        let err = decode("lonely=\\uD83D").expect_err("unpaired surrogate");
        assert!(matches!(err, PropertiesError::Malformed { line: 1, .. }));
    }

    #[test]
    fn latin1_fallback_for_non_utf8_bytes() {
        assert_eq!(text(vec![b'k', b'=', 0xE9]), "k=é");
        assert_eq!(text("k=é".as_bytes().to_vec()), "k=é");
    }

    #[test]
    fn encode_escapes_to_plain_ascii() {
        let out = encode(
            None,
            [("a key", " lead and trail "), ("x=y:z", "#!\\"), ("uni", "café😀"), ("nl", "a\nb\t")],
        );
        assert_eq!(
            out,
            "a\\ key=\\ lead and trail \n\
             x\\=y\\:z=\\#\\!\\\\\n\
             uni=caf\\u00E9\\uD83D\\uDE00\n\
             nl=a\\nb\\t\n"
        );
        assert!(out.is_ascii());
    }

    #[test]
    fn encode_writes_single_header_line() {
        let out = encode(Some("Generated by kiln\nsecond"), [("k", "v")]);
        assert_eq!(out, "#Generated by kiln second\nk=v\n");
    }

    #[test]
    fn decode_reads_back_what_encode_writes() {
        let original = vec![
            pair(" spaced key ", " spaced value "),
            pair("equals=colon:", "hash#bang!"),
            pair("multi", "line one\nline two\r\n"),
            pair("unicode", "ünïcödé ✓ 😀"),
            pair("empty", ""),
        ];
        let rendered = encode(
            Some("header"),
            original.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
        assert_eq!(decode(&rendered).unwrap(), original);
    }
}
