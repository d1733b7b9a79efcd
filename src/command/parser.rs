//! Front end of the response decoders.
//!
//! Data lines are picked out of a reply by their `+CMD:` prefix and decoded
//! one at a time with `atat::serde_at`. Field counts are checked here first,
//! so a short or overlong line is reported as such rather than as whatever
//! the deserializer trips over.

use core::ops::RangeInclusive;

use serde::de::DeserializeOwned;

use crate::error::ParseError;

/// Every line of `raw` that starts with `prefix`, trimmed.
pub(crate) fn data_lines<'a>(
    raw: &'a str,
    prefix: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    raw.split(['\r', '\n'])
        .map(str::trim)
        .filter(move |line| line.starts_with(prefix))
}

/// First line that starts with `prefix`.
pub(crate) fn data_line<'a>(raw: &'a str, prefix: &'a str) -> Result<&'a str, ParseError> {
    data_lines(raw, prefix)
        .next()
        .ok_or(ParseError::MissingPrefix)
}

/// The field list of a line, without its `+CMD:` prefix.
fn payload(line: &str) -> &str {
    match line.strip_prefix('+') {
        Some(rest) => rest.split_once(':').map_or(line, |(_, p)| p),
        None => line,
    }
}

/// Byte offsets of the separating commas. Commas inside `"..."` do not count.
fn separators(payload: &str) -> impl Iterator<Item = usize> + '_ {
    let mut quoted = false;
    payload.char_indices().filter_map(move |(i, c)| match c {
        '"' => {
            quoted = !quoted;
            None
        }
        ',' if !quoted => Some(i),
        _ => None,
    })
}

pub(crate) fn field_count(line: &str) -> usize {
    separators(payload(line)).count() + 1
}

/// Fail with `FieldCountMismatch` unless the line has an allowed number of
/// fields.
pub(crate) fn expect_fields(line: &str, allowed: RangeInclusive<usize>) -> Result<usize, ParseError> {
    let n = field_count(line);
    if !allowed.contains(&n) {
        return Err(ParseError::FieldCountMismatch);
    }
    Ok(n)
}

/// The line cut after its first `n` fields.
pub(crate) fn leading_fields(line: &str, n: usize) -> &str {
    let offset = line.len() - payload(line).len();
    match separators(payload(line)).nth(n.saturating_sub(1)) {
        Some(i) => &line[..offset + i],
        None => line,
    }
}

/// Decode one line, or a bare argument list, with `atat::serde_at`.
pub(crate) fn decode<T: DeserializeOwned>(line: &str) -> Result<T, ParseError> {
    Ok(atat::serde_at::de::from_str(line)?)
}

/// Decode the first argument of a write command into a one-field response.
pub(crate) fn echoed<T: DeserializeOwned>(args: Option<&str>) -> Option<T> {
    decode(leading_fields(args?, 1)).ok()
}

/// Range check of an already decoded value.
pub(crate) fn bounded<T: PartialOrd>(value: T, range: RangeInclusive<T>) -> Result<T, ParseError> {
    if !range.contains(&value) {
        return Err(ParseError::OutOfRange);
    }
    Ok(value)
}

/// `0`/`1` flag.
pub(crate) fn flag(value: u8) -> Result<bool, ParseError> {
    Ok(bounded(value, 0..=1)? == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atat::atat_derive::AtatResp;
    use heapless::String;

    #[derive(Debug, PartialEq, AtatResp)]
    struct Name {
        #[at_arg(position = 0)]
        name: String<4>,
    }

    #[test]
    fn fields_honour_quotes() {
        assert_eq!(field_count(r#"+CNCFG: 0,1,"a,b","","",3"#), 6);
        assert_eq!(field_count("+CSQ: 17,99"), 2);
        assert_eq!(field_count("1"), 1);
        assert_eq!(
            expect_fields("+CSQ: 1,2,3", 2..=2),
            Err(ParseError::FieldCountMismatch)
        );
    }

    #[test]
    fn cut_after_fields() {
        let line = r#"+CGDCONT: 1,"IP","a,b","0.0.0.0",0,0,0,0"#;
        assert_eq!(
            leading_fields(line, 6),
            r#"+CGDCONT: 1,"IP","a,b","0.0.0.0",0,0"#
        );
        assert_eq!(leading_fields("+CSQ: 17,99", 6), "+CSQ: 17,99");
        assert_eq!(leading_fields("0,1", 1), "0");
    }

    #[test]
    fn prefix_lookup_skips_echo() {
        let raw = "AT+CSQ\r\r\n+CSQ: 17,99\r\n\r\nOK\r\n";
        assert_eq!(data_line(raw, "+CSQ:"), Ok("+CSQ: 17,99"));
        assert_eq!(data_line(raw, "+CPIN:"), Err(ParseError::MissingPrefix));
    }

    #[test]
    fn bounded_values() {
        assert_eq!(bounded(31u8, 0..=31), Ok(31));
        assert_eq!(bounded(32u8, 0..=31), Err(ParseError::OutOfRange));
        assert_eq!(flag(2), Err(ParseError::OutOfRange));
    }

    #[test]
    fn strings_do_not_truncate() {
        let n: Name = decode(r#"+NAME: "abcd""#).unwrap();
        assert_eq!(n.name.as_str(), "abcd");
        assert_eq!(
            decode::<Name>(r#"+NAME: "abcde""#),
            Err(ParseError::BufferTooSmall)
        );
    }
}
