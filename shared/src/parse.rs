//! Textual intake forms for sizing requests.
//!
//! Two mini-languages resolve to the same [`SizingRequest`]:
//! - keyed: `e1:0.5 e2:0.48 stop:0.52` (case-insensitive keys, unknown
//!   tokens ignored), used by the `/calc` command;
//! - positional: `0.5 0.48 0.52` (2 to 4 positive decimals, last one is
//!   the stop), used for plain chat messages.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::sizing::SizingRequest;

static KEYED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(e[123]|stop):([0-9.]+)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("duplicate {key} key")]
    DuplicateKey { key: String },
    #[error("at least one entry price (e1, e2, e3) is required")]
    MissingEntries,
    #[error("a stop price (stop:) is required")]
    MissingStop,
}

/// Parse the keyed `/calc` argument. Entries are kept in token order;
/// each key may appear at most once.
pub fn parse_keyed(input: &str) -> Result<SizingRequest, ParseError> {
    let mut entries = Vec::new();
    let mut stop = None;
    let mut seen: Vec<String> = Vec::new();

    for token in input.split_whitespace() {
        let Some(captures) = KEYED_TOKEN.captures(token) else {
            // Unknown tokens are ignored.
            continue;
        };
        let key = captures[1].to_lowercase();
        let raw = &captures[2];

        if seen.iter().any(|k| *k == key) {
            return Err(ParseError::DuplicateKey { key });
        }

        let value = parse_positive(raw).ok_or_else(|| ParseError::InvalidValue {
            key: key.clone(),
            value: raw.to_string(),
        })?;

        if key == "stop" {
            stop = Some(value);
        } else {
            entries.push(value);
        }
        seen.push(key);
    }

    if entries.is_empty() {
        return Err(ParseError::MissingEntries);
    }
    let stop = stop.ok_or(ParseError::MissingStop)?;

    Ok(SizingRequest { entries, stop })
}

/// Try the positional form on a plain chat message. Returns `None` when
/// the message does not look like 2 to 4 positive decimals, so callers
/// can silently ignore unrelated chatter.
pub fn try_parse_positional(text: &str) -> Option<SizingRequest> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if !(2..=4).contains(&tokens.len()) {
        return None;
    }

    let mut numbers = Vec::with_capacity(tokens.len());
    for token in tokens {
        numbers.push(parse_positive(token)?);
    }

    let stop = numbers.pop()?;
    Some(SizingRequest {
        entries: numbers,
        stop,
    })
}

fn parse_positive(raw: &str) -> Option<Decimal> {
    let value = Decimal::from_str(raw).ok()?;
    (value > Decimal::ZERO).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn keyed_single_entry() {
        let request = parse_keyed("e1:0.5 stop:0.52").unwrap();
        assert_eq!(request.entries, vec![dec!(0.5)]);
        assert_eq!(request.stop, dec!(0.52));
    }

    #[test]
    fn keyed_three_entries_in_token_order() {
        let request = parse_keyed("e2:0.48 e1:0.5 e3:0.46 stop:0.52").unwrap();
        assert_eq!(request.entries, vec![dec!(0.48), dec!(0.5), dec!(0.46)]);
        assert_eq!(request.stop, dec!(0.52));
    }

    #[test]
    fn keyed_keys_are_case_insensitive() {
        let request = parse_keyed("E1:0.5 STOP:0.52").unwrap();
        assert_eq!(request.entries, vec![dec!(0.5)]);
        assert_eq!(request.stop, dec!(0.52));
    }

    #[test]
    fn keyed_ignores_unknown_tokens() {
        let request = parse_keyed("please e1:0.5 lev:50 stop:0.52 thanks").unwrap();
        assert_eq!(request.entries, vec![dec!(0.5)]);
        assert_eq!(request.stop, dec!(0.52));
    }

    #[test]
    fn keyed_requires_an_entry() {
        assert_eq!(parse_keyed("stop:0.52"), Err(ParseError::MissingEntries));
    }

    #[test]
    fn keyed_requires_a_stop() {
        assert_eq!(parse_keyed("e1:0.5"), Err(ParseError::MissingStop));
    }

    #[test]
    fn keyed_rejects_duplicate_keys() {
        assert_eq!(
            parse_keyed("e1:0.5 e1:0.6 stop:0.52"),
            Err(ParseError::DuplicateKey {
                key: "e1".to_string()
            })
        );
        assert_eq!(
            parse_keyed("e1:0.5 stop:0.52 stop:0.53"),
            Err(ParseError::DuplicateKey {
                key: "stop".to_string()
            })
        );
    }

    #[test]
    fn keyed_rejects_malformed_numbers() {
        assert_eq!(
            parse_keyed("e1:1.2.3 stop:0.52"),
            Err(ParseError::InvalidValue {
                key: "e1".to_string(),
                value: "1.2.3".to_string()
            })
        );
    }

    #[test]
    fn positional_two_numbers() {
        let request = try_parse_positional("0.5 0.52").unwrap();
        assert_eq!(request.entries, vec![dec!(0.5)]);
        assert_eq!(request.stop, dec!(0.52));
    }

    #[test]
    fn positional_four_numbers_last_is_stop() {
        let request = try_parse_positional("0.5 0.48 0.46 0.52").unwrap();
        assert_eq!(request.entries, vec![dec!(0.5), dec!(0.48), dec!(0.46)]);
        assert_eq!(request.stop, dec!(0.52));
    }

    #[test]
    fn positional_rejects_wrong_shapes() {
        assert!(try_parse_positional("0.5").is_none());
        assert!(try_parse_positional("1 2 3 4 5").is_none());
        assert!(try_parse_positional("hello world").is_none());
        assert!(try_parse_positional("0.5 -0.52").is_none());
        assert!(try_parse_positional("").is_none());
    }
}
