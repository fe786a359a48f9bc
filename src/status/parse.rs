//! Parsing of artifact size descriptions back into sizes.
//!
//! Extracts `(current, previous)` from a description previously posted by
//! [`format_description`](crate::status::format_description). The current
//! size is the trailing `"<n> bytes"` token; the baseline is reconstructed
//! from the signed delta substring when present.

use thiserror::Error;

/// Errors that can occur when decoding a status description.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The description does not end in a recognizable `"<n> bytes"` token.
    #[error("unable to parse size description {0:?}")]
    MissingSize(String),

    /// The reconstructed baseline (current minus delta) is negative or does
    /// not fit in a byte count.
    #[error("description {0:?} encodes a baseline outside the valid size range")]
    BaselineOutOfRange(String),
}

/// Parses a status description into `(current_size, previous_size)`.
///
/// Rules, applied in order:
///
/// 1. The trailing `"<digits> bytes"` (optionally followed by a single `)`)
///    is the current size; commas are ignored. Its absence is an error.
/// 2. A signed `"<±digits> bytes"` substring anywhere in the string encodes
///    the delta, and `previous = current - delta`.
/// 3. Otherwise the literal `"No change"` means `previous == current`.
/// 4. Otherwise there is no baseline.
///
/// # Errors
///
/// Returns [`ParseError::MissingSize`] when rule 1 fails, and
/// [`ParseError::BaselineOutOfRange`] when rule 2 produces a baseline that
/// cannot be a byte count.
pub fn parse_description(description: &str) -> Result<(u64, Option<u64>), ParseError> {
    let current = trailing_size(description)
        .ok_or_else(|| ParseError::MissingSize(description.to_string()))?;

    if let Some(delta) = find_signed_delta(description) {
        let previous = u64::try_from(current as i128 - delta)
            .map_err(|_| ParseError::BaselineOutOfRange(description.to_string()))?;
        return Ok((current, Some(previous)));
    }

    if description.contains("No change") {
        return Ok((current, Some(current)));
    }

    Ok((current, None))
}

/// Extracts the unsigned size from the end of the description.
///
/// Accepts `"... 1,234 bytes"` and `"... (1,234 bytes)"`; anchored at the end
/// of the string so delta substrings earlier in the text are never confused
/// with the current size.
fn trailing_size(description: &str) -> Option<u64> {
    let s = description.strip_suffix(')').unwrap_or(description);
    let s = s.strip_suffix(" bytes")?;

    // Walk backwards over the digits-and-commas run.
    let run_start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == ',')
        .last()
        .map(|(i, _)| i)?;
    let token = &s[run_start..];
    if !token.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    token.replace(',', "").parse().ok()
}

/// Finds the first signed `"<±digits> bytes"` substring and returns its value.
fn find_signed_delta(description: &str) -> Option<i128> {
    for (i, c) in description.char_indices() {
        if c != '+' && c != '-' {
            continue;
        }
        let rest = &description[i + 1..];
        let run_len = rest
            .find(|ch: char| !(ch.is_ascii_digit() || ch == ','))
            .unwrap_or(rest.len());
        if run_len == 0 {
            continue;
        }
        let token = &rest[..run_len];
        if !token.bytes().any(|b| b.is_ascii_digit()) {
            continue;
        }
        if !rest[run_len..].starts_with(" bytes") {
            continue;
        }

        let magnitude: i128 = token.replace(',', "").parse().ok()?;
        return Some(if c == '-' { -magnitude } else { magnitude });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::format_description;
    use proptest::prelude::*;

    mod parse {
        use super::*;

        #[test]
        fn plain_size() {
            assert_eq!(parse_description("100 bytes"), Ok((100, None)));
        }

        #[test]
        fn grouped_size() {
            assert_eq!(parse_description("1,234,567 bytes"), Ok((1_234_567, None)));
        }

        #[test]
        fn no_change_sets_baseline_to_current() {
            assert_eq!(
                parse_description("No change (100 bytes)"),
                Ok((100, Some(100)))
            );
        }

        #[test]
        fn positive_delta_reconstructs_baseline() {
            assert_eq!(
                parse_description("+50 bytes (+33.33%) → 150 bytes"),
                Ok((150, Some(100)))
            );
        }

        #[test]
        fn negative_delta_reconstructs_baseline() {
            assert_eq!(
                parse_description("-50 bytes (-50.00%) → 100 bytes"),
                Ok((100, Some(150)))
            );
        }

        #[test]
        fn baseline_comes_from_delta_not_percentage() {
            // A wildly wrong percentage must not affect the result.
            assert_eq!(
                parse_description("+50 bytes (+99.99%) → 150 bytes"),
                Ok((150, Some(100)))
            );
        }

        #[test]
        fn unparseable_description_is_an_error() {
            assert_eq!(
                parse_description("hello world"),
                Err(ParseError::MissingSize("hello world".to_string()))
            );
        }

        #[test]
        fn empty_description_is_an_error() {
            assert!(matches!(
                parse_description(""),
                Err(ParseError::MissingSize(_))
            ));
        }

        #[test]
        fn bytes_word_alone_is_an_error() {
            assert!(matches!(
                parse_description("some bytes"),
                Err(ParseError::MissingSize(_))
            ));
        }

        #[test]
        fn negative_baseline_is_rejected() {
            // current 10, delta +50 would imply a baseline of -40 bytes.
            assert!(matches!(
                parse_description("+50 bytes → 10 bytes"),
                Err(ParseError::BaselineOutOfRange(_))
            ));
        }
    }

    mod signed_delta {
        use super::*;

        #[test]
        fn ignores_percentages() {
            // "+33.33%" must not be mistaken for a delta.
            assert_eq!(find_signed_delta("(+33.33%) → 150 bytes"), None);
        }

        #[test]
        fn first_match_wins() {
            assert_eq!(find_signed_delta("+5 bytes then -7 bytes"), Some(5));
        }

        #[test]
        fn grouped_delta() {
            assert_eq!(find_signed_delta("-1,000 bytes"), Some(-1_000));
        }
    }

    mod roundtrip {
        use super::*;

        proptest! {
            /// The core correctness property: parse(format(c, p)) == (c, p).
            #[test]
            fn roundtrip_preserves_sizes(current: u64, previous in prop::option::of(any::<u64>())) {
                let description = format_description(current, previous);
                prop_assert_eq!(
                    parse_description(&description),
                    Ok((current, previous))
                );
            }
        }

        #[test]
        fn roundtrip_zero_edge_cases() {
            for (current, previous) in [
                (0, None),
                (0, Some(0)),
                (0, Some(5)),
                (5, Some(0)),
                (u64::MAX, Some(0)),
                (0, Some(u64::MAX)),
            ] {
                let description = format_description(current, previous);
                assert_eq!(
                    parse_description(&description),
                    Ok((current, previous)),
                    "failed for {:?}",
                    (current, previous)
                );
            }
        }
    }
}
