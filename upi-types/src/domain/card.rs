//! Card number validation (length gate + Luhn checksum).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::network::{CardNetwork, classify_network};
use crate::error::{CardRejection, DomainError};

/// Shortest card number accepted.
pub const MIN_CARD_LEN: usize = 12;
/// Longest card number accepted.
pub const MAX_CARD_LEN: usize = 19;

/// Runs the Luhn checksum over a string of ASCII digits.
///
/// Walking from the rightmost digit, every second digit (starting with the
/// second from the right) is doubled, and 9 is subtracted from doubled
/// values above 9. The number is valid when the total is divisible by 10.
/// Any non-digit character makes the check fail.
pub fn luhn_check(digits: &str) -> bool {
    let mut checksum = 0u32;
    let mut double = false;
    for c in digits.chars().rev() {
        let Some(mut d) = c.to_digit(10) else {
            return false;
        };
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        checksum += d;
        double = !double;
    }
    checksum % 10 == 0
}

/// Computes the digit that, appended to `payload`, makes it pass [`luhn_check`].
///
/// Returns `None` if `payload` contains anything other than ASCII digits.
pub fn luhn_check_digit(payload: &str) -> Option<u8> {
    // The check digit sits at the rightmost position, so the payload's last
    // digit is the first one to be doubled.
    let mut sum = 0u32;
    let mut double = true;
    for c in payload.chars().rev() {
        let mut d = c.to_digit(10)?;
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }
    Some(((10 - sum % 10) % 10) as u8)
}

/// Structural + checksum validity: 12-19 ASCII digits passing Luhn.
pub fn is_valid_card_number(raw: &str) -> bool {
    check(raw).is_ok()
}

fn check(raw: &str) -> Result<(), CardRejection> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CardRejection::NonDigit);
    }
    if !(MIN_CARD_LEN..=MAX_CARD_LEN).contains(&raw.len()) {
        return Err(CardRejection::Length { len: raw.len() });
    }
    if !luhn_check(raw) {
        return Err(CardRejection::Checksum);
    }
    Ok(())
}

/// The final four characters of `s`, or all of it when shorter.
pub fn last_four(s: &str) -> &str {
    match s.char_indices().rev().nth(3) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// A credit/debit card number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardNumber(String);

impl CardNumber {
    /// Parses and validates a card number.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        check(raw).map_err(|reason| DomainError::InvalidCardFormat { reason })?;
        Ok(Self(raw.to_string()))
    }

    /// Wraps a card number that was validated earlier (e.g. when it was saved).
    pub fn from_trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last_four(&self) -> &str {
        last_four(&self.0)
    }

    /// The network this card belongs to, from its leading digits.
    pub fn network(&self) -> CardNetwork {
        classify_network(&self.0)
    }

    /// Every character but the last four replaced by `*`.
    pub fn masked(&self) -> String {
        let count = self.0.chars().count();
        if count <= 4 {
            return self.0.clone();
        }
        let mut masked = "*".repeat(count - 4);
        masked.push_str(self.last_four());
        masked
    }

    /// Digits in groups of four separated by spaces.
    pub fn grouped(&self) -> String {
        group_in_fours(&self.0)
    }

    /// Masked form, grouped in fours.
    pub fn masked_grouped(&self) -> String {
        group_in_fours(&self.masked())
    }
}

fn group_in_fours(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 4);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_valid_card(rng: &mut impl Rng, len: usize) -> String {
        let mut payload: String = (0..len - 1)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect();
        let check = luhn_check_digit(&payload).unwrap();
        payload.push(char::from(b'0' + check));
        payload
    }

    #[test]
    fn test_known_vectors() {
        assert!(is_valid_card_number("4111111111111111"));
        assert!(is_valid_card_number("5500000000000004"));
        assert!(is_valid_card_number("371449635398431"));
        assert!(is_valid_card_number("378282246310005"));
        assert!(!is_valid_card_number("4111111111111112"));
    }

    #[test]
    fn test_length_gate() {
        // 11 digits, Luhn-valid, still too short
        assert!(luhn_check("00000000000"));
        assert!(!is_valid_card_number("00000000000"));
        assert!(is_valid_card_number("000000000000"));
        assert!(!is_valid_card_number("00000000000000000000"));
        assert!(!is_valid_card_number(""));
    }

    #[test]
    fn test_non_digits_rejected() {
        assert!(!is_valid_card_number("4111-1111-1111-1111"));
        assert!(!is_valid_card_number("4111 1111 1111 1111"));
        assert!(!luhn_check("41x1"));
    }

    #[test]
    fn test_parse_reasons() {
        let err = CardNumber::parse("4111111111111112").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidCardFormat {
                reason: CardRejection::Checksum
            }
        );

        let err = CardNumber::parse("41111").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidCardFormat {
                reason: CardRejection::Length { len: 5 }
            }
        );

        let err = CardNumber::parse("4111a11111111111").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidCardFormat {
                reason: CardRejection::NonDigit
            }
        );
    }

    #[test]
    fn test_check_digit() {
        assert_eq!(luhn_check_digit("411111111111111"), Some(1));
        assert_eq!(luhn_check_digit("37144963539843"), Some(1));
        assert_eq!(luhn_check_digit("12a"), None);
    }

    #[test]
    fn test_single_digit_flip_detected() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let len = rng.random_range(MIN_CARD_LEN..=MAX_CARD_LEN);
            let card = random_valid_card(&mut rng, len);
            assert!(is_valid_card_number(&card));

            let pos = rng.random_range(0..len);
            let original = card.as_bytes()[pos] - b'0';
            let replacement = (original + rng.random_range(1..10u8)) % 10;
            let mut flipped = card.clone().into_bytes();
            flipped[pos] = b'0' + replacement;
            let flipped = String::from_utf8(flipped).unwrap();

            assert!(!is_valid_card_number(&flipped), "{card} -> {flipped}");
        }
    }

    #[test]
    fn test_last_four() {
        assert_eq!(last_four("4111111111111111"), "1111");
        assert_eq!(last_four("123"), "123");
        assert_eq!(last_four(""), "");
        assert_eq!(last_four("12345"), "2345");
    }

    #[test]
    fn test_masking_and_grouping() {
        let card = CardNumber::parse("4111111111111111").unwrap();
        assert_eq!(card.masked(), "************1111");
        assert_eq!(card.grouped(), "4111 1111 1111 1111");
        assert_eq!(card.masked_grouped(), "**** **** **** 1111");

        let amex = CardNumber::parse("371449635398431").unwrap();
        assert_eq!(amex.grouped(), "3714 4963 5398 431");
        assert_eq!(CardNumber::from_trusted("1234").masked(), "1234");
    }
}
