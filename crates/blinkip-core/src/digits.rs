//! The digit string blinked for an address
//!
//! An address is reduced to its last octet, or to its last two octets when
//! the second-to-last one is not `0`.

use crate::error::{Error, Result};
use crate::numeral::encode_digit;
use std::fmt;

/// Placeholder address used when no route could be resolved
pub const SENTINEL_ADDRESS: &str = "0.000";

/// Separator between octets
pub const SEPARATOR: char = '.';

/// Ordered digits and separators to blink, e.g. `"5"` or `"12.5"`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigitString(String);

impl DigitString {
    /// Validate `text` as a digit string
    ///
    /// Accepts one octet or two octets joined by a single `.`. Each octet is
    /// one to three ASCII digits with a value of at most 255; leading zeros
    /// are kept as written (`"000"` is three digits).
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let octets: Vec<&str> = text.split(SEPARATOR).collect();
        let valid = (1..=2).contains(&octets.len()) && octets.iter().all(|o| is_octet(o));
        if !valid {
            return Err(Error::InvalidDigitString(text));
        }
        Ok(Self(text))
    }

    /// Reduce a dotted address to the minimal digit string
    ///
    /// `"192.168.0.5"` → `"5"`, `"10.0.12.5"` → `"12.5"`. The sentinel
    /// `"0.000"` reduces to `"000"`.
    pub fn from_address(address: &str) -> Result<Self> {
        let parts: Vec<&str> = address.split(SEPARATOR).collect();
        let reduced = match parts.as_slice() {
            [.., "0", last] => (*last).to_string(),
            [.., second, last] => format!("{second}{SEPARATOR}{last}"),
            [only] => (*only).to_string(),
            [] => String::new(),
        };
        Self::parse(reduced)
    }

    /// Digits derived from the sentinel address
    pub fn sentinel() -> Self {
        Self("000".to_string())
    }

    /// The digits as text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digits and separators in blink order
    pub fn chars(&self) -> std::str::Chars<'_> {
        self.0.chars()
    }

    /// Pulses emitted per repetition (separators contribute none)
    pub fn pulse_count(&self) -> Result<usize> {
        self.chars()
            .filter(|c| *c != SEPARATOR)
            .map(|c| -> Result<usize> {
                let digit = c.to_digit(10).ok_or_else(|| Error::invalid_digit(c))?;
                Ok(encode_digit(digit)?.len())
            })
            .sum()
    }
}

fn is_octet(text: &str) -> bool {
    (1..=3).contains(&text.len())
        && text.bytes().all(|b| b.is_ascii_digit())
        && text.parse::<u16>().is_ok_and(|v| v <= 255)
}

impl fmt::Display for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
