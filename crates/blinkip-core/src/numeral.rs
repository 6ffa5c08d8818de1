//! Digit → numeral encoding
//!
//! Every decimal digit is blinked as a numeral over `{I, V, X}`. The table is
//! roman-like but not strict roman: zero is `X`.
//!
//! | digit | numeral |
//! |-------|---------|
//! | 0 | X |
//! | 1 | I |
//! | 2 | II |
//! | 3 | III |
//! | 4 | IV |
//! | 5 | V |
//! | 6 | VI |
//! | 7 | VII |
//! | 8 | VIII |
//! | 9 | IX |

use crate::error::{Error, Result};
use std::fmt;
use std::time::Duration;

const NUMERALS: [&str; 10] = ["X", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];

/// One blink of a numeral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Short blink
    I,
    /// Medium blink
    V,
    /// Long blink
    X,
}

impl Symbol {
    /// How long the LED stays on for this symbol
    pub const fn duration(self) -> Duration {
        match self {
            Symbol::I => Duration::from_millis(100),
            Symbol::V => Duration::from_millis(400),
            Symbol::X => Duration::from_millis(1200),
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Symbol::I),
            'V' => Some(Symbol::V),
            'X' => Some(Symbol::X),
            _ => None,
        }
    }
}

/// Numeral assigned to a single digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numeral(&'static str);

impl Numeral {
    /// The numeral as text, e.g. `"VIII"`
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Symbols in blink order
    pub fn symbols(self) -> impl Iterator<Item = Symbol> {
        self.0.chars().filter_map(Symbol::from_char)
    }

    /// Number of pulses this numeral produces
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: every digit has at least one symbol
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Encode a digit in `0..=9`
///
/// Anything else is a logic fault upstream and fails with
/// [`Error::InvalidDigit`].
pub fn encode_digit(digit: u32) -> Result<Numeral> {
    usize::try_from(digit)
        .ok()
        .and_then(|i| NUMERALS.get(i))
        .map(|s| Numeral(*s))
        .ok_or_else(|| Error::invalid_digit(digit))
}

/// Pulse duration for a symbol: I=0.1s, V=0.4s, X=1.2s
pub fn symbol_duration(symbol: Symbol) -> Duration {
    symbol.duration()
}
