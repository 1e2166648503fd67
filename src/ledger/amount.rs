use std::{
    fmt,
    iter::Sum,
    ops::{Add, Neg, Sub},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, TrackerError};

/// Largest magnitude accepted from user input (100 billion, in cents).
const MAX_CENTS: i64 = 10_000_000_000_000;
const MAX_WHOLE_DIGITS: usize = 11;

/// Currency amount stored as signed integer cents.
///
/// Text is parsed exactly, digit by digit, and rounded half-up (away from zero)
/// to two decimals, so `"1500.005"` becomes `1500.01` and `"-0.125"` becomes
/// `-0.13`. The on-disk representation is the raw cent count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Whether the magnitude is one user input could have produced.
    pub const fn is_within_limit(self) -> bool {
        self.0.unsigned_abs() <= MAX_CENTS as u64
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }
}

impl FromStr for Amount {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self> {
        let text = raw.trim();
        let invalid = || TrackerError::InvalidAmount(text.to_string());

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let unsigned = unsigned.strip_prefix('R').unwrap_or(unsigned);
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let whole = whole.trim_start_matches('0');
        if whole.len() > MAX_WHOLE_DIGITS {
            return Err(invalid());
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let mut decimals = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = decimals.next().unwrap_or(0);
        let hundredths = decimals.next().unwrap_or(0);
        let mut cents = whole_value * 100 + tenths * 10 + hundredths;
        if decimals.next().is_some_and(|thousandths| thousandths >= 5) {
            cents += 1;
        }
        if cents > MAX_CENTS {
            return Err(invalid());
        }

        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl TryFrom<f64> for Amount {
    type Error = TrackerError;

    /// Goes through the shortest decimal rendering of `value` so the literal the
    /// caller wrote is what gets rounded, not its binary approximation.
    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(TrackerError::InvalidAmount(value.to_string()));
        }
        value.to_string().parse()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}
