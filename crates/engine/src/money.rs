use std::{
    fmt,
    ops::Sub,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Number of fractional digits carried by [`Money`].
pub const MONEY_DECIMALS: u32 = 3;

const SCALE: i64 = 10_i64.pow(MONEY_DECIMALS);

/// Money amount represented as integer **minor units** (1/1000 of the major
/// unit, e.g. the baisa of the Omani rial).
///
/// Calculators compute in `f64` and convert to `Money` only when producing a
/// result, so every displayed amount is rounded exactly once.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_345);
/// assert_eq!(amount.minor(), 12345);
/// assert_eq!(amount.to_string(), "12.345");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 3 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().minor(), 10_000);
/// assert_eq!("10,5".parse::<Money>().unwrap().minor(), 10_500);
/// assert!("12.3456".parse::<Money>().is_err());
/// ```
///
/// Rounding from floating point is half away from zero:
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!(Money::from_major(0.0125).unwrap().to_string(), "0.013");
/// assert_eq!(Money::from_major(-0.0125).unwrap().to_string(), "-0.013");
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Rounds a major-unit value to 3 fractional digits, half away from zero.
    ///
    /// Fails with [`EngineError::InvalidAmount`] for NaN, infinities and values
    /// that do not fit the minor-unit range.
    pub fn from_major(value: f64) -> ResultEngine<Self> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(format!(
                "{value} is not a finite amount"
            )));
        }
        let scaled = (value * SCALE as f64).round();
        if scaled >= i64::MAX as f64 || scaled <= i64::MIN as f64 {
            return Err(EngineError::InvalidAmount("amount too large".to_string()));
        }
        Ok(Self(scaled as i64))
    }

    /// Returns the amount in major units.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Rejects negative amounts, naming the offending field in the error.
    pub(crate) fn non_negative(self, label: &str) -> ResultEngine<Self> {
        if self.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "{label} must be >= 0, got {self}"
            )));
        }
        Ok(self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / SCALE as u64;
        let minor = abs % SCALE as u64;
        write!(f, "{sign}{major}.{minor:03}")
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into minor units.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 3 fractional digits (rejects `12.3456`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount(format!("invalid amount: {s:?}"));
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let minor_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        let bare_fraction = major_str.is_empty() && minor_str.is_some_and(|f| !f.is_empty());
        if (major_str.is_empty() && !bare_fraction)
            || !major_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let major: i64 = if bare_fraction {
            0
        } else {
            major_str.parse().map_err(|_| overflow())?
        };

        let minor: i64 = match minor_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                if frac.len() > MONEY_DECIMALS as usize {
                    return Err(EngineError::InvalidAmount("too many decimals".to_string()));
                }
                let padding = 10_i64.pow(MONEY_DECIMALS - frac.len() as u32);
                frac.parse::<i64>().map_err(|_| invalid())? * padding
            }
        };

        let total = major
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(minor))
            .ok_or_else(overflow)?;

        let signed = if negative {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Money(signed))
    }
}
