use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine};

/// ISO currency code offered by the currency converter.
///
/// The set is closed: the converter only lists these codes, even though the
/// rate provider answers with many more. Amounts are always shown with 3
/// fractional digits regardless of the currency (see [`Money`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Omr,
    Aed,
    Sar,
    Qar,
    Kwd,
    Bhd,
    Usd,
    Eur,
    Gbp,
    Egp,
    Jod,
}

impl Currency {
    /// Every supported currency, in display order.
    pub const ALL: [Currency; 11] = [
        Currency::Omr,
        Currency::Aed,
        Currency::Sar,
        Currency::Qar,
        Currency::Kwd,
        Currency::Bhd,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Egp,
        Currency::Jod,
    ];

    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Omr => "OMR",
            Currency::Aed => "AED",
            Currency::Sar => "SAR",
            Currency::Qar => "QAR",
            Currency::Kwd => "KWD",
            Currency::Bhd => "BHD",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Egp => "EGP",
            Currency::Jod => "JOD",
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Currency::Omr => "Omani rial",
            Currency::Aed => "UAE dirham",
            Currency::Sar => "Saudi riyal",
            Currency::Qar => "Qatari riyal",
            Currency::Kwd => "Kuwaiti dinar",
            Currency::Bhd => "Bahraini dinar",
            Currency::Usd => "US dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "Pound sterling",
            Currency::Egp => "Egyptian pound",
            Currency::Jod => "Jordanian dinar",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let code = value.trim().to_ascii_uppercase();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or_else(|| EngineError::InvalidCurrency(format!("unsupported currency: {code}")))
    }
}

impl core::str::FromStr for Currency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::try_from(s)
    }
}

/// Converts `amount` with an exchange `rate` (units of the target currency per
/// unit of the source currency), rounding the result to 3 fractional digits.
pub fn convert(amount: Money, rate: f64) -> ResultEngine<Money> {
    let amount = amount.non_negative("amount")?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(EngineError::InvalidAmount(format!(
            "exchange rate must be > 0, got {rate}"
        )));
    }
    Money::from_major(amount.to_major() * rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(Currency::try_from("omr").unwrap(), Currency::Omr);
        assert_eq!(" Jod ".parse::<Currency>().unwrap(), Currency::Jod);
        assert!(matches!(
            Currency::try_from("XYZ"),
            Err(EngineError::InvalidCurrency(_))
        ));
    }

    #[test]
    fn every_code_round_trips() {
        for currency in Currency::ALL {
            assert_eq!(Currency::try_from(currency.code()).unwrap(), currency);
        }
    }

    #[test]
    fn serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::Aed).unwrap(), "\"AED\"");
    }

    #[test]
    fn convert_rounds_to_three_decimals() {
        let amount: Money = "1".parse().unwrap();
        assert_eq!(convert(amount, 9.5483).unwrap().to_string(), "9.548");
        let amount: Money = "2.5".parse().unwrap();
        assert_eq!(convert(amount, 0.3845).unwrap().to_string(), "0.961");
    }

    #[test]
    fn convert_rejects_bad_rates_and_negative_amounts() {
        let amount: Money = "1".parse().unwrap();
        assert!(matches!(convert(amount, 0.0), Err(EngineError::InvalidAmount(_))));
        assert!(matches!(convert(amount, f64::NAN), Err(EngineError::InvalidAmount(_))));
        assert!(matches!(
            convert(Money::new(-1), 1.0),
            Err(EngineError::InvalidAmount(_))
        ));
    }
}
