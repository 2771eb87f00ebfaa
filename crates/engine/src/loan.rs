use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine};

/// Fixed-rate, fixed-term loan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Nominal yearly rate, e.g. `5.0` for 5%.
    pub annual_rate_percent: f64,
    pub term_months: u32,
}

impl LoanTerms {
    /// Builds terms from a duration in years (`months = years * 12`).
    ///
    /// The year count must be positive and cover a whole number of months.
    pub fn from_years(
        principal: Money,
        annual_rate_percent: f64,
        years: f64,
    ) -> ResultEngine<Self> {
        let months = years * 12.0;
        if !months.is_finite()
            || months <= 0.0
            || months.fract() != 0.0
            || months > f64::from(u32::MAX)
        {
            return Err(EngineError::InvalidTerms(format!(
                "{years} years is not a whole positive number of months"
            )));
        }
        Ok(Self {
            principal,
            annual_rate_percent,
            term_months: months as u32,
        })
    }

    /// Term expressed in years, as shown next to the months field.
    #[must_use]
    pub fn term_years(&self) -> f64 {
        f64::from(self.term_months) / 12.0
    }

    fn validate(&self) -> ResultEngine<()> {
        if !self.principal.is_positive() {
            return Err(EngineError::InvalidTerms(format!(
                "principal must be > 0, got {}",
                self.principal
            )));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent <= 0.0 {
            return Err(EngineError::InvalidTerms(format!(
                "annual rate must be > 0, got {}",
                self.annual_rate_percent
            )));
        }
        if self.term_months == 0 {
            return Err(EngineError::InvalidTerms("term must be > 0 months".to_string()));
        }
        Ok(())
    }
}

/// Level monthly payment of an amortized loan and its totals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
}

/// Applies the annuity formula with a monthly periodic rate `r = rate / 100 / 12`:
///
/// ```text
/// payment = principal * r * (1 + r)^n / ((1 + r)^n - 1)
/// ```
///
/// Zero-rate and zero-term loans are rejected rather than approximated.
pub fn amortize(terms: &LoanTerms) -> ResultEngine<LoanResult> {
    terms.validate()?;

    let principal = terms.principal.to_major();
    let r = terms.annual_rate_percent / 100.0 / 12.0;
    let growth = (1.0 + r).powf(f64::from(terms.term_months));
    let denominator = growth - 1.0;
    if denominator <= 0.0 {
        return Err(EngineError::InvalidTerms(format!(
            "rate {}% is too small to amortize over {} months",
            terms.annual_rate_percent, terms.term_months
        )));
    }

    let monthly = principal * r * growth / denominator;
    let total = monthly * f64::from(terms.term_months);
    let interest = total - principal;

    Ok(LoanResult {
        monthly_payment: Money::from_major(monthly)?,
        total_payment: Money::from_major(total)?,
        total_interest: Money::from_major(interest)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(principal: &str, rate: f64, months: u32) -> LoanTerms {
        LoanTerms {
            principal: principal.parse().unwrap(),
            annual_rate_percent: rate,
            term_months: months,
        }
    }

    #[test]
    fn five_year_example() {
        let got = amortize(&terms("33000", 5.0, 60)).unwrap();
        assert_eq!(got.monthly_payment.to_string(), "622.751");
        assert!((4365.0..4366.0).contains(&got.total_interest.to_major()));
        assert_eq!(
            got.total_payment - got.total_interest,
            "33000".parse::<Money>().unwrap()
        );
    }

    #[test]
    fn ten_year_example() {
        let got = amortize(&terms("33000", 5.0, 120)).unwrap();
        assert!((350.0..351.0).contains(&got.monthly_payment.to_major()));
        assert!((9001.0..9002.0).contains(&got.total_interest.to_major()));
    }

    #[test]
    fn longer_term_lowers_payment_and_raises_interest() {
        let short = amortize(&terms("33000", 5.0, 60)).unwrap();
        let long = amortize(&terms("33000", 5.0, 120)).unwrap();
        assert!(long.monthly_payment < short.monthly_payment);
        assert!(long.total_interest > short.total_interest);
    }

    #[test]
    fn non_positive_inputs_are_invalid() {
        for bad in [
            terms("0", 5.0, 60),
            terms("-1", 5.0, 60),
            terms("1000", 0.0, 60),
            terms("1000", -2.0, 60),
            terms("1000", f64::NAN, 60),
            terms("1000", 5.0, 0),
        ] {
            assert!(
                matches!(amortize(&bad), Err(EngineError::InvalidTerms(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn years_convert_to_months() {
        let principal: Money = "1000".parse().unwrap();
        let got = LoanTerms::from_years(principal, 5.0, 2.5).unwrap();
        assert_eq!(got.term_months, 30);
        assert_eq!(got.term_years(), 2.5);
        assert!(matches!(
            LoanTerms::from_years(principal, 5.0, 0.0),
            Err(EngineError::InvalidTerms(_))
        ));
        assert!(matches!(
            LoanTerms::from_years(principal, 5.0, 1.01),
            Err(EngineError::InvalidTerms(_))
        ));
    }

    #[test]
    fn single_month_repays_principal_plus_one_period_of_interest() {
        let got = amortize(&terms("1200", 12.0, 1)).unwrap();
        assert_eq!(got.monthly_payment.to_string(), "1212.000");
        assert_eq!(got.total_interest.to_string(), "12.000");
    }
}
