//! Discount calculator: original price, discounted price and percentage.
//!
//! Any two of the three values determine the third. When both prices are
//! known together with the percentage, the original price is the anchor and
//! the discounted price is recomputed from it.
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine};

/// The price field the user edited last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Original,
    Discounted,
}

/// Partially known discount: at most one field may be missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentRelation {
    pub original: Option<Money>,
    pub discounted: Option<Money>,
    /// Discount percentage in `[0, 100)`.
    pub percent: Option<f64>,
}

impl PercentRelation {
    /// Keeps only the price the user edited last, so the other one is derived.
    #[must_use]
    pub fn anchored(
        anchor: Anchor,
        original: Option<Money>,
        discounted: Option<Money>,
        percent: Option<f64>,
    ) -> Self {
        match (anchor, original, discounted) {
            (Anchor::Original, Some(original), _) => Self {
                original: Some(original),
                discounted: None,
                percent,
            },
            (Anchor::Discounted, _, Some(discounted)) => Self {
                original: None,
                discounted: Some(discounted),
                percent,
            },
            _ => Self {
                original,
                discounted,
                percent,
            },
        }
    }
}

/// Fully solved discount.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PercentSolution {
    pub original: Money,
    pub discounted: Money,
    pub percent: f64,
    /// `original - discounted`, rounded once from the unrounded prices.
    pub saved: Money,
}

impl From<PercentSolution> for PercentRelation {
    fn from(value: PercentSolution) -> Self {
        Self {
            original: Some(value.original),
            discounted: Some(value.discounted),
            percent: Some(value.percent),
        }
    }
}

/// Fills the unknown field of `relation`.
///
/// - original + percent: `discounted = original * (1 - p/100)`
/// - discounted + percent: `original = discounted / (1 - p/100)`
/// - original + discounted: `p = (original - discounted) / original * 100`
///
/// Money results are rounded to 3 decimals, half away from zero, only at the end.
pub fn solve(relation: &PercentRelation) -> ResultEngine<PercentSolution> {
    let original = relation
        .original
        .map(|o| o.non_negative("original price"))
        .transpose()?;
    let discounted = relation
        .discounted
        .map(|d| d.non_negative("discounted price"))
        .transpose()?;

    let Some(percent) = relation.percent else {
        return match (original, discounted) {
            (Some(original), Some(discounted)) => percent_from_prices(original, discounted),
            _ => Err(EngineError::InvalidPercent(
                "percent is required unless both prices are known".to_string(),
            )),
        };
    };
    let factor = 1.0 - validate_percent(percent)? / 100.0;

    if let Some(original) = original {
        let o = original.to_major();
        let d = o * factor;
        return Ok(PercentSolution {
            original,
            discounted: Money::from_major(d)?,
            percent,
            saved: Money::from_major(o - d)?,
        });
    }

    if let Some(discounted) = discounted {
        let d = discounted.to_major();
        let o = d / factor;
        return Ok(PercentSolution {
            original: Money::from_major(o)?,
            discounted,
            percent,
            saved: Money::from_major(o - d)?,
        });
    }

    Err(EngineError::InvalidAmount(
        "original or discounted price is required".to_string(),
    ))
}

fn percent_from_prices(original: Money, discounted: Money) -> ResultEngine<PercentSolution> {
    if original.is_zero() {
        return Err(EngineError::InvalidAmount(
            "original price must be > 0 to derive a percent".to_string(),
        ));
    }
    if discounted > original {
        return Err(EngineError::InvalidAmount(format!(
            "discounted price {discounted} exceeds original price {original}"
        )));
    }
    let o = original.to_major();
    let d = discounted.to_major();
    Ok(PercentSolution {
        original,
        discounted,
        percent: (o - d) / o * 100.0,
        saved: Money::from_major(o - d)?,
    })
}

fn validate_percent(percent: f64) -> ResultEngine<f64> {
    if !percent.is_finite() || !(0.0..100.0).contains(&percent) {
        return Err(EngineError::InvalidPercent(format!(
            "percent must be in [0, 100), got {percent}"
        )));
    }
    Ok(percent)
}
