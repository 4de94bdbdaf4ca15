//! Averaging-entry, fixed-fractional-risk position sizing.
//!
//! Converts up to three planned entry prices and one stop-loss price into
//! quantities, notional sizes and margin requirements such that a stop-out
//! loses exactly `seed * risk_fraction` of the account.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the number of entry tranches.
pub const MAX_ENTRIES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizingError {
    #[error("at least one entry price is required")]
    NoEntries,
    #[error("at most three entry prices are supported")]
    TooManyEntries,
    #[error("entry prices must be positive")]
    NonPositiveEntry,
    #[error("a valid stop price is required")]
    InvalidStop,
    #[error("entry and stop cannot be equal")]
    EntryEqualsStop,
    #[error("calculation overflowed")]
    Overflow,
}

/// Account-level sizing parameters, passed explicitly into [`compute`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Account size in quote currency (USDT).
    pub seed: Decimal,
    pub leverage: u32,
    /// Fraction of `seed` lost when the stop is hit.
    pub risk_fraction: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            seed: Decimal::new(2000, 0),
            leverage: 100,
            risk_fraction: Decimal::new(2, 2), // 0.02
        }
    }
}

/// Validated shape consumed by [`compute`]: 1 to 3 entry prices in the
/// order the user gave them, plus one stop price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingRequest {
    pub entries: Vec<Decimal>,
    pub stop: Decimal,
}

/// Outcome of one sizing calculation. All numeric fields are unrounded;
/// rounding to display precision is the presenter's job (see `report`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub seed: Decimal,
    pub leverage: u32,
    pub risk_fraction: Decimal,
    pub entries: Vec<Decimal>,
    pub stop: Decimal,
    pub entry_count: usize,
    pub avg_entry: Decimal,
    pub total_risk: Decimal,
    pub total_qty: Decimal,
    pub total_size: Decimal,
    pub total_margin: Decimal,
    pub per_qty: Decimal,
    pub per_size: Decimal,
    pub per_margin: Decimal,
}

/// Size a position so that a stop-out loses `config.seed * config.risk_fraction`.
///
/// Pure and synchronous. The stop-vs-average comparison is exact decimal
/// equality: with `rust_decimal` the mean of the entries carries no
/// binary-float representation error, so no epsilon is needed.
pub fn compute(config: &RiskConfig, request: &SizingRequest) -> Result<SizingResult, SizingError> {
    if request.entries.is_empty() {
        return Err(SizingError::NoEntries);
    }
    if request.entries.len() > MAX_ENTRIES {
        return Err(SizingError::TooManyEntries);
    }
    if request.entries.iter().any(|e| *e <= Decimal::ZERO) {
        return Err(SizingError::NonPositiveEntry);
    }
    if request.stop <= Decimal::ZERO {
        return Err(SizingError::InvalidStop);
    }

    let entry_count = request.entries.len();
    let count = Decimal::from(entry_count as u32);

    let sum = request
        .entries
        .iter()
        .try_fold(Decimal::ZERO, |acc, e| acc.checked_add(*e))
        .ok_or(SizingError::Overflow)?;
    let avg_entry = sum.checked_div(count).ok_or(SizingError::Overflow)?;

    let total_risk = config
        .seed
        .checked_mul(config.risk_fraction)
        .ok_or(SizingError::Overflow)?;

    let price_diff = avg_entry
        .checked_sub(request.stop)
        .ok_or(SizingError::Overflow)?
        .abs();
    if price_diff.is_zero() {
        return Err(SizingError::EntryEqualsStop);
    }

    let total_qty = total_risk
        .checked_div(price_diff)
        .ok_or(SizingError::Overflow)?;
    let total_size = total_qty
        .checked_mul(avg_entry)
        .ok_or(SizingError::Overflow)?;
    let total_margin = total_size
        .checked_div(Decimal::from(config.leverage))
        .ok_or(SizingError::Overflow)?;

    let (per_qty, per_size, per_margin) =
        split_evenly(total_qty, total_size, total_margin, count)?;

    Ok(SizingResult {
        seed: config.seed,
        leverage: config.leverage,
        risk_fraction: config.risk_fraction,
        entries: request.entries.clone(),
        stop: request.stop,
        entry_count,
        avg_entry,
        total_risk,
        total_qty,
        total_size,
        total_margin,
        per_qty,
        per_size,
        per_margin,
    })
}

/// Distribute the totals across tranches by equal division. Kept as its
/// own step so a weighted split can replace it without touching the risk
/// math above.
fn split_evenly(
    total_qty: Decimal,
    total_size: Decimal,
    total_margin: Decimal,
    count: Decimal,
) -> Result<(Decimal, Decimal, Decimal), SizingError> {
    let per_qty = total_qty.checked_div(count).ok_or(SizingError::Overflow)?;
    let per_size = total_size.checked_div(count).ok_or(SizingError::Overflow)?;
    let per_margin = total_margin
        .checked_div(count)
        .ok_or(SizingError::Overflow)?;
    Ok((per_qty, per_size, per_margin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(entries: Vec<Decimal>, stop: Decimal) -> SizingRequest {
        SizingRequest { entries, stop }
    }

    #[test]
    fn single_entry_case() {
        let config = RiskConfig::default();
        let result = compute(&config, &request(vec![dec!(0.5)], dec!(0.52))).unwrap();

        assert_eq!(result.avg_entry, dec!(0.5));
        assert_eq!(result.total_risk, dec!(40));
        assert_eq!(result.total_qty, dec!(2000));
        assert_eq!(result.total_size, dec!(1000));
        assert_eq!(result.total_margin, dec!(10));
        assert_eq!(result.entry_count, 1);
        assert_eq!(result.per_qty, dec!(2000));
        assert_eq!(result.per_size, dec!(1000));
        assert_eq!(result.per_margin, dec!(10));
    }

    #[test]
    fn echoes_inputs_verbatim() {
        let config = RiskConfig::default();
        let entries = vec![dec!(0.50), dec!(0.48)];
        let result = compute(&config, &request(entries.clone(), dec!(0.52))).unwrap();

        assert_eq!(result.entries, entries);
        assert_eq!(result.stop, dec!(0.52));
        assert_eq!(result.seed, dec!(2000));
        assert_eq!(result.leverage, 100);
    }

    #[test]
    fn rejects_empty_entries() {
        let config = RiskConfig::default();
        let err = compute(&config, &request(vec![], dec!(0.52))).unwrap_err();
        assert_eq!(err, SizingError::NoEntries);
    }

    #[test]
    fn rejects_more_than_three_entries() {
        let config = RiskConfig::default();
        let entries = vec![dec!(1), dec!(2), dec!(3), dec!(4)];
        let err = compute(&config, &request(entries, dec!(5))).unwrap_err();
        assert_eq!(err, SizingError::TooManyEntries);
    }

    #[test]
    fn rejects_non_positive_entry() {
        let config = RiskConfig::default();
        let err = compute(&config, &request(vec![dec!(0)], dec!(0.52))).unwrap_err();
        assert_eq!(err, SizingError::NonPositiveEntry);

        let err = compute(&config, &request(vec![dec!(0.5), dec!(-1)], dec!(0.52))).unwrap_err();
        assert_eq!(err, SizingError::NonPositiveEntry);
    }

    #[test]
    fn rejects_zero_or_negative_stop() {
        let config = RiskConfig::default();
        let err = compute(&config, &request(vec![dec!(0.5)], dec!(0))).unwrap_err();
        assert_eq!(err, SizingError::InvalidStop);

        let err = compute(&config, &request(vec![dec!(0.5)], dec!(-5))).unwrap_err();
        assert_eq!(err, SizingError::InvalidStop);
    }

    #[test]
    fn rejects_stop_equal_to_average_entry() {
        let config = RiskConfig::default();
        let err = compute(&config, &request(vec![dec!(0.5)], dec!(0.5))).unwrap_err();
        assert_eq!(err, SizingError::EntryEqualsStop);

        // Averaged across entries, not any single entry.
        let err = compute(&config, &request(vec![dec!(0.4), dec!(0.6)], dec!(0.5))).unwrap_err();
        assert_eq!(err, SizingError::EntryEqualsStop);
    }

    #[test]
    fn custom_config_is_injected() {
        let config = RiskConfig {
            seed: dec!(10000),
            leverage: 20,
            risk_fraction: dec!(0.01),
        };
        let result = compute(&config, &request(vec![dec!(100)], dec!(99))).unwrap();

        assert_eq!(result.total_risk, dec!(100));
        assert_eq!(result.total_qty, dec!(100));
        assert_eq!(result.total_size, dec!(10000));
        assert_eq!(result.total_margin, dec!(500));
    }
}
