//! # Pricing Rules
//!
//! Pure price-computation rules shared by the quote engine.
//!
//! The rules are deliberately **order-dependent**: additional fees are
//! applied sequentially against a running total, so a percentage fee sees
//! every fee before it in the list. Reordering a provider's fee list
//! changes its quotes; the list is an ordered `Vec`, never a set.
//!
//! # Examples
//!
//! ```
//! use autohaul::domain::entities::provider::AdditionalFee;
//! use autohaul::domain::services::pricing;
//! use rust_decimal::Decimal;
//!
//! let fees = vec![AdditionalFee::percentage("fuel surcharge", Decimal::new(10, 0))];
//! let total = pricing::accumulate_fees(Decimal::new(500, 0), &fees).unwrap();
//! assert_eq!(total, Decimal::new(550, 0));
//! ```

use crate::domain::entities::provider::{AdditionalFee, BaseRate};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{FeeKind, RunningCondition};
use rust_decimal::Decimal;

/// Surcharge multiplier for vehicles that cannot move under their own
/// power, applied after all fees.
#[must_use]
pub fn non_running_multiplier() -> Decimal {
    Decimal::new(125, 2) // 1.25
}

/// Returns the starting price for a base rate: the rate's amount, floored
/// at `min_price` when the rate carries one.
#[must_use]
pub fn base_price(rate: &BaseRate) -> Decimal {
    let amount = rate.price.amount();
    match rate.min_price {
        Some(min) if amount < min => min,
        _ => amount,
    }
}

/// Applies the fee list in order against a running total.
///
/// `Fixed` fees add a constant; `Percentage` fees add
/// `running * amount / 100` of the **current** accumulated total, not the
/// original base price.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` if any step overflows.
pub fn accumulate_fees(base: Decimal, fees: &[AdditionalFee]) -> DomainResult<Decimal> {
    let mut running = base;
    for fee in fees {
        let addition = match fee.kind {
            FeeKind::Fixed => fee.amount,
            FeeKind::Percentage => running
                .checked_mul(fee.amount)
                .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
                .ok_or(DomainError::ArithmeticOverflow("percentage fee"))?,
        };
        running = running
            .checked_add(addition)
            .ok_or(DomainError::ArithmeticOverflow("fee accumulation"))?;
    }
    Ok(running)
}

/// Applies the non-running surcharge to a fee-inclusive total.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` if the product overflows.
pub fn apply_running_condition(
    total: Decimal,
    condition: RunningCondition,
) -> DomainResult<Decimal> {
    match condition {
        RunningCondition::Running => Ok(total),
        RunningCondition::NonRunning => total
            .checked_mul(non_running_multiplier())
            .ok_or(DomainError::ArithmeticOverflow("non-running surcharge")),
    }
}

/// Computes a provider's full price for a route: base rate (with
/// `min_price` floor), then fees in order, then the running-condition
/// surcharge. The result is unrounded, in the rate's currency.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` if any step overflows.
pub fn compute_provider_price(
    rate: &BaseRate,
    fees: &[AdditionalFee],
    condition: RunningCondition,
) -> DomainResult<Decimal> {
    let with_fees = accumulate_fees(base_price(rate), fees)?;
    apply_running_condition(with_fees, condition)
}
