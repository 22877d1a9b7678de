use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::LoanInput;
use crate::decimal::{Money, Rate};
use crate::types::PaymentFrequency;

const SERIES_TOLERANCE: Decimal = dec!(0.0000000000000000000001);
const MAX_SERIES_TERMS: u32 = 200;

/// periodic payment that amortizes a validated loan over its term
pub fn periodic_payment(input: &LoanInput) -> Money {
    calculate_periodic_payment(
        input.principal(),
        input.annual_rate(),
        input.term_years(),
        input.frequency(),
    )
}

/// calculate the fixed periodic payment for an amortizing loan
///
/// `payment = P * r * (1 + r)^N / ((1 + r)^N - 1)` with `r` the annual rate
/// divided by the payments per year and `N = term_years * payments_per_year`.
/// `N` is not rounded, so fractional terms are priced exactly. The formula is
/// evaluated as `P * r / (1 - (1 + r)^-N)`.
pub fn calculate_periodic_payment(
    principal: Money,
    annual_rate: Rate,
    term_years: Decimal,
    frequency: PaymentFrequency,
) -> Money {
    let periods = term_years * Decimal::from(frequency.payments_per_year());

    if !principal.is_positive() {
        return Money::ZERO;
    }
    if periods <= Decimal::ZERO {
        return principal;
    }

    let r = annual_rate.per_period(frequency.payments_per_year());

    if r <= Decimal::ZERO {
        // no interest case
        return Money::from_decimal(principal.as_decimal() / periods);
    }

    let interest_only = principal.as_decimal() * r;

    match compound_factor(r, periods) {
        Some(factor) => {
            let denominator = Decimal::ONE - Decimal::ONE / factor;
            if denominator <= Decimal::ZERO {
                return Money::from_decimal(principal.as_decimal() / periods);
            }
            Money::from_decimal(interest_only / denominator)
        }
        None => {
            log::warn!(
                "compound factor overflowed for rate {} over {} periods, using interest-only limit",
                r,
                periods
            );
            Money::from_decimal(interest_only)
        }
    }
}

/// `(1 + rate)^periods` for a real-valued number of periods
///
/// The whole part is an exact repeated product, the fractional remainder goes
/// through `exp(frac * ln(1 + rate))`. Returns `None` on overflow.
pub fn compound_factor(rate: Decimal, periods: Decimal) -> Option<Decimal> {
    let base = Decimal::ONE + rate;
    let whole = periods.trunc();
    let fraction = periods - whole;

    let mut factor = Decimal::ONE;
    for _ in 0..whole.to_u64()? {
        factor = factor.checked_mul(base)?;
    }

    if fraction.is_zero() {
        Some(factor)
    } else {
        factor.checked_mul(decimal_exp(fraction * decimal_ln(base)))
    }
}

/// Taylor series for e^x, accurate for the small exponents used here.
fn decimal_exp(x: Decimal) -> Decimal {
    let mut sum = Decimal::ONE;
    let mut term = Decimal::ONE;
    for n in 1..=MAX_SERIES_TERMS {
        term = term * x / Decimal::from(n);
        sum += term;
        if term.abs() < SERIES_TOLERANCE {
            break;
        }
    }
    sum
}

/// ln(x) for x > 0 via ln(x) = 2 * atanh((x - 1) / (x + 1)).
fn decimal_ln(x: Decimal) -> Decimal {
    if x <= Decimal::ZERO || x == Decimal::ONE {
        return Decimal::ZERO;
    }

    let z = (x - Decimal::ONE) / (x + Decimal::ONE);
    let z_squared = z * z;
    let mut power = z;
    let mut sum = Decimal::ZERO;
    for k in 0..MAX_SERIES_TERMS {
        let term = power / Decimal::from(2 * k + 1);
        sum += term;
        if term.abs() < SERIES_TOLERANCE {
            break;
        }
        power *= z_squared;
    }
    sum * Decimal::TWO
}
