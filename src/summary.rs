use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::payments::PaymentPeriod;
use crate::types::PaymentFrequency;

/// totals for one year of a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    /// 1-based
    pub year: u32,
    pub end_of_year_balance: Money,
    pub principal_paid_this_year: Money,
    pub interest_paid_this_year: Money,
}

impl YearlySummary {
    pub fn total_paid(&self) -> Money {
        self.principal_paid_this_year + self.interest_paid_this_year
    }
}

/// collapse a schedule into per-year summaries
///
/// Periods are taken in blocks of `payments_per_year`; the last block may be
/// short. Amounts paid within a year are the difference between the cumulative
/// totals at the end of that year and at the end of the year before.
pub fn aggregate_yearly(periods: &[PaymentPeriod], frequency: PaymentFrequency) -> Vec<YearlySummary> {
    let block = frequency.payments_per_year() as usize;

    let mut summaries = Vec::with_capacity(periods.len().div_ceil(block));
    let mut prior_principal = Money::ZERO;
    let mut prior_interest = Money::ZERO;

    for (index, year) in periods.chunks(block).enumerate() {
        let Some(last) = year.last() else {
            continue;
        };

        summaries.push(YearlySummary {
            year: index as u32 + 1,
            end_of_year_balance: last.remaining_balance,
            principal_paid_this_year: last.cumulative_principal_paid - prior_principal,
            interest_paid_this_year: last.cumulative_interest_paid - prior_interest,
        });

        prior_principal = last.cumulative_principal_paid;
        prior_interest = last.cumulative_interest_paid;
    }

    summaries
}
