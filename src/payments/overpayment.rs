use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::LumpSum;

/// how the per-period payment of a schedule is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentPolicy {
    /// pay exactly the amortizing payment for the whole term
    Minimum,
    /// pay a chosen amount every period until the balance is gone
    Fixed { candidate: Money },
}

impl PaymentPolicy {
    pub fn fixed(candidate: Money) -> Self {
        PaymentPolicy::Fixed { candidate }
    }

    /// the payment actually made each period; never below `minimum`
    pub fn resolve(&self, minimum: Money) -> Money {
        match self {
            PaymentPolicy::Minimum => minimum,
            PaymentPolicy::Fixed { candidate } => (*candidate).max(minimum),
        }
    }

    /// maximum number of periods the schedule may run
    pub fn period_bound(&self, term_periods: u32, safety_cap_multiplier: u32) -> u32 {
        match self {
            PaymentPolicy::Minimum => term_periods,
            PaymentPolicy::Fixed { .. } => term_periods.saturating_mul(safety_cap_multiplier),
        }
    }

    /// whether the last period in the bound clears whatever balance is left
    pub fn settles_final_period(&self) -> bool {
        matches!(self, PaymentPolicy::Minimum)
    }
}

/// lump sums keyed by payment number, amounts on the same payment summed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LumpSumPlan {
    by_period: BTreeMap<u32, Money>,
}

impl LumpSumPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lump_sums(lump_sums: &[LumpSum]) -> Self {
        let mut plan = Self::new();
        for lump_sum in lump_sums {
            plan.add(*lump_sum);
        }
        plan
    }

    pub fn add(&mut self, lump_sum: LumpSum) {
        *self.by_period.entry(lump_sum.period_number).or_insert(Money::ZERO) += lump_sum.amount;
    }

    /// extra principal scheduled for `period_number`
    pub fn amount_at(&self, period_number: u32) -> Money {
        self.by_period.get(&period_number).copied().unwrap_or(Money::ZERO)
    }

    pub fn total(&self) -> Money {
        self.by_period.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_period.is_empty()
    }
}
