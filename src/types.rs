use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a saved scenario
pub type ScenarioId = Uuid;

/// how often repayments are made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentFrequency {
    Weekly,
    /// every two weeks, also called fortnightly
    Biweekly,
    #[default]
    Monthly,
}

impl PaymentFrequency {
    /// fallback used when an identifier cannot be resolved
    pub const FALLBACK: PaymentFrequency = PaymentFrequency::Monthly;

    pub const ALL: [PaymentFrequency; 3] = [
        PaymentFrequency::Weekly,
        PaymentFrequency::Biweekly,
        PaymentFrequency::Monthly,
    ];

    pub fn payments_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::Biweekly => 26,
            PaymentFrequency::Monthly => 12,
        }
    }

    /// canonical identifier, as stored in saved scenarios
    pub fn identifier(&self) -> &'static str {
        match self {
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::Biweekly => "biweekly",
            PaymentFrequency::Monthly => "monthly",
        }
    }

    /// strict lookup, `None` for unknown identifiers
    pub fn parse(identifier: &str) -> Option<Self> {
        match identifier.trim().to_ascii_lowercase().as_str() {
            "weekly" => Some(PaymentFrequency::Weekly),
            "biweekly" | "bi-weekly" | "fortnightly" => Some(PaymentFrequency::Biweekly),
            "monthly" => Some(PaymentFrequency::Monthly),
            _ => None,
        }
    }

    /// lookup with fallback to [`PaymentFrequency::FALLBACK`]
    pub fn resolve(identifier: &str) -> Self {
        Self::parse(identifier).unwrap_or_else(|| {
            log::debug!(
                "unrecognised payment frequency {:?}, falling back to {:?}",
                identifier,
                Self::FALLBACK
            );
            Self::FALLBACK
        })
    }

    /// date of the `period_number`-th payment counted from `start`
    pub fn advance(&self, start: NaiveDate, period_number: u32) -> Option<NaiveDate> {
        match self {
            PaymentFrequency::Weekly => start.checked_add_days(Days::new(7 * period_number as u64)),
            PaymentFrequency::Biweekly => {
                start.checked_add_days(Days::new(14 * period_number as u64))
            }
            PaymentFrequency::Monthly => start.checked_add_months(Months::new(period_number)),
        }
    }
}

/// one-time extra principal payment made alongside a scheduled payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LumpSum {
    /// 1-based payment number the lump sum is made with
    pub period_number: u32,
    pub amount: Money,
}

impl LumpSum {
    pub fn new(period_number: u32, amount: Money) -> Self {
        Self { period_number, amount }
    }
}

/// why a schedule stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleTermination {
    /// balance reached zero
    PaidOff,
    /// period bound hit with a balance still outstanding
    SafetyCapReached { outstanding: Money },
    /// final period cleared a balance larger than one regular payment
    ResidualSettled { amount: Money },
}

impl ScheduleTermination {
    pub fn is_paid_off(&self) -> bool {
        matches!(self, ScheduleTermination::PaidOff)
    }

    /// true when the last period leaves no balance, by payoff or settlement
    pub fn is_balance_cleared(&self) -> bool {
        !matches!(self, ScheduleTermination::SafetyCapReached { .. })
    }
}
