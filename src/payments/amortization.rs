use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, LoanInput};
use crate::decimal::Money;
use crate::summary::{aggregate_yearly, YearlySummary};
use crate::types::{PaymentFrequency, ScheduleTermination};

use super::overpayment::{LumpSumPlan, PaymentPolicy};
use super::periodic::periodic_payment;

/// one payment in an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    pub period_number: u32,
    pub payment_date: Option<NaiveDate>,
    /// cash paid this period, principal plus interest
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
    pub cumulative_interest_paid: Money,
    pub cumulative_principal_paid: Money,
    /// interest paid since the start of this period's year
    pub interest_paid_this_year: Money,
    pub year_index: u32,
    /// 0 - 100
    pub percent_of_principal_paid: Decimal,
}

/// amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub frequency: PaymentFrequency,
    /// payment made every period before final-period adjustments
    pub periodic_payment: Money,
    pub periods: Vec<PaymentPeriod>,
    pub total_interest: Money,
    pub total_paid: Money,
    pub termination: ScheduleTermination,
}

impl AmortizationSchedule {
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// get payment for specific period
    pub fn get_period(&self, period_number: u32) -> Option<&PaymentPeriod> {
        let index = period_number.checked_sub(1)?;
        self.periods.get(index as usize)
    }

    pub fn last_period(&self) -> Option<&PaymentPeriod> {
        self.periods.last()
    }

    /// balance after the given payment; the original principal before the first
    pub fn balance_after(&self, period_number: u32) -> Money {
        self.get_period(period_number)
            .map(|p| p.remaining_balance)
            .unwrap_or(self.principal)
    }

    pub fn total_principal_paid(&self) -> Money {
        self.last_period()
            .map(|p| p.cumulative_principal_paid)
            .unwrap_or(Money::ZERO)
    }

    /// number of periods divided by payments per year
    pub fn years_to_payoff(&self) -> Decimal {
        Decimal::from(self.periods.len() as u64) / Decimal::from(self.frequency.payments_per_year())
    }

    pub fn is_paid_off(&self) -> bool {
        self.termination.is_paid_off()
    }

    pub fn yearly_summary(&self) -> Vec<YearlySummary> {
        aggregate_yearly(&self.periods, self.frequency)
    }
}

/// builds schedules for one loan under different payment policies
pub struct ScheduleGenerator<'a> {
    input: &'a LoanInput,
    config: &'a EngineConfig,
}

impl<'a> ScheduleGenerator<'a> {
    pub fn new(input: &'a LoanInput, config: &'a EngineConfig) -> Self {
        Self { input, config }
    }

    /// the amortizing payment for the loan's stated term
    pub fn minimum_payment(&self) -> Money {
        periodic_payment(self.input)
    }

    /// base schedule: minimum payment for the full term, no lump sums
    pub fn minimum_schedule(&self) -> AmortizationSchedule {
        self.generate(PaymentPolicy::Minimum, &LumpSumPlan::new())
    }

    /// generate a schedule under `policy`, applying `lump_sums` as extra principal
    ///
    /// Each period charges interest on the opening balance, then applies the
    /// rest of the payment plus any lump sum to principal. Principal never
    /// exceeds the opening balance and a balance within the configured epsilon
    /// of zero is settled in full. Under [`PaymentPolicy::Minimum`] the last
    /// period of the term also settles whatever balance remains; a settlement
    /// larger than one regular payment is reported as
    /// [`ScheduleTermination::ResidualSettled`].
    pub fn generate(&self, policy: PaymentPolicy, lump_sums: &LumpSumPlan) -> AmortizationSchedule {
        let input = self.input;
        let frequency = input.frequency();
        let payments_per_year = frequency.payments_per_year();
        let rate = input.periodic_rate();
        let principal = input.principal();
        let epsilon = self.config.balance_epsilon;

        let payment = policy.resolve(self.minimum_payment());
        let bound = policy.period_bound(input.term_periods(), self.config.safety_cap_multiplier);

        log::debug!(
            "generating {:?} schedule: principal {}, payment {}, up to {} periods",
            policy,
            principal,
            payment,
            bound
        );

        let mut periods = Vec::with_capacity(bound.min(input.term_periods()) as usize);
        let mut balance = principal;
        let mut cumulative_interest = Money::ZERO;
        let mut cumulative_principal = Money::ZERO;
        let mut interest_this_year = Money::ZERO;
        let mut current_year = 1;
        let mut shortfall_reported = false;
        let mut settled_residual = None;

        for period_number in 1..=bound {
            let interest = Money::from_decimal(balance.as_decimal() * rate);

            if payment <= interest && !shortfall_reported {
                log::warn!(
                    "payment {} does not cover interest {} at period {}, balance will not amortize",
                    payment,
                    interest,
                    period_number
                );
                shortfall_reported = true;
            }

            let regular = (payment - interest).max(Money::ZERO) + lump_sums.amount_at(period_number);
            let mut principal_portion = regular;

            let settle = policy.settles_final_period() && period_number == bound;
            if settle && balance - regular > payment {
                settled_residual = Some(balance - regular);
            }
            if settle || principal_portion >= balance - epsilon {
                principal_portion = balance;
            }

            balance = (balance - principal_portion).max(Money::ZERO);
            cumulative_interest += interest;
            cumulative_principal += principal_portion;

            let year_index = (period_number - 1) / payments_per_year + 1;
            if year_index != current_year {
                current_year = year_index;
                interest_this_year = Money::ZERO;
            }
            interest_this_year += interest;

            periods.push(PaymentPeriod {
                period_number,
                payment_date: input
                    .start_date()
                    .and_then(|start| frequency.advance(start, period_number)),
                payment: principal_portion + interest,
                principal_portion,
                interest_portion: interest,
                remaining_balance: balance,
                cumulative_interest_paid: cumulative_interest,
                cumulative_principal_paid: cumulative_principal,
                interest_paid_this_year: interest_this_year,
                year_index,
                percent_of_principal_paid: (principal - balance).percent_of(principal),
            });

            if balance.is_zero() {
                break;
            }
        }

        let termination = match settled_residual {
            _ if !balance.is_zero() => {
                log::warn!(
                    "schedule stopped at safety cap of {} periods with {} outstanding",
                    bound,
                    balance
                );
                ScheduleTermination::SafetyCapReached { outstanding: balance }
            }
            Some(amount) => {
                log::warn!(
                    "final period settled a residual of {} above the regular payment of {}",
                    amount,
                    payment
                );
                ScheduleTermination::ResidualSettled { amount }
            }
            None => ScheduleTermination::PaidOff,
        };

        let total_paid: Money = periods.iter().map(|p| p.payment).sum();

        AmortizationSchedule {
            principal,
            frequency,
            periodic_payment: payment,
            periods,
            total_interest: cumulative_interest,
            total_paid,
            termination,
        }
    }
}
