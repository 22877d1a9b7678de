use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::{LumpSum, PaymentFrequency};

/// longest loan term accepted by [`LoanInputBuilder::build`]
pub const MAX_TERM_YEARS: Decimal = dec!(100);

/// validated definition of a fixed-rate loan
///
/// Built through [`LoanInputBuilder`]; every instance satisfies the bounds
/// checked in [`LoanInputBuilder::build`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanInput {
    principal: Money,
    annual_rate: Rate,
    term_years: Decimal,
    frequency: PaymentFrequency,
    additional_payment: Money,
    lump_sums: Vec<LumpSum>,
    start_date: Option<NaiveDate>,
}

impl LoanInput {
    pub fn builder() -> LoanInputBuilder {
        LoanInputBuilder::new()
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn term_years(&self) -> Decimal {
        self.term_years
    }

    pub fn frequency(&self) -> PaymentFrequency {
        self.frequency
    }

    pub fn additional_payment(&self) -> Money {
        self.additional_payment
    }

    pub fn lump_sums(&self) -> &[LumpSum] {
        &self.lump_sums
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn payments_per_year(&self) -> u32 {
        self.frequency.payments_per_year()
    }

    /// interest rate applied each period
    pub fn periodic_rate(&self) -> Decimal {
        self.annual_rate.per_period(self.payments_per_year())
    }

    /// real-valued number of periods in the term, before rounding
    pub fn exact_periods(&self) -> Decimal {
        self.term_years * Decimal::from(self.payments_per_year())
    }

    /// number of periods in the term, rounded half away from zero
    pub fn term_periods(&self) -> u32 {
        term_periods(self.term_years, self.frequency).unwrap_or(0)
    }

    /// same loan with a different frequency
    pub fn with_frequency(&self, frequency: PaymentFrequency) -> Result<LoanInput> {
        LoanInputBuilder::from_input(self).frequency(frequency).build()
    }
}

fn term_periods(term_years: Decimal, frequency: PaymentFrequency) -> Option<u32> {
    (term_years * Decimal::from(frequency.payments_per_year()))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}

/// builder for loan inputs
#[derive(Debug, Clone, Default)]
pub struct LoanInputBuilder {
    principal: Option<Money>,
    annual_rate: Option<Rate>,
    term_years: Option<Decimal>,
    frequency: Option<PaymentFrequency>,
    additional_payment: Option<Money>,
    lump_sums: Vec<LumpSum>,
    start_date: Option<NaiveDate>,
}

impl LoanInputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_input(input: &LoanInput) -> Self {
        Self {
            principal: Some(input.principal),
            annual_rate: Some(input.annual_rate),
            term_years: Some(input.term_years),
            frequency: Some(input.frequency),
            additional_payment: Some(input.additional_payment),
            lump_sums: input.lump_sums.clone(),
            start_date: input.start_date,
        }
    }

    pub fn principal(mut self, amount: Money) -> Self {
        self.principal = Some(amount);
        self
    }

    pub fn annual_rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    /// annual rate as a percentage figure, e.g. `dec!(5.05)`
    pub fn annual_rate_percent(self, percent: Decimal) -> Self {
        self.annual_rate(Rate::from_percent(percent))
    }

    pub fn term_years(mut self, years: Decimal) -> Self {
        self.term_years = Some(years);
        self
    }

    pub fn frequency(mut self, frequency: PaymentFrequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// frequency from a free-form identifier, falling back to monthly
    pub fn frequency_id(self, identifier: &str) -> Self {
        self.frequency(PaymentFrequency::resolve(identifier))
    }

    pub fn additional_payment(mut self, amount: Money) -> Self {
        self.additional_payment = Some(amount);
        self
    }

    pub fn lump_sum(mut self, period_number: u32, amount: Money) -> Self {
        self.lump_sums.push(LumpSum::new(period_number, amount));
        self
    }

    pub fn lump_sums(mut self, lump_sums: impl IntoIterator<Item = LumpSum>) -> Self {
        self.lump_sums.extend(lump_sums);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn build(self) -> Result<LoanInput> {
        let principal = self.principal.ok_or(LoanError::MissingField { field: "principal" })?;
        let annual_rate = self.annual_rate.ok_or(LoanError::MissingField { field: "annual_rate" })?;
        let term_years = self.term_years.ok_or(LoanError::MissingField { field: "term_years" })?;
        let frequency = self.frequency.unwrap_or_default();
        let additional_payment = self.additional_payment.unwrap_or(Money::ZERO);

        if !principal.is_positive() {
            return Err(LoanError::InvalidPrincipal { amount: principal });
        }
        if annual_rate.as_decimal() <= Decimal::ZERO {
            return Err(LoanError::InvalidInterestRate { rate: annual_rate });
        }
        if term_years <= Decimal::ZERO {
            return Err(LoanError::InvalidTerm { years: term_years });
        }
        if term_years > MAX_TERM_YEARS {
            return Err(LoanError::TermTooLong { years: term_years, max: MAX_TERM_YEARS });
        }
        if additional_payment.is_negative() {
            return Err(LoanError::InvalidAdditionalPayment { amount: additional_payment });
        }
        match term_periods(term_years, frequency) {
            Some(0) => return Err(LoanError::TermTooShort { years: term_years, frequency }),
            None => return Err(LoanError::InvalidTerm { years: term_years }),
            Some(_) => {}
        }
        if let Some(bad) = self
            .lump_sums
            .iter()
            .find(|l| l.period_number == 0 || !l.amount.is_positive())
        {
            return Err(LoanError::InvalidLumpSum {
                period_number: bad.period_number,
                amount: bad.amount,
            });
        }

        Ok(LoanInput {
            principal,
            annual_rate,
            term_years,
            frequency,
            additional_payment,
            lump_sums: self.lump_sums,
            start_date: self.start_date,
        })
    }
}

/// tunables for schedule generation and scenario comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// payment increases compared against the base schedule, in order
    pub increase_percentages: Vec<Decimal>,
    /// fixed-payment schedules stop after `term periods * multiplier`
    pub safety_cap_multiplier: u32,
    /// balances at or below this are settled to zero
    pub balance_epsilon: Money,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            increase_percentages: vec![dec!(10), dec!(25), dec!(50)],
            safety_cap_multiplier: 2,
            balance_epsilon: Money::from_decimal(dec!(0.001)),
        }
    }
}

impl EngineConfig {
    /// parse and validate a json configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.increase_percentages.is_empty() {
            return Err(LoanError::InvalidConfiguration {
                message: "at least one increase percentage is required".to_string(),
            });
        }
        if let Some(p) = self.increase_percentages.iter().find(|p| **p <= Decimal::ZERO) {
            return Err(LoanError::InvalidConfiguration {
                message: format!("increase percentage must be positive, got {}", p),
            });
        }
        if self.safety_cap_multiplier == 0 {
            return Err(LoanError::InvalidConfiguration {
                message: "safety cap multiplier must be at least 1".to_string(),
            });
        }
        if self.balance_epsilon.is_negative() {
            return Err(LoanError::InvalidConfiguration {
                message: format!("balance epsilon must not be negative, got {}", self.balance_epsilon),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mortgage() -> LoanInputBuilder {
        LoanInput::builder()
            .principal(Money::from_major(300_000))
            .annual_rate_percent(dec!(5))
            .term_years(dec!(30))
    }

    #[test]
    fn test_build_defaults() {
        let input = mortgage().build().unwrap();

        assert_eq!(input.frequency(), PaymentFrequency::Monthly);
        assert_eq!(input.additional_payment(), Money::ZERO);
        assert!(input.lump_sums().is_empty());
        assert_eq!(input.term_periods(), 360);
        assert_eq!(input.annual_rate().as_decimal(), dec!(0.05));
    }

    #[test]
    fn test_term_periods_rounding() {
        let input = mortgage().term_years(dec!(27.5)).build().unwrap();
        assert_eq!(input.term_periods(), 330);

        // 2.3 years monthly is 27.6 periods
        let input = mortgage().term_years(dec!(2.3)).build().unwrap();
        assert_eq!(input.exact_periods(), dec!(27.6));
        assert_eq!(input.term_periods(), 28);

        let input = mortgage().term_years(dec!(0.5)).frequency(PaymentFrequency::Weekly).build().unwrap();
        assert_eq!(input.term_periods(), 26);
    }

    #[test]
    fn test_rejects_non_positive_fields() {
        let err = mortgage().principal(Money::ZERO).build().unwrap_err();
        assert!(matches!(err, LoanError::InvalidPrincipal { .. }));
        assert!(err.is_invalid_input());

        let err = mortgage().annual_rate_percent(dec!(0)).build().unwrap_err();
        assert!(matches!(err, LoanError::InvalidInterestRate { .. }));

        let err = mortgage().term_years(dec!(-1)).build().unwrap_err();
        assert!(matches!(err, LoanError::InvalidTerm { .. }));

        let err = mortgage()
            .additional_payment(Money::from_major(-5))
            .build()
            .unwrap_err();
        assert!(matches!(err, LoanError::InvalidAdditionalPayment { .. }));
    }

    #[test]
    fn test_rejects_missing_fields() {
        let err = LoanInput::builder()
            .principal(Money::from_major(1000))
            .term_years(dec!(1))
            .build()
            .unwrap_err();
        assert!(matches!(err, LoanError::MissingField { field: "annual_rate" }));
    }

    #[test]
    fn test_rejects_term_longer_than_maximum() {
        let err = mortgage().term_years(dec!(100000000)).build().unwrap_err();
        assert!(matches!(err, LoanError::TermTooLong { .. }));
        assert!(err.is_invalid_input());

        let input = mortgage()
            .term_years(MAX_TERM_YEARS)
            .frequency(PaymentFrequency::Weekly)
            .build()
            .unwrap();
        assert_eq!(input.term_periods(), 5200);
    }

    #[test]
    fn test_rejects_term_shorter_than_one_period() {
        let err = mortgage().term_years(dec!(0.01)).build().unwrap_err();
        assert!(matches!(err, LoanError::TermTooShort { .. }));
    }

    #[test]
    fn test_rejects_invalid_lump_sums() {
        let err = mortgage().lump_sum(0, Money::from_major(100)).build().unwrap_err();
        assert!(matches!(err, LoanError::InvalidLumpSum { period_number: 0, .. }));

        let err = mortgage().lump_sum(12, Money::ZERO).build().unwrap_err();
        assert!(matches!(err, LoanError::InvalidLumpSum { period_number: 12, .. }));
    }

    #[test]
    fn test_frequency_id_fallback() {
        let input = mortgage().frequency_id("fortnightly").build().unwrap();
        assert_eq!(input.frequency(), PaymentFrequency::Biweekly);

        let input = mortgage().frequency_id("daily").build().unwrap();
        assert_eq!(input.frequency(), PaymentFrequency::Monthly);
    }

    #[test]
    fn test_with_frequency() {
        let monthly = mortgage().lump_sum(6, Money::from_major(1000)).build().unwrap();
        let weekly = monthly.with_frequency(PaymentFrequency::Weekly).unwrap();

        assert_eq!(weekly.term_periods(), 1560);
        assert_eq!(weekly.principal(), monthly.principal());
        assert_eq!(weekly.lump_sums(), monthly.lump_sums());
    }

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.increase_percentages, vec![dec!(10), dec!(25), dec!(50)]);
        assert_eq!(config.safety_cap_multiplier, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_engine_config_from_json() {
        let config = EngineConfig::from_json(r#"{ "safety_cap_multiplier": 3 }"#).unwrap();
        assert_eq!(config.safety_cap_multiplier, 3);
        assert_eq!(config.increase_percentages.len(), 3);

        let err = EngineConfig::from_json(r#"{ "increase_percentages": [] }"#).unwrap_err();
        assert!(matches!(err, LoanError::InvalidConfiguration { .. }));

        let err = EngineConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, LoanError::Serialization(_)));
    }
}
