//! stateless entry points over the calculation engine
//!
//! Every function takes a validated [`LoanInput`] and returns a fresh result;
//! nothing is cached between calls.

use crate::comparison::{CalculationResult, ComparisonEngine, ScheduleSavings};
use crate::config::{EngineConfig, LoanInput};
use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::{
    periodic_payment, AmortizationSchedule, LumpSumPlan, PaymentPeriod, PaymentPolicy,
    ScheduleGenerator,
};
use crate::summary::YearlySummary;
use crate::types::PaymentFrequency;

/// periodic payment for the loan's stated term
///
/// Never fails for a validated input; the `Result` matches the other entry
/// points.
pub fn compute_payment(input: &LoanInput) -> Result<Money> {
    Ok(periodic_payment(input))
}

/// base schedule under the minimum-payment policy, without lump sums
pub fn generate_schedule(input: &LoanInput) -> Result<AmortizationSchedule> {
    generate_schedule_with(input, PaymentPolicy::Minimum, &LumpSumPlan::new(), &EngineConfig::default())
}

/// schedule under an explicit policy, lump-sum plan and configuration
pub fn generate_schedule_with(
    input: &LoanInput,
    policy: PaymentPolicy,
    lump_sums: &LumpSumPlan,
    config: &EngineConfig,
) -> Result<AmortizationSchedule> {
    config.validate()?;
    Ok(ScheduleGenerator::new(input, config).generate(policy, lump_sums))
}

pub fn aggregate_yearly(periods: &[PaymentPeriod], frequency: PaymentFrequency) -> Vec<YearlySummary> {
    crate::summary::aggregate_yearly(periods, frequency)
}

/// base schedule plus the standard what-if scenarios
pub fn compare_scenarios(input: &LoanInput) -> Result<CalculationResult> {
    compare_scenarios_with(input, &EngineConfig::default())
}

pub fn compare_scenarios_with(input: &LoanInput, config: &EngineConfig) -> Result<CalculationResult> {
    config.validate()?;
    let base = ScheduleGenerator::new(input, config).minimum_schedule();
    Ok(ComparisonEngine::new(input, config).compare(base))
}

pub fn compare_schedules(base: &AmortizationSchedule, alternate: &AmortizationSchedule) -> ScheduleSavings {
    crate::comparison::compare_schedules(base, alternate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LoanError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn mortgage() -> LoanInput {
        LoanInput::builder()
            .principal(Money::from_major(300_000))
            .annual_rate_percent(dec!(5))
            .term_years(dec!(30))
            .build()
            .unwrap()
    }

    #[test]
    fn test_reference_mortgage() {
        let input = mortgage();

        let payment = compute_payment(&input).unwrap();
        assert_eq!(payment.round_dp(2), Money::from_decimal(dec!(1610.46)));

        let schedule = generate_schedule(&input).unwrap();
        assert_eq!(schedule.len(), 360);
        assert_eq!(schedule.last_period().unwrap().remaining_balance, Money::ZERO);
        assert!((schedule.total_interest.as_decimal() - dec!(279767)).abs() <= Decimal::ONE);

        let years = aggregate_yearly(&schedule.periods, input.frequency());
        assert_eq!(years.len(), 30);
    }

    #[test]
    fn test_calls_are_independent() {
        let input = mortgage();

        assert_eq!(compare_scenarios(&input).unwrap(), compare_scenarios(&input).unwrap());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let input = mortgage();
        let config = EngineConfig {
            safety_cap_multiplier: 0,
            ..EngineConfig::default()
        };

        let result = compare_scenarios_with(&input, &config);
        assert!(matches!(result, Err(LoanError::InvalidConfiguration { .. })));

        let result = generate_schedule_with(&input, PaymentPolicy::Minimum, &LumpSumPlan::new(), &config);
        assert!(matches!(result, Err(LoanError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_custom_increases() {
        let config = EngineConfig {
            increase_percentages: vec![dec!(5), dec!(100)],
            ..EngineConfig::default()
        };

        let result = compare_scenarios_with(&mortgage(), &config).unwrap();
        assert_eq!(result.comparison_scenarios.len(), 2);
        assert_eq!(result.comparison_scenarios[1].increase_percent, dec!(100));
    }

    #[test]
    fn test_fixed_policy_with_lump_sums() {
        let input = mortgage();
        let mut plan = LumpSumPlan::new();
        plan.add(crate::types::LumpSum::new(1, Money::from_major(100_000)));

        let schedule = generate_schedule_with(
            &input,
            PaymentPolicy::fixed(Money::from_major(2_000)),
            &plan,
            &EngineConfig::default(),
        )
        .unwrap();
        let base = generate_schedule(&input).unwrap();

        let savings = compare_schedules(&base, &schedule);
        assert!(savings.time_saved_years > dec!(10));
        assert!(savings.interest_saved.is_positive());
    }
}
