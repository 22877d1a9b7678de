use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, LoanInput};
use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::{AmortizationSchedule, LumpSumPlan, PaymentPolicy, ScheduleGenerator};
use crate::types::ScheduleTermination;

/// an alternate payment policy measured against the base schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonScenario {
    /// payment increase over the base payment, 0 for lump-sum only
    pub increase_percent: Decimal,
    /// payment actually made each period
    pub new_periodic_payment: Money,
    pub periods_to_payoff: u32,
    pub years_to_payoff: Decimal,
    pub interest_saved_vs_base: Money,
    pub time_saved_years_vs_base: Decimal,
    pub total_cost: Money,
    pub total_saved_vs_base: Money,
    pub termination: ScheduleTermination,
}

impl ComparisonScenario {
    pub fn is_paid_off(&self) -> bool {
        self.termination.is_paid_off()
    }
}

/// base schedule plus every scenario derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub periodic_payment: Money,
    pub total_interest: Money,
    pub total_cost: Money,
    pub schedule: AmortizationSchedule,
    /// one entry per configured increase, in configured order
    pub comparison_scenarios: Vec<ComparisonScenario>,
    pub additional_payment_scenario: Option<ComparisonScenario>,
    pub lump_sum_scenario: Option<ComparisonScenario>,
}

impl CalculationResult {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// scenario for a given increase percentage, if one was run
    pub fn scenario_for(&self, increase_percent: Decimal) -> Option<&ComparisonScenario> {
        self.comparison_scenarios
            .iter()
            .find(|s| s.increase_percent == increase_percent)
    }
}

/// time and interest saved by one schedule over another
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSavings {
    pub time_saved_years: Decimal,
    pub interest_saved: Money,
}

/// savings of `alternate` over `base`; either may use any frequency
pub fn compare_schedules(base: &AmortizationSchedule, alternate: &AmortizationSchedule) -> ScheduleSavings {
    ScheduleSavings {
        time_saved_years: base.years_to_payoff() - alternate.years_to_payoff(),
        interest_saved: base.total_interest - alternate.total_interest,
    }
}

/// runs the what-if scenarios for one loan
pub struct ComparisonEngine<'a> {
    input: &'a LoanInput,
    config: &'a EngineConfig,
}

impl<'a> ComparisonEngine<'a> {
    pub fn new(input: &'a LoanInput, config: &'a EngineConfig) -> Self {
        Self { input, config }
    }

    /// build the full result around an already generated base schedule
    ///
    /// An empty base schedule has nothing to measure savings against, so the
    /// result carries no scenarios.
    pub fn compare(&self, base: AmortizationSchedule) -> CalculationResult {
        let base_payment = base.periodic_payment;

        if base.is_empty() {
            log::debug!("base schedule is empty, skipping scenario comparison");
            return CalculationResult {
                periodic_payment: base_payment,
                total_interest: base.total_interest,
                total_cost: base.total_paid,
                schedule: base,
                comparison_scenarios: Vec::new(),
                additional_payment_scenario: None,
                lump_sum_scenario: None,
            };
        }

        let generator = ScheduleGenerator::new(self.input, self.config);

        let comparison_scenarios = self
            .config
            .increase_percentages
            .iter()
            .map(|&percent| {
                let candidate = base_payment + base_payment.percentage(percent);
                let schedule = generator.generate(PaymentPolicy::fixed(candidate), &LumpSumPlan::new());
                self.derive(&base, &schedule, percent)
            })
            .collect();

        let additional = self.input.additional_payment();
        let additional_payment_scenario = additional.is_positive().then(|| {
            let schedule = generator.generate(
                PaymentPolicy::fixed(base_payment + additional),
                &LumpSumPlan::new(),
            );
            self.derive(&base, &schedule, additional.percent_of(base_payment))
        });

        let lump_sums = LumpSumPlan::from_lump_sums(self.input.lump_sums());
        let lump_sum_scenario = (!lump_sums.is_empty()).then(|| {
            let schedule = generator.generate(PaymentPolicy::Minimum, &lump_sums);
            self.derive(&base, &schedule, Decimal::ZERO)
        });

        log::debug!(
            "compared {} scenarios against base payment {}",
            self.config.increase_percentages.len(),
            base_payment
        );

        CalculationResult {
            periodic_payment: base_payment,
            total_interest: base.total_interest,
            total_cost: base.total_paid,
            schedule: base,
            comparison_scenarios,
            additional_payment_scenario,
            lump_sum_scenario,
        }
    }

    fn derive(
        &self,
        base: &AmortizationSchedule,
        scenario: &AmortizationSchedule,
        increase_percent: Decimal,
    ) -> ComparisonScenario {
        let years_to_payoff = scenario.years_to_payoff();

        ComparisonScenario {
            increase_percent,
            new_periodic_payment: scenario.periodic_payment,
            periods_to_payoff: scenario.len() as u32,
            years_to_payoff,
            interest_saved_vs_base: base.total_interest - scenario.total_interest,
            time_saved_years_vs_base: self.input.term_years() - years_to_payoff,
            total_cost: scenario.total_paid,
            total_saved_vs_base: base.total_paid - scenario.total_paid,
            termination: scenario.termination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentFrequency;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn loan(additional: i64) -> LoanInput {
        LoanInput::builder()
            .principal(Money::from_major(525_000))
            .annual_rate_percent(dec!(5.05))
            .term_years(dec!(27.5))
            .frequency(PaymentFrequency::Monthly)
            .additional_payment(Money::from_major(additional))
            .build()
            .unwrap()
    }

    fn run(input: &LoanInput) -> CalculationResult {
        let config = EngineConfig::default();
        let base = ScheduleGenerator::new(input, &config).minimum_schedule();
        ComparisonEngine::new(input, &config).compare(base)
    }

    #[test]
    fn test_additional_payment_scenario() {
        let result = run(&loan(500));
        let scenario = result.additional_payment_scenario.as_ref().unwrap();

        assert!((result.periodic_payment.as_decimal() - dec!(2946.28)).abs() <= dec!(0.01));
        assert_eq!(result.schedule.len(), 330);
        assert!(scenario.years_to_payoff < dec!(27.5));
        assert!(scenario.interest_saved_vs_base.is_positive());
        assert!(scenario.time_saved_years_vs_base > Decimal::ZERO);
        assert!(scenario.is_paid_off());
        assert_eq!(
            scenario.new_periodic_payment,
            result.periodic_payment + Money::from_major(500)
        );
        // roughly 17%
        assert!(scenario.increase_percent > dec!(16.9) && scenario.increase_percent < dec!(17.1));
    }

    #[test]
    fn test_empty_base_schedule_yields_no_scenarios() {
        let input = LoanInput::builder()
            .principal(Money::from_major(200_000))
            .annual_rate_percent(dec!(4))
            .term_years(dec!(25))
            .additional_payment(Money::from_major(300))
            .lump_sum(12, Money::from_major(10_000))
            .build()
            .unwrap();
        let config = EngineConfig::default();
        let mut base = ScheduleGenerator::new(&input, &config).minimum_schedule();
        base.periods.clear();
        base.total_interest = Money::ZERO;
        base.total_paid = Money::ZERO;

        let result = ComparisonEngine::new(&input, &config).compare(base);

        assert!(result.comparison_scenarios.is_empty());
        assert_eq!(result.additional_payment_scenario, None);
        assert_eq!(result.lump_sum_scenario, None);
        assert_eq!(result.total_interest, Money::ZERO);
        assert!(result.schedule.is_empty());
    }

    #[test]
    fn test_no_additional_payment_scenario_without_extra() {
        let result = run(&loan(0));

        assert!(result.additional_payment_scenario.is_none());
        assert!(result.lump_sum_scenario.is_none());
        assert_eq!(result.comparison_scenarios.len(), 3);
    }

    #[test]
    fn test_percentage_scenarios_are_ordered_and_improving() {
        let result = run(&loan(0));
        let scenarios = &result.comparison_scenarios;

        let percents: Vec<Decimal> = scenarios.iter().map(|s| s.increase_percent).collect();
        assert_eq!(percents, vec![dec!(10), dec!(25), dec!(50)]);

        for pair in scenarios.windows(2) {
            assert!(pair[1].total_saved_vs_base > pair[0].total_saved_vs_base);
            assert!(pair[1].years_to_payoff < pair[0].years_to_payoff);
            assert!(pair[1].interest_saved_vs_base > pair[0].interest_saved_vs_base);
        }
        for scenario in scenarios {
            assert!(scenario.years_to_payoff < dec!(27.5));
            assert!(scenario.total_cost < result.total_cost);
            assert!(scenario.is_paid_off());
        }
    }

    #[test]
    fn test_totals_follow_base_schedule() {
        let result = run(&loan(0));

        assert_eq!(result.total_interest, result.schedule.total_interest);
        assert_eq!(result.total_cost, Money::from_major(525_000) + result.total_interest);
        assert_eq!(result.scenario_for(dec!(25)).map(|s| s.increase_percent), Some(dec!(25)));
        assert!(result.scenario_for(dec!(75)).is_none());
    }

    #[test]
    fn test_lump_sum_scenario() {
        let input = LoanInput::builder()
            .principal(Money::from_major(200_000))
            .annual_rate_percent(dec!(4))
            .term_years(dec!(25))
            .lump_sum(24, Money::from_major(20_000))
            .lump_sum(60, Money::from_major(10_000))
            .build()
            .unwrap();
        let result = run(&input);
        let scenario = result.lump_sum_scenario.as_ref().unwrap();

        // base schedule ignores lump sums
        assert_eq!(result.schedule.len(), 300);
        assert_eq!(scenario.increase_percent, Decimal::ZERO);
        assert_eq!(scenario.new_periodic_payment, result.periodic_payment);
        assert!(scenario.periods_to_payoff < 300);
        assert!(scenario.interest_saved_vs_base.is_positive());
    }

    #[test]
    fn test_compare_schedules_across_frequencies() {
        let config = EngineConfig::default();
        let monthly = loan(0);
        let biweekly = monthly.with_frequency(PaymentFrequency::Biweekly).unwrap();

        let base = ScheduleGenerator::new(&monthly, &config).minimum_schedule();
        let alternate = ScheduleGenerator::new(&biweekly, &config).minimum_schedule();
        let savings = compare_schedules(&base, &alternate);

        // both run the full 27.5 years, biweekly compounds more often but pays sooner
        assert_eq!(savings.time_saved_years, Decimal::ZERO);
        assert!(savings.interest_saved.is_positive());

        let self_savings = compare_schedules(&base, &base);
        assert_eq!(self_savings.interest_saved, Money::ZERO);
    }

    #[test]
    fn test_json_projection() {
        let result = run(&loan(250));
        let json = result.to_json_pretty().unwrap();

        assert!(json.contains("\"comparison_scenarios\""));
        assert!(json.contains("\"additional_payment_scenario\""));
        assert_eq!(CalculationResult::from_json(&json).unwrap(), result);
    }
}
