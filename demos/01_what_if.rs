/// what-if comparison - extra payments, percentage increases and lump sums
use loan_repayment_rs::{compare_scenarios, Decimal, LoanInput, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let loan = LoanInput::builder()
        .principal(Money::from_major(525_000))
        .annual_rate_percent(Decimal::new(505, 2))
        .term_years(Decimal::new(275, 1))
        .frequency_id("monthly")
        .additional_payment(Money::from_major(500))
        .lump_sum(24, Money::from_major(20_000))
        .build()?;

    let result = compare_scenarios(&loan)?;

    println!("base payment:   {}", result.periodic_payment.round_dp(2));
    println!("base interest:  {}", result.total_interest.round_dp(2));
    println!();

    for scenario in &result.comparison_scenarios {
        println!(
            "+{}%: pay {} for {} years, save {} interest",
            scenario.increase_percent,
            scenario.new_periodic_payment.round_dp(2),
            scenario.years_to_payoff.round_dp(2),
            scenario.interest_saved_vs_base.round_dp(2),
        );
    }

    if let Some(extra) = &result.additional_payment_scenario {
        println!(
            "extra {}: paid off in {} years, {} years sooner",
            loan.additional_payment(),
            extra.years_to_payoff.round_dp(2),
            extra.time_saved_years_vs_base.round_dp(2),
        );
    }

    if let Some(lump) = &result.lump_sum_scenario {
        println!(
            "lump sums: paid off after {} payments, save {} interest",
            lump.periods_to_payoff,
            lump.interest_saved_vs_base.round_dp(2),
        );
    }

    Ok(())
}
