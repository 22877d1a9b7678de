/// saved scenario - capture a loan as a storable record and restore it
use loan_repayment_rs::{
    compare_schedules, generate_schedule, Decimal, LoanInput, Money, PaymentFrequency,
    SafeTimeProvider, SavedScenario, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    let monthly = LoanInput::builder()
        .principal(Money::from_major(250_000))
        .annual_rate_percent(Decimal::new(45, 1))
        .term_years(Decimal::new(25, 0))
        .build()?;

    let saved = SavedScenario::from_input("refinance option", &monthly, &time);
    let json = saved.to_json()?;
    println!("{}", json);

    let restored = SavedScenario::from_json(&json)?.to_loan_input()?;
    let biweekly = restored.with_frequency(PaymentFrequency::Biweekly)?;

    let savings = compare_schedules(&generate_schedule(&restored)?, &generate_schedule(&biweekly)?);
    println!(
        "switching to biweekly saves {} interest over the same {} years",
        savings.interest_saved.round_dp(2),
        biweekly.term_years(),
    );

    Ok(())
}
