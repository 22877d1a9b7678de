/// quick start - minimal example to get started
use loan_repayment_rs::{compute_payment, generate_schedule, Decimal, LoanInput, Money, PaymentFrequency};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a $300,000 mortgage at 5% over 30 years, paid monthly
    let loan = LoanInput::builder()
        .principal(Money::from_major(300_000))
        .annual_rate_percent(Decimal::new(5, 0))
        .term_years(Decimal::new(30, 0))
        .frequency(PaymentFrequency::Monthly)
        .build()?;

    let payment = compute_payment(&loan)?;
    let schedule = generate_schedule(&loan)?;

    println!("monthly payment: {}", payment.round_dp(2));
    println!("payments:        {}", schedule.len());
    println!("total interest:  {}", schedule.total_interest.round_dp(2));
    println!("total paid:      {}", schedule.total_paid.round_dp(2));

    for year in schedule.yearly_summary().iter().step_by(5) {
        println!(
            "year {:>2}: balance {:>12}  principal {:>10}  interest {:>10}",
            year.year,
            year.end_of_year_balance.round_dp(2),
            year.principal_paid_this_year.round_dp(2),
            year.interest_paid_this_year.round_dp(2),
        );
    }

    Ok(())
}
