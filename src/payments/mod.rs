pub mod amortization;
pub mod overpayment;
pub mod periodic;

pub use amortization::{AmortizationSchedule, PaymentPeriod, ScheduleGenerator};
pub use overpayment::{LumpSumPlan, PaymentPolicy};
pub use periodic::{calculate_periodic_payment, compound_factor, periodic_payment};
