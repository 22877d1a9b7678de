pub mod comparison;
pub mod config;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod payments;
pub mod scenario;
pub mod summary;
pub mod types;

// re-export key types
pub use comparison::{CalculationResult, ComparisonEngine, ComparisonScenario, ScheduleSavings};
pub use config::{EngineConfig, LoanInput, LoanInputBuilder};
pub use decimal::{Money, Rate};
pub use engine::{
    aggregate_yearly, compare_scenarios, compare_scenarios_with, compare_schedules,
    compute_payment, generate_schedule, generate_schedule_with,
};
pub use errors::{LoanError, Result};
pub use payments::{
    AmortizationSchedule, LumpSumPlan, PaymentPeriod, PaymentPolicy, ScheduleGenerator,
};
pub use scenario::SavedScenario;
pub use summary::YearlySummary;
pub use types::{LumpSum, PaymentFrequency, ScenarioId, ScheduleTermination};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
