//! record shape of a named scenario as kept by an external store
use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LoanInput;
use crate::decimal::Money;
use crate::errors::Result;
use crate::types::{PaymentFrequency, ScenarioId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedScenario {
    pub id: ScenarioId,
    pub name: String,
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub term_years: Decimal,
    /// frequency identifier, resolved leniently on load
    pub frequency: String,
    pub additional_payment: Money,
    pub created_at: DateTime<Utc>,
}

impl SavedScenario {
    /// capture the loan fields of `input` under a new id
    pub fn from_input(name: impl Into<String>, input: &LoanInput, time: &SafeTimeProvider) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            principal: input.principal(),
            annual_rate_percent: input.annual_rate().as_percentage(),
            term_years: input.term_years(),
            frequency: input.frequency().identifier().to_string(),
            additional_payment: input.additional_payment(),
            created_at: time.now(),
        }
    }

    pub fn payment_frequency(&self) -> PaymentFrequency {
        PaymentFrequency::resolve(&self.frequency)
    }

    /// rebuild a validated loan input; stored values are checked again
    pub fn to_loan_input(&self) -> Result<LoanInput> {
        LoanInput::builder()
            .principal(self.principal)
            .annual_rate_percent(self.annual_rate_percent)
            .term_years(self.term_years)
            .frequency(self.payment_frequency())
            .additional_payment(self.additional_payment)
            .build()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
