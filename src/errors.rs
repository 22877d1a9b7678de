use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::PaymentFrequency;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("missing required field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("invalid loan amount: {amount} (must be greater than 0)")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid interest rate: {rate} (must be greater than 0)")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid loan term: {years} years (must be greater than 0)")]
    InvalidTerm {
        years: Decimal,
    },

    #[error("loan term of {years} years exceeds the maximum of {max} years")]
    TermTooLong {
        years: Decimal,
        max: Decimal,
    },

    #[error("loan term of {years} years is shorter than one {frequency:?} payment period")]
    TermTooShort {
        years: Decimal,
        frequency: PaymentFrequency,
    },

    #[error("invalid additional payment: {amount} (must be 0 or greater)")]
    InvalidAdditionalPayment {
        amount: Money,
    },

    #[error("invalid lump sum of {amount} at payment {period_number}")]
    InvalidLumpSum {
        period_number: u32,
        amount: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LoanError {
    /// true for errors raised while validating loan inputs
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            LoanError::MissingField { .. }
                | LoanError::InvalidPrincipal { .. }
                | LoanError::InvalidInterestRate { .. }
                | LoanError::InvalidTerm { .. }
                | LoanError::TermTooLong { .. }
                | LoanError::TermTooShort { .. }
                | LoanError::InvalidAdditionalPayment { .. }
                | LoanError::InvalidLumpSum { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
