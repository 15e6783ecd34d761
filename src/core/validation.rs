//! Intake checks for hand-entered borrower and lender records.
//!
//! The pipeline itself assumes pre-validated input; these rules belong to
//! whatever accepts records from the outside (the CLI, a form handler).

use crate::core::borrower::Borrower;
use crate::core::lender::Lender;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// A record field that failed an intake rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be at least 2 characters")]
    NameTooShort { field: &'static str },
    #[error("{field} is not a valid email address: {value:?}")]
    InvalidEmail { field: &'static str, value: String },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: Decimal,
        max: Decimal,
        value: Decimal,
    },
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: Decimal,
        value: Decimal,
    },
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

fn check_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < 2 {
        return Err(ValidationError::NameTooShort { field });
    }
    Ok(())
}

fn check_email(field: &'static str, email: &str) -> Result<(), ValidationError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::InvalidEmail {
            field,
            value: email.to_string(),
        });
    }
    Ok(())
}

fn check_range(
    field: &'static str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

fn check_min(field: &'static str, value: Decimal, min: Decimal) -> Result<(), ValidationError> {
    if value < min {
        return Err(ValidationError::BelowMinimum { field, min, value });
    }
    Ok(())
}

fn check_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

impl Borrower {
    /// Apply the intake rules, stopping at the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name("name", &self.name)?;
        check_email("email", &self.email)?;
        check_range("loan_amount", self.loan_amount, dec!(1000), dec!(100000))?;
        check_non_empty("loan_purpose", self.loan_purpose.as_str())?;
        check_range(
            "credit_score",
            Decimal::from(self.credit_score),
            dec!(300),
            dec!(850),
        )?;
        check_min("income", self.income, dec!(10000))?;
        check_non_empty("employment_status", self.employment_status.as_str())?;
        check_range(
            "debt_to_income_ratio",
            self.debt_to_income_ratio,
            Decimal::ZERO,
            dec!(100),
        )?;
        check_min(
            "loan_term",
            Decimal::from(self.loan_term.months()),
            Decimal::ONE,
        )?;
        check_non_empty("housing_status", &self.housing_status)?;
        Ok(())
    }
}

impl Lender {
    /// Apply the intake rules, stopping at the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name("name", &self.name)?;
        check_email("email", &self.email)?;
        check_range(
            "amount_to_lend",
            self.amount_to_lend,
            dec!(1000),
            dec!(1000000),
        )?;
        check_range(
            "min_credit_score",
            Decimal::from(self.min_credit_score),
            dec!(300),
            dec!(850),
        )?;
        check_range("interest_rate", self.interest_rate, Decimal::ONE, dec!(30))?;
        check_range(
            "max_risk_tolerance",
            Decimal::from(self.max_risk_tolerance),
            Decimal::ZERO,
            dec!(100),
        )?;
        if self.preferred_purposes.is_empty() {
            return Err(ValidationError::Empty {
                field: "preferred_purposes",
            });
        }
        if self.loan_terms.is_empty() {
            return Err(ValidationError::Empty { field: "loan_terms" });
        }
        for term in &self.loan_terms {
            check_min("loan_terms", Decimal::from(term.months()), Decimal::ONE)?;
        }
        Ok(())
    }
}
