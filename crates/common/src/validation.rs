//! Input-boundary validation for record payloads and FI parameters.
//!
//! Categorical fields are already closed enums checked by serde; these
//! checks cover what the type system cannot: trimmed non-empty text and
//! numeric ranges.

use crate::error::AppError;
use crate::types::{AssetInput, ExpenseInput, GoalInput, LiabilityInput, UserFiParameters};

/// Validated construction: consumes a payload and returns its normalized form.
pub trait Validate: Sized {
    fn validate(self) -> Result<Self, AppError>;
}

fn required_text(field: &str, value: String) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!(
            "{field} cannot be empty or just whitespace"
        )));
    }
    Ok(trimmed.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn positive(field: &str, value: f64) -> Result<f64, AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::Validation(format!("{field} must be positive")));
    }
    Ok(value)
}

fn non_negative(field: &str, value: f64) -> Result<f64, AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation(format!("{field} cannot be negative")));
    }
    Ok(value)
}

fn finite(field: &str, value: f64) -> Result<f64, AppError> {
    if !value.is_finite() {
        return Err(AppError::Validation(format!("{field} must be a finite number")));
    }
    Ok(value)
}

impl Validate for AssetInput {
    fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            name: required_text("name", self.name)?,
            value_inr: positive("valueINR", self.value_inr)?,
            ..self
        })
    }
}

impl Validate for LiabilityInput {
    fn validate(self) -> Result<Self, AppError> {
        let interest_rate = self
            .interest_rate
            .map(|rate| non_negative("interestRate", rate))
            .transpose()?;
        Ok(Self {
            name: required_text("name", self.name)?,
            liability_type: required_text("type", self.liability_type)?,
            outstanding_amount_inr: positive("outstandingAmountINR", self.outstanding_amount_inr)?,
            interest_rate,
            ..self
        })
    }
}

impl Validate for ExpenseInput {
    fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            category: required_text("category", self.category)?,
            details: optional_text(self.details),
            amount: positive("amount", self.amount)?,
            ..self
        })
    }
}

impl Validate for GoalInput {
    fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            name: required_text("name", self.name)?,
            target_amount: positive("targetAmount", self.target_amount)?,
            current_amount: non_negative("currentAmount", self.current_amount)?,
            notes: optional_text(self.notes),
            ..self
        })
    }
}

/// Only well-typedness is enforced: SWR and exclusions are deliberately not
/// range-checked, the calculator defines an outcome for every finite value.
impl Validate for UserFiParameters {
    fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            desired_annual_fi_expenses: finite(
                "desired_annual_fi_expenses",
                self.desired_annual_fi_expenses,
            )?,
            swr_percentage: finite("swr_percentage", self.swr_percentage)?,
            emergency_fund_to_exclude: finite(
                "emergency_fund_to_exclude",
                self.emergency_fund_to_exclude,
            )?,
            primary_residence_equity_to_exclude: finite(
                "primary_residence_equity_to_exclude",
                self.primary_residence_equity_to_exclude,
            )?,
            ..self
        })
    }
}
