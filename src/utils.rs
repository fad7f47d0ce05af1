use time::Date;

use crate::constants::*;
use crate::error::ValidationError;
use crate::records::parse_date;

pub fn validate_string_length(
    value: &str,
    field_name: &'static str,
    max_length: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field_name));
    }
    if value.chars().count() > max_length {
        return Err(ValidationError::TooLong {
            field: field_name,
            max: max_length,
        });
    }
    Ok(())
}

/// Parses a user-entered amount, accepting `,` as the decimal separator.
pub fn parse_amount(input: &str, field_name: &'static str) -> Result<f64, ValidationError> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return Err(ValidationError::Empty(field_name));
    }
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber(field_name)),
    }
}

/// An empty input means "no bound"; anything else must parse.
pub fn parse_optional_amount(
    input: &str,
    field_name: &'static str,
) -> Result<Option<f64>, ValidationError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_amount(input, field_name).map(Some)
}

pub fn validate_positive_amount(
    input: &str,
    field_name: &'static str,
) -> Result<f64, ValidationError> {
    let amount = parse_amount(input, field_name)?;
    if amount <= 0.0 {
        return Err(ValidationError::NotPositive(field_name));
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::TooLarge {
            field: field_name,
            max: MAX_AMOUNT,
        });
    }
    Ok(amount)
}

pub fn parse_required_date(input: &str, field_name: &'static str) -> Result<Date, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::Empty(field_name));
    }
    parse_date(input).ok_or(ValidationError::InvalidDate(field_name))
}

pub fn parse_optional_date(
    input: &str,
    field_name: &'static str,
) -> Result<Option<Date>, ValidationError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_required_date(input, field_name).map(Some)
}

pub fn validate_date_range(start: Option<Date>, end: Option<Date>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::EndBeforeStart),
        _ => Ok(()),
    }
}

pub fn validate_amount_range(min: Option<f64>, max: Option<f64>) -> Result<(), ValidationError> {
    match (min, max) {
        (Some(min), Some(max)) if max < min => Err(ValidationError::MaxBelowMin),
        _ => Ok(()),
    }
}
