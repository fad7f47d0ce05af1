use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::criteria::FieldError;
use crate::error::ValidationError;
use crate::models::{EventPayload, ExpensePayload, ServicePayload};
use crate::utils::{
    parse_optional_date, parse_required_date, validate_date_range, validate_positive_amount,
    validate_string_length,
};

/// Runs `check` and records a failure under `field` without stopping.
fn collect<T>(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    check: Result<T, ValidationError>,
) -> Option<T> {
    match check {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(FieldError::new(field, error));
            None
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseForm {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub payment_method: String,
    pub date: String,
}

impl ExpenseForm {
    pub fn validate(&self, church_id: &str) -> Result<ExpensePayload, Vec<FieldError>> {
        let mut errors = Vec::new();

        let description = collect(
            &mut errors,
            "description",
            validate_string_length(&self.description, "Description", MAX_DESCRIPTION_LENGTH),
        );
        let amount = collect(
            &mut errors,
            "amount",
            validate_positive_amount(&self.amount, "Amount"),
        );
        let category = collect(
            &mut errors,
            "category",
            validate_string_length(&self.category, "Category", MAX_TITLE_LENGTH),
        );
        let payment_method = collect(
            &mut errors,
            "paymentMethod",
            validate_string_length(&self.payment_method, "Payment method", MAX_TITLE_LENGTH),
        );
        let date = collect(&mut errors, "date", parse_required_date(&self.date, "Date"));

        match (description, amount, category, payment_method, date) {
            (Some(()), Some(amount), Some(()), Some(()), Some(date)) if errors.is_empty() => {
                Ok(ExpensePayload {
                    description: self.description.trim().to_string(),
                    amount,
                    category: self.category.trim().to_string(),
                    payment_method: self.payment_method.trim().to_string(),
                    date: date.to_string(),
                    church_id: church_id.to_string(),
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

impl EventForm {
    pub fn validate(&self, church_id: &str) -> Result<EventPayload, Vec<FieldError>> {
        let mut errors = Vec::new();

        collect(
            &mut errors,
            "title",
            validate_string_length(&self.title, "Title", MAX_TITLE_LENGTH),
        );
        if self.description.chars().count() > MAX_DESCRIPTION_LENGTH {
            errors.push(FieldError::new(
                "description",
                ValidationError::TooLong {
                    field: "Description",
                    max: MAX_DESCRIPTION_LENGTH,
                },
            ));
        }
        collect(
            &mut errors,
            "location",
            validate_string_length(&self.location, "Location", MAX_LOCATION_LENGTH),
        );
        let start = collect(
            &mut errors,
            "startDate",
            parse_required_date(&self.start_date, "Start date"),
        );
        let end = collect(
            &mut errors,
            "endDate",
            parse_optional_date(&self.end_date, "End date"),
        )
        .flatten();
        if let Err(e) = validate_date_range(start, end) {
            errors.push(FieldError::new("endDate", e));
        }
        collect(
            &mut errors,
            "status",
            validate_string_length(&self.status, "Status", MAX_TITLE_LENGTH),
        );

        match start {
            Some(start) if errors.is_empty() => Ok(EventPayload {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                location: self.location.trim().to_string(),
                start_date: start.to_string(),
                end_date: end.map(|d| d.to_string()),
                status: self.status.trim().to_string(),
                church_id: church_id.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceForm {
    pub title: String,
    pub date: String,
    pub frequency: String,
}

impl ServiceForm {
    pub fn validate(&self, church_id: &str) -> Result<ServicePayload, Vec<FieldError>> {
        let mut errors = Vec::new();

        collect(
            &mut errors,
            "title",
            validate_string_length(&self.title, "Title", MAX_TITLE_LENGTH),
        );
        let date = collect(&mut errors, "date", parse_required_date(&self.date, "Date"));
        collect(
            &mut errors,
            "frequency",
            validate_string_length(&self.frequency, "Frequency", MAX_TITLE_LENGTH),
        );

        match date {
            Some(date) if errors.is_empty() => Ok(ServicePayload {
                title: self.title.trim().to_string(),
                date: date.to_string(),
                frequency: self.frequency.trim().to_string(),
                church_id: church_id.to_string(),
            }),
            _ => Err(errors),
        }
    }
}
