//! The user's current query as an immutable value.
//!
//! Every UI event produces a new `Criteria` through the `with_*` methods; the
//! query functions only ever borrow it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::constants::MAX_SEARCH_TERM_LENGTH;
use crate::error::ValidationError;
use crate::models::Field;
use crate::utils::{
    parse_optional_amount, parse_optional_date, validate_amount_range, validate_date_range,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    Any,
    /// Inclusive on both ends; either bound may be open.
    Range {
        start: Option<Date>,
        end: Option<Date>,
    },
    ExactDay(Date),
}

impl DateFilter {
    pub fn is_active(&self) -> bool {
        match self {
            DateFilter::Any => false,
            DateFilter::Range { start, end } => start.is_some() || end.is_some(),
            DateFilter::ExactDay(_) => true,
        }
    }

    pub fn matches(&self, day: Option<Date>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(day) = day else {
            return false;
        };
        match *self {
            DateFilter::Any => true,
            DateFilter::Range { start, end } => {
                start.is_none_or(|start| day >= start) && end.is_none_or(|end| day <= end)
            }
            DateFilter::ExactDay(exact) => day == exact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AmountRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AmountRange {
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn matches(&self, amount: Option<f64>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(amount) = amount else {
            return false;
        };
        self.min.is_none_or(|min| amount >= min) && self.max.is_none_or(|max| amount <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Criteria {
    search: String,
    dates: DateFilter,
    amount: AmountRange,
    selections: BTreeMap<Field, BTreeSet<String>>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into().trim().to_string();
        self
    }

    pub fn with_dates(mut self, dates: DateFilter) -> Self {
        self.dates = if dates.is_active() {
            dates
        } else {
            DateFilter::Any
        };
        self
    }

    pub fn with_date_range(self, start: Option<Date>, end: Option<Date>) -> Self {
        self.with_dates(DateFilter::Range { start, end })
    }

    pub fn with_exact_day(self, day: Date) -> Self {
        self.with_dates(DateFilter::ExactDay(day))
    }

    pub fn with_amount(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.amount = AmountRange { min, max };
        self
    }

    /// Replaces the selected values for `field`; an empty selection clears it.
    pub fn with_selection<I, S>(mut self, field: Field, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.selections.remove(&field);
        } else {
            self.selections.insert(field, values);
        }
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn dates(&self) -> DateFilter {
        self.dates
    }

    pub fn amount(&self) -> AmountRange {
        self.amount
    }

    pub fn selection(&self, field: Field) -> Option<&BTreeSet<String>> {
        self.selections.get(&field)
    }

    pub fn selections(&self) -> impl Iterator<Item = (Field, &BTreeSet<String>)> {
        self.selections.iter().map(|(field, values)| (*field, values))
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && !self.dates.is_active()
            && !self.amount.is_active()
            && self.selections.is_empty()
    }
}

/// How a view's date inputs are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMode {
    Range,
    ExactDay,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub error: ValidationError,
}

impl FieldError {
    pub fn new(field: &'static str, error: ValidationError) -> Self {
        Self { field, error }
    }
}

/// Raw filter-modal input, validated into a `Criteria`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CriteriaForm {
    pub search: String,
    pub start_date: String,
    pub end_date: String,
    pub min_amount: String,
    pub max_amount: String,
    pub categories: Vec<String>,
    pub payment_methods: Vec<String>,
    pub statuses: Vec<String>,
    pub frequencies: Vec<String>,
}

impl CriteriaForm {
    /// Checks every field and reports all failures together. In `ExactDay`
    /// mode `start_date` holds the day and `end_date` is ignored.
    pub fn validate(&self, mode: DateMode) -> Result<Criteria, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.search.chars().count() > MAX_SEARCH_TERM_LENGTH {
            errors.push(FieldError::new(
                "search",
                ValidationError::TooLong {
                    field: "Search term",
                    max: MAX_SEARCH_TERM_LENGTH,
                },
            ));
        }

        let start = parse_optional_date(&self.start_date, "Start date")
            .map_err(|e| errors.push(FieldError::new("startDate", e)))
            .ok()
            .flatten();
        let end = match mode {
            DateMode::Range => parse_optional_date(&self.end_date, "End date")
                .map_err(|e| errors.push(FieldError::new("endDate", e)))
                .ok()
                .flatten(),
            DateMode::ExactDay => None,
        };
        if let Err(e) = validate_date_range(start, end) {
            errors.push(FieldError::new("endDate", e));
        }

        let min = parse_optional_amount(&self.min_amount, "Minimum amount")
            .map_err(|e| errors.push(FieldError::new("minAmount", e)))
            .ok()
            .flatten();
        let max = parse_optional_amount(&self.max_amount, "Maximum amount")
            .map_err(|e| errors.push(FieldError::new("maxAmount", e)))
            .ok()
            .flatten();
        if let Err(e) = validate_amount_range(min, max) {
            errors.push(FieldError::new("maxAmount", e));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let dates = match (mode, start) {
            (DateMode::ExactDay, Some(day)) => DateFilter::ExactDay(day),
            (DateMode::ExactDay, None) => DateFilter::Any,
            (DateMode::Range, _) => DateFilter::Range { start, end },
        };

        Ok(Criteria::new()
            .with_search(self.search.as_str())
            .with_dates(dates)
            .with_amount(min, max)
            .with_selection(Field::Category, self.categories.iter().cloned())
            .with_selection(Field::PaymentMethod, self.payment_methods.iter().cloned())
            .with_selection(Field::Status, self.statuses.iter().cloned())
            .with_selection(Field::Frequency, self.frequencies.iter().cloned()))
    }
}
