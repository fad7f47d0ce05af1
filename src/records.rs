use std::borrow::Cow;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::models::{Event, Expense, Field, Presence, Record};

/// The minimal surface the query engine needs from a record.
///
/// Accessors return `None` when the underlying data is missing or malformed;
/// predicates treat that as "does not match".
pub trait Queryable {
    fn record_id(&self) -> &str;

    /// Values searched by the free-text term.
    fn searchable_text(&self) -> Vec<Cow<'_, str>>;

    /// Primary timestamp (`date`, `startDate` or `createdAt`).
    fn timestamp(&self) -> Option<OffsetDateTime>;

    fn amount(&self) -> Option<f64> {
        None
    }

    fn field(&self, field: Field) -> Option<&str>;

    /// Composite name used as the sort tie-break.
    fn display_name(&self) -> Option<String> {
        None
    }

    /// Wall-clock day of the primary timestamp, in the timestamp's own offset.
    fn calendar_day(&self) -> Option<Date> {
        self.timestamp().map(|ts| ts.date())
    }
}

/// Parses RFC 3339 timestamps, offset-less date-times (assumed UTC) and
/// plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }

    let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let naive_fractional =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
    if let Ok(dt) = PrimitiveDateTime::parse(raw, naive)
        .or_else(|_| PrimitiveDateTime::parse(raw, naive_fractional))
    {
        return Some(dt.assume_utc());
    }

    parse_date(raw).map(|date| date.midnight().assume_utc())
}

pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

fn push_text<'a>(out: &mut Vec<Cow<'a, str>>, value: &'a Option<String>) {
    if let Some(text) = value.as_deref() {
        out.push(Cow::Borrowed(text));
    }
}

impl Queryable for Expense {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn searchable_text(&self) -> Vec<Cow<'_, str>> {
        let mut out = Vec::with_capacity(1);
        push_text(&mut out, &self.description);
        out
    }

    fn timestamp(&self) -> Option<OffsetDateTime> {
        self.date.as_deref().and_then(parse_timestamp)
    }

    fn amount(&self) -> Option<f64> {
        self.amount.filter(|a| a.is_finite())
    }

    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Category => self.category.as_deref(),
            Field::PaymentMethod => self.payment_method.as_deref(),
            _ => None,
        }
    }

    fn display_name(&self) -> Option<String> {
        self.description.clone()
    }
}

impl Queryable for Event {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn searchable_text(&self) -> Vec<Cow<'_, str>> {
        let mut out = Vec::with_capacity(3);
        push_text(&mut out, &self.title);
        push_text(&mut out, &self.description);
        push_text(&mut out, &self.location);
        out
    }

    fn timestamp(&self) -> Option<OffsetDateTime> {
        self.start_date.as_deref().and_then(parse_timestamp)
    }

    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Status => self.status.as_deref(),
            Field::Category => self.category.as_deref(),
            _ => None,
        }
    }

    fn display_name(&self) -> Option<String> {
        self.title.clone()
    }
}

impl Queryable for Presence {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn searchable_text(&self) -> Vec<Cow<'_, str>> {
        let mut out = Vec::with_capacity(4);
        if let Some(user) = &self.user {
            push_text(&mut out, &user.firstname);
            push_text(&mut out, &user.lastname);
            push_text(&mut out, &user.email);
        }
        if let Some(name) = self.display_name() {
            out.push(Cow::Owned(name));
        }
        out
    }

    fn timestamp(&self) -> Option<OffsetDateTime> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Status => self.status.as_deref(),
            _ => None,
        }
    }

    fn display_name(&self) -> Option<String> {
        let user = self.user.as_ref()?;
        let parts: Vec<&str> = [user.firstname.as_deref(), user.lastname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

impl Queryable for Record {
    fn record_id(&self) -> &str {
        match self {
            Record::Expense(r) => r.record_id(),
            Record::Event(r) => r.record_id(),
            Record::Presence(r) => r.record_id(),
        }
    }

    fn searchable_text(&self) -> Vec<Cow<'_, str>> {
        match self {
            Record::Expense(r) => r.searchable_text(),
            Record::Event(r) => r.searchable_text(),
            Record::Presence(r) => r.searchable_text(),
        }
    }

    fn timestamp(&self) -> Option<OffsetDateTime> {
        match self {
            Record::Expense(r) => r.timestamp(),
            Record::Event(r) => r.timestamp(),
            Record::Presence(r) => r.timestamp(),
        }
    }

    fn amount(&self) -> Option<f64> {
        match self {
            Record::Expense(r) => r.amount(),
            Record::Event(r) => r.amount(),
            Record::Presence(r) => r.amount(),
        }
    }

    fn field(&self, field: Field) -> Option<&str> {
        match self {
            Record::Expense(r) => r.field(field),
            Record::Event(r) => r.field(field),
            Record::Presence(r) => r.field(field),
        }
    }

    fn display_name(&self) -> Option<String> {
        match self {
            Record::Expense(r) => r.display_name(),
            Record::Event(r) => r.display_name(),
            Record::Presence(r) => r.display_name(),
        }
    }
}
