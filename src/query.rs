use std::cmp::Ordering;

use crate::criteria::Criteria;
use crate::records::Queryable;

/// Returns the records matching every active predicate of `criteria`.
///
/// An absent collection is treated as empty. The input is left untouched and
/// the result keeps the input order.
pub fn filter_records<T>(records: Option<&[T]>, criteria: &Criteria) -> Vec<T>
where
    T: Queryable + Clone,
{
    let Some(records) = records else {
        return Vec::new();
    };
    if criteria.is_empty() {
        return records.to_vec();
    }

    let needle = criteria.search().to_lowercase();
    records
        .iter()
        .filter(|record| matches(*record, criteria, &needle))
        .cloned()
        .collect()
}

/// Single-record predicate. `needle` is the already case-folded search term.
pub fn matches<T: Queryable>(record: &T, criteria: &Criteria, needle: &str) -> bool {
    if !needle.is_empty()
        && !record
            .searchable_text()
            .iter()
            .any(|text| text.to_lowercase().contains(needle))
    {
        return false;
    }

    let dates = criteria.dates();
    if dates.is_active() && !dates.matches(record.calendar_day()) {
        return false;
    }

    let amount = criteria.amount();
    if amount.is_active() && !amount.matches(record.amount()) {
        return false;
    }

    criteria.selections().all(|(field, values)| {
        record
            .field(field)
            .is_some_and(|value| values.iter().any(|selected| same_value(selected, value)))
    })
}

/// Categorical values compare trimmed and ASCII case-insensitively, the way
/// wire status values are classified.
fn same_value(selected: &str, value: &str) -> bool {
    selected.trim().eq_ignore_ascii_case(value.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Timestamp,
    Amount,
    DisplayName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Fetch order.
    #[default]
    Preserve,
    /// Timestamp descending, then display name ascending (case-insensitive).
    RecentFirst,
    Column { key: SortKey, direction: Direction },
}

/// Returns a sorted copy. Records missing the sort key go last regardless of
/// direction; equal keys keep their input order.
pub fn sort_records<T>(records: &[T], order: SortOrder) -> Vec<T>
where
    T: Queryable + Clone,
{
    let mut sorted = records.to_vec();
    match order {
        SortOrder::Preserve => {}
        SortOrder::RecentFirst => sorted.sort_by(|a, b| {
            missing_last(a.timestamp(), b.timestamp(), |x, y| y.cmp(&x))
                .then_with(|| compare_names(a, b))
        }),
        SortOrder::Column { key, direction } => sorted.sort_by(|a, b| match key {
            SortKey::Timestamp => missing_last(a.timestamp(), b.timestamp(), |x, y| {
                directed(x.cmp(&y), direction)
            }),
            SortKey::Amount => missing_last(a.amount(), b.amount(), |x, y| {
                directed(x.total_cmp(&y), direction)
            }),
            SortKey::DisplayName => missing_last(
                a.display_name().map(|n| n.to_lowercase()),
                b.display_name().map(|n| n.to_lowercase()),
                |x, y| directed(x.cmp(&y), direction),
            ),
        }),
    }
    sorted
}

fn directed(ordering: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Ascending => ordering,
        Direction::Descending => ordering.reverse(),
    }
}

fn missing_last<K>(a: Option<K>, b: Option<K>, cmp: impl FnOnce(K, K) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_names<T: Queryable>(a: &T, b: &T) -> Ordering {
    missing_last(
        a.display_name().map(|n| n.to_lowercase()),
        b.display_name().map(|n| n.to_lowercase()),
        |x, y| x.cmp(&y),
    )
}
