use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Field, PresenceStatus};
use crate::records::Queryable;

/// Number of records per distinct value of `field`. Records without a value
/// are not counted.
pub fn count_by<T: Queryable>(records: &[T], field: Field) -> BTreeMap<String, usize> {
    records
        .iter()
        .filter_map(|record| record.field(field))
        .fold(BTreeMap::new(), |mut counts, value| {
            *counts.entry(value.to_string()).or_insert(0) += 1;
            counts
        })
}

pub fn count_matching<T: Queryable>(records: &[T], field: Field, value: &str) -> usize {
    records
        .iter()
        .filter(|record| record.field(field) == Some(value))
        .count()
}

pub fn total_amount<T: Queryable>(records: &[T]) -> f64 {
    records.iter().filter_map(Queryable::amount).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PresenceStats {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub excused: usize,
}

impl PresenceStats {
    /// Folds over the filtered set. Unknown statuses only count towards `total`.
    pub fn from_records<T: Queryable>(records: &[T]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            match record.field(Field::Status).and_then(PresenceStatus::from_value) {
                Some(PresenceStatus::Present) => stats.present += 1,
                Some(PresenceStatus::Absent) => stats.absent += 1,
                Some(PresenceStatus::Excused) => stats.excused += 1,
                None => {}
            }
            stats
        })
    }
}
