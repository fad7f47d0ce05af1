/*!
 * Query Engine Tests
 *
 * Filtering, sorting and derived statistics over in-memory collections.
 *
 * Test Categories:
 * - Empty criteria and absent collections
 * - Free-text search (case folding, substring containment)
 * - Date range, exact day and amount range predicates
 * - Categorical selections (OR within a field, AND across fields)
 * - Fail-closed handling of missing fields
 * - Sorting (recent-first with name tie-break, column sorts)
 * - Derived statistics over the filtered set
 */

mod common;

use church_admin_core::criteria::Criteria;
use church_admin_core::models::{Expense, Field, PresenceStatus, Record};
use church_admin_core::query::{Direction, SortKey, SortOrder, filter_records, sort_records};
use church_admin_core::records::Queryable;
use church_admin_core::stats::{PresenceStats, count_by, count_matching, total_amount};
use common::*;
use time::macros::date;

#[test]
fn empty_criteria_returns_everything() {
    let all = sample_expenses();

    let filtered = filter_records(Some(all.as_slice()), &Criteria::new());

    assert_eq!(filtered, all);
}

#[test]
fn absent_collection_is_treated_as_empty() {
    let filtered = filter_records::<Expense>(None, &Criteria::new().with_search("bible"));

    assert!(filtered.is_empty());
}

#[test]
fn search_is_case_insensitive_substring() {
    let all = sample_expenses();

    for term in ["bible", "BIBLE", "ible", "  Bible  "] {
        let filtered = filter_records(Some(all.as_slice()), &Criteria::new().with_search(term));
        assert_eq!(ids(&filtered), vec!["e1", "e5"], "term {:?}", term);
    }

    let none = filter_records(Some(all.as_slice()), &Criteria::new().with_search("xyz"));
    assert!(none.is_empty());
}

#[test]
fn search_handles_accented_text() {
    let all = sample_expenses();

    let filtered = filter_records(Some(all.as_slice()), &Criteria::new().with_search("ÉLECTRICITÉ"));

    assert_eq!(ids(&filtered), vec!["e4"]);
}

#[test]
fn date_range_is_inclusive_by_calendar_day() {
    let mut all = sample_expenses();
    all.push(expense("e6", "Veille", 5.0, "Divers", "Espèces", "2024-03-04T23:59:59Z"));

    let criteria = Criteria::new()
        .with_date_range(Some(date!(2024 - 03 - 05)), Some(date!(2024 - 03 - 15)));
    let filtered = filter_records(Some(all.as_slice()), &criteria);

    // e2 is on the start day, e4 late on the end day, e6 one day before start
    assert_eq!(ids(&filtered), vec!["e2", "e3", "e4"]);
}

#[test]
fn open_ended_date_ranges() {
    let all = sample_expenses();

    let from = filter_records(
        Some(all.as_slice()),
        &Criteria::new().with_date_range(Some(date!(2024 - 03 - 15)), None),
    );
    assert_eq!(ids(&from), vec!["e4", "e5"]);

    let until = filter_records(
        Some(all.as_slice()),
        &Criteria::new().with_date_range(None, Some(date!(2024 - 03 - 05))),
    );
    assert_eq!(ids(&until), vec!["e1", "e2"]);
}

#[test]
fn exact_day_uses_wall_clock_date_of_timestamp() {
    let presences = vec![
        presence("p1", "Jean", "Dupont", "PRESENT", "2024-03-10T23:30:00-05:00"),
        presence("p2", "Marie", "Kaba", "PRESENT", "2024-03-11T04:30:00Z"),
        presence("p3", "Paul", "Mensah", "ABSENT", "2024-03-10T08:00:00.000Z"),
    ];

    let filtered = filter_records(
        Some(presences.as_slice()),
        &Criteria::new().with_exact_day(date!(2024 - 03 - 10)),
    );

    assert_eq!(ids(&filtered), vec!["p1", "p3"]);
}

#[test]
fn amount_range_bounds_are_inclusive() {
    let all = sample_expenses();

    let filtered = filter_records(Some(all.as_slice()), &Criteria::new().with_amount(Some(45.0), Some(120.0)));
    assert_eq!(ids(&filtered), vec!["e1", "e2", "e5"]);

    let min_only = filter_records(Some(all.as_slice()), &Criteria::new().with_amount(Some(100.0), None));
    assert_eq!(ids(&min_only), vec!["e2", "e4"]);
}

#[test]
fn selections_are_or_within_field_and_across_fields() {
    let all = sample_expenses();

    let categories = Criteria::new().with_selection(Field::Category, ["Matériel", "Charges"]);
    let filtered = filter_records(Some(all.as_slice()), &categories);
    assert_eq!(ids(&filtered), vec!["e1", "e4", "e5"]);

    let narrowed = categories.with_selection(Field::PaymentMethod, ["Espèces"]);
    let filtered = filter_records(Some(all.as_slice()), &narrowed);
    assert_eq!(ids(&filtered), vec!["e1"]);
}

#[test]
fn empty_selection_imposes_no_constraint() {
    let all = sample_expenses();

    let criteria = Criteria::new()
        .with_selection(Field::Category, ["Matériel"])
        .with_selection(Field::Category, Vec::<String>::new());

    assert!(criteria.is_empty());
    assert_eq!(filter_records(Some(all.as_slice()), &criteria).len(), all.len());
}

#[test]
fn missing_fields_fail_closed_only_for_active_predicates() {
    let mut bare = expense("e9", "Sans montant", 0.0, "Divers", "Espèces", "2024-03-02");
    bare.amount = None;
    bare.date = Some("pas une date".to_string());
    bare.category = None;
    let all = vec![bare];

    assert_eq!(filter_records(Some(all.as_slice()), &Criteria::new().with_search("montant")).len(), 1);
    assert!(filter_records(Some(all.as_slice()), &Criteria::new().with_amount(Some(0.0), None)).is_empty());
    assert!(
        filter_records(
            Some(all.as_slice()),
            &Criteria::new().with_date_range(Some(date!(2000 - 01 - 01)), None)
        )
        .is_empty()
    );
    assert!(
        filter_records(Some(all.as_slice()), &Criteria::new().with_selection(Field::Category, ["Divers"]))
            .is_empty()
    );
}

#[test]
fn adding_a_constraint_never_widens_the_result() {
    let all = sample_expenses();
    let loose = Criteria::new().with_search("bible");
    let strict = loose.clone().with_selection(Field::PaymentMethod, ["Espèces"]);

    let loose_ids = ids(&filter_records(Some(all.as_slice()), &loose));
    let strict_ids = ids(&filter_records(Some(all.as_slice()), &strict));
    let all_ids = ids(&all);

    assert!(loose_ids.iter().all(|id| all_ids.contains(id)));
    assert!(strict_ids.iter().all(|id| loose_ids.contains(id)));
    assert!(strict_ids.len() < loose_ids.len());
}

#[test]
fn filtering_works_over_tagged_records() {
    let records: Vec<Record> = vec![
        expense("e1", "Achat de Bible", 45.0, "Matériel", "Espèces", "2024-03-01").into(),
        event("v1", "Étude biblique", "Salle B", "PLANIFIE", "2024-03-02T18:00:00Z").into(),
        presence("p1", "Jean", "Dupont", "PRESENT", "2024-03-03T09:00:00Z").into(),
    ];

    let filtered = filter_records(Some(records.as_slice()), &Criteria::new().with_search("bibl"));
    assert_eq!(ids(&filtered), vec!["e1", "v1"]);

    let by_name = filter_records(Some(records.as_slice()), &Criteria::new().with_search("jean dupont"));
    assert_eq!(ids(&by_name), vec!["p1"]);
}

#[test]
fn recent_first_breaks_ties_by_name() {
    let presences = vec![
        presence("p1", "zoé", "Martin", "PRESENT", "2024-03-10T09:00:00Z"),
        presence("p2", "Anne", "Durand", "PRESENT", "2024-03-10T09:00:00Z"),
        presence("p3", "Luc", "Petit", "ABSENT", "2024-03-12T09:00:00Z"),
        presence("p4", "bob", "Petit", "PRESENT", "2024-03-10T09:00:00Z"),
    ];

    let sorted = sort_records(&presences, SortOrder::RecentFirst);

    assert_eq!(ids(&sorted), vec!["p3", "p2", "p4", "p1"]);
    // input untouched
    assert_eq!(ids(&presences), vec!["p1", "p2", "p3", "p4"]);
}

#[test]
fn recent_first_compares_instants_across_offsets() {
    let presences = vec![
        presence("p1", "Jean", "Dupont", "PRESENT", "2024-03-10T10:00:00+02:00"),
        presence("p2", "Marie", "Kaba", "PRESENT", "2024-03-10T09:00:00Z"),
    ];

    let sorted = sort_records(&presences, SortOrder::RecentFirst);

    // 10:00+02:00 is 08:00Z
    assert_eq!(ids(&sorted), vec!["p2", "p1"]);
}

#[test]
fn undated_records_sort_last() {
    let mut undated = presence("p0", "Abel", "Akon", "PRESENT", "");
    undated.created_at = None;
    let presences = vec![
        undated,
        presence("p1", "Jean", "Dupont", "PRESENT", "2024-01-01"),
    ];

    let sorted = sort_records(&presences, SortOrder::RecentFirst);

    assert_eq!(ids(&sorted), vec!["p1", "p0"]);
}

#[test]
fn preserve_keeps_fetch_order() {
    let all = sample_expenses();

    let sorted = sort_records(&all, SortOrder::Preserve);

    assert_eq!(sorted, all);
}

#[test]
fn column_sort_by_amount() {
    let all = sample_expenses();

    let descending = sort_records(
        &all,
        SortOrder::Column {
            key: SortKey::Amount,
            direction: Direction::Descending,
        },
    );
    assert_eq!(ids(&descending), vec!["e4", "e2", "e5", "e1", "e3"]);

    let ascending = sort_records(
        &all,
        SortOrder::Column {
            key: SortKey::Amount,
            direction: Direction::Ascending,
        },
    );
    assert_eq!(ids(&ascending), vec!["e3", "e1", "e5", "e2", "e4"]);
}

#[test]
fn presence_stats_follow_the_filtered_set() {
    let presences = vec![
        presence("p1", "Jean", "Dupont", "PRESENT", "2024-03-10T09:00:00Z"),
        presence("p2", "Marie", "Kaba", "ABSENT", "2024-03-10T09:05:00Z"),
        presence("p3", "Paul", "Mensah", "MOTIVE", "2024-03-10T09:10:00Z"),
        presence("p4", "Anne", "Durand", "PRESENT", "2024-03-17T09:00:00Z"),
    ];

    let all_stats = PresenceStats::from_records(&presences);
    assert_eq!(
        all_stats,
        PresenceStats {
            total: 4,
            present: 2,
            absent: 1,
            excused: 1
        }
    );

    let criteria = Criteria::new().with_exact_day(date!(2024 - 03 - 10));
    let filtered = filter_records(Some(presences.as_slice()), &criteria);
    let stats = PresenceStats::from_records(&filtered);
    assert_eq!(stats.total, filtered.len());
    assert_eq!(stats.present, 1);
    assert!(stats.present <= stats.total);

    let present_only = criteria.with_selection(Field::Status, [PresenceStatus::Present.as_str()]);
    let filtered = filter_records(Some(presences.as_slice()), &present_only);
    let stats = PresenceStats::from_records(&filtered);
    assert_eq!(stats.total, 1);
    assert_eq!(stats.present, 1);
}

#[test]
fn status_selection_agrees_with_presence_stats() {
    let presences = vec![
        presence("p1", "Jean", "Dupont", "present", "2024-03-10T09:00:00Z"),
        presence("p2", "Marie", "Ngoy", " PRESENT ", "2024-03-10T09:05:00Z"),
        presence("p3", "Paul", "Kasa", "Absent", "2024-03-10T09:10:00Z"),
    ];

    let present_only =
        Criteria::new().with_selection(Field::Status, [PresenceStatus::Present.as_str()]);
    let filtered = filter_records(Some(presences.as_slice()), &present_only);
    let stats = PresenceStats::from_records(&filtered);

    assert_eq!(ids(&filtered), vec!["p1", "p2"]);
    assert_eq!(stats.present, filtered.len());
    assert_eq!(PresenceStats::from_records(&presences).present, 2);
}

#[test]
fn count_helpers_over_expenses() {
    let all = sample_expenses();

    let by_category = count_by(&all, Field::Category);
    assert_eq!(by_category.get("Matériel"), Some(&2));
    assert_eq!(by_category.get("Charges"), Some(&1));
    assert_eq!(count_matching(&all, Field::PaymentMethod, "Espèces"), 2);
    assert!((total_amount(&all) - 485.5).abs() < f64::EPSILON);
}

#[test]
fn presence_status_filter_offers_all_statuses() {
    let options = PresenceStatus::filter_options();

    assert_eq!(
        options.iter().map(|(value, _)| *value).collect::<Vec<_>>(),
        vec!["PRESENT", "ABSENT", "MOTIVE"]
    );
    assert_eq!(PresenceStatus::from_value("present"), Some(PresenceStatus::Present));
    assert_eq!(PresenceStatus::from_value("inconnu"), None);
}

#[test]
fn records_deserialize_from_api_shapes() {
    let json = r#"[
        {"_id": "p1", "statut": "PRESENT", "createdAt": "2024-03-10T09:00:00.000Z",
         "user": {"firstname": "Jean", "lastname": "Dupont", "email": "jean@example.org"}},
        {"_id": "p2", "status": "ABSENT"}
    ]"#;

    let presences: Vec<church_admin_core::models::Presence> =
        serde_json::from_str(json).expect("Failed to parse presences");

    assert_eq!(presences[0].status.as_deref(), Some("PRESENT"));
    assert_eq!(presences[0].display_name().as_deref(), Some("Jean Dupont"));
    assert_eq!(presences[0].calendar_day(), Some(date!(2024 - 03 - 10)));
    assert_eq!(presences[1].timestamp(), None);
}
