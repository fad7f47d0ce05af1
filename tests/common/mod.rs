#![allow(dead_code)]

use church_admin_core::models::{Event, Expense, Presence, PresenceUser};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn expense(
    id: &str,
    description: &str,
    amount: f64,
    category: &str,
    payment_method: &str,
    date: &str,
) -> Expense {
    Expense {
        id: id.to_string(),
        description: Some(description.to_string()),
        amount: Some(amount),
        category: Some(category.to_string()),
        payment_method: Some(payment_method.to_string()),
        date: Some(date.to_string()),
        church_id: Some("church-1".to_string()),
    }
}

pub fn event(id: &str, title: &str, location: &str, status: &str, start_date: &str) -> Event {
    Event {
        id: id.to_string(),
        title: Some(title.to_string()),
        description: None,
        location: Some(location.to_string()),
        start_date: Some(start_date.to_string()),
        end_date: None,
        status: Some(status.to_string()),
        category: None,
        church_id: Some("church-1".to_string()),
    }
}

pub fn presence(
    id: &str,
    firstname: &str,
    lastname: &str,
    status: &str,
    created_at: &str,
) -> Presence {
    Presence {
        id: id.to_string(),
        status: Some(status.to_string()),
        created_at: Some(created_at.to_string()),
        service_id: Some("service-1".to_string()),
        user: Some(PresenceUser {
            id: None,
            firstname: Some(firstname.to_string()),
            lastname: Some(lastname.to_string()),
            email: Some(format!(
                "{}.{}@example.org",
                firstname.to_lowercase(),
                lastname.to_lowercase()
            )),
        }),
    }
}

/// Expenses used across the query tests.
pub fn sample_expenses() -> Vec<Expense> {
    vec![
        expense("e1", "Achat de Bible", 45.0, "Matériel", "Espèces", "2024-03-01"),
        expense("e2", "Location sono", 120.0, "Logistique", "Virement", "2024-03-05"),
        expense("e3", "Fleurs pour l'autel", 30.5, "Décoration", "Espèces", "2024-03-10"),
        expense("e4", "Facture électricité", 210.0, "Charges", "Chèque", "2024-03-15T18:30:00Z"),
        expense("e5", "Bibles jeunesse", 80.0, "Matériel", "Mobile Money", "2024-03-20"),
    ]
}

pub fn ids<T: church_admin_core::records::Queryable>(records: &[T]) -> Vec<String> {
    records.iter().map(|r| r.record_id().to_string()).collect()
}

use church_admin_core::error::ApiError;
use church_admin_core::provider::CollectionSource;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Returns `sample_expenses()` truncated to the number of calls made so far,
/// so every refetch is observable.
#[derive(Default)]
pub struct CountingSource {
    pub calls: AtomicUsize,
}

impl CountingSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CollectionSource<Expense> for CountingSource {
    async fn fetch(&self, _scope_id: &str) -> Result<Vec<Expense>, ApiError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(sample_expenses().into_iter().take(call).collect())
    }
}
