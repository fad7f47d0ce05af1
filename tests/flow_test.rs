/*!
 * Mutation Flow Tests
 *
 * Collecting → submitting → result transitions shared by the create, edit,
 * delete and import modals, and the list refresh after a successful change.
 */

mod common;

use anyhow::anyhow;
use church_admin_core::constants::*;
use church_admin_core::error::FlowError;
use church_admin_core::flow::{FlowState, MutationFlow};
use church_admin_core::import::ImportReport;
use church_admin_core::provider::RemoteCollection;
use common::*;

fn expense_flow() -> MutationFlow<String> {
    MutationFlow::new(ERR_CREATE_EXPENSE, |id: &String| format!("Dépense {id} enregistrée"))
}

#[test]
fn starts_collecting_without_message() {
    let flow = expense_flow();

    assert_eq!(flow.state(), &FlowState::Collecting);
    assert!(!flow.is_submitting());
    assert!(flow.result_message().is_none());
}

#[test]
fn second_begin_is_rejected_while_submitting() {
    let mut flow = expense_flow();

    flow.begin().unwrap();

    assert!(flow.is_submitting());
    assert_eq!(flow.begin(), Err(FlowError::AlreadySubmitting));
}

#[test]
fn failure_shows_generic_message_and_allows_retry() {
    init_tracing();
    let mut flow = expense_flow();

    flow.begin().unwrap();
    flow.complete(Err(anyhow!("connection reset")));

    assert_eq!(flow.state(), &FlowState::Failed(ERR_CREATE_EXPENSE.to_string()));
    assert_eq!(flow.result_message().as_deref(), Some(ERR_CREATE_EXPENSE));

    flow.begin().unwrap();
    flow.complete(Ok("e9".to_string()));

    assert_eq!(flow.result_message().as_deref(), Some("Dépense e9 enregistrée"));
}

#[test]
fn succeeded_flow_must_be_reset_before_reuse() {
    let mut flow = expense_flow();

    flow.begin().unwrap();
    flow.complete(Ok("e1".to_string()));

    assert_eq!(flow.begin(), Err(FlowError::AlreadyFinished));

    flow.reset();
    assert_eq!(flow.state(), &FlowState::Collecting);
    assert!(flow.begin().is_ok());
}

#[test]
fn reject_skips_submission() {
    let mut flow: MutationFlow<ImportReport> = MutationFlow::new(ERR_IMPORT_MEMBERS, ImportReport::summary);

    flow.reject(ERR_IMPORT_PARSE);

    assert_eq!(flow.result_message().as_deref(), Some(ERR_IMPORT_PARSE));
    assert!(flow.begin().is_ok());
}

#[tokio::test]
async fn submit_runs_the_request_once() {
    let mut flow: MutationFlow<ImportReport> = MutationFlow::new(ERR_IMPORT_MEMBERS, ImportReport::summary);

    let state = flow
        .submit(|| async {
            Ok(ImportReport {
                inserted_count: 3,
                ..ImportReport::default()
            })
        })
        .await
        .unwrap();

    assert!(matches!(state, FlowState::Succeeded(report) if report.inserted_count == 3));
    assert_eq!(flow.result_message().as_deref(), Some("3 membre(s) importé(s)"));
}

#[tokio::test]
async fn successful_submission_refreshes_the_list() {
    init_tracing();
    let collection = RemoteCollection::new(CountingSource::default());
    collection.load(Some("church-1")).await;
    let mut flow = expense_flow();

    flow.submit_and_refresh(&collection, || async { Ok("e2".to_string()) })
        .await
        .unwrap();

    assert_eq!(collection.source().calls(), 2);
    assert_eq!(collection.snapshot().await.records().map(<[_]>::len), Some(2));
}

#[tokio::test]
async fn failed_submission_leaves_the_list_alone() {
    let collection = RemoteCollection::new(CountingSource::default());
    collection.load(Some("church-1")).await;
    let mut flow: MutationFlow<()> = MutationFlow::new(ERR_DELETE_EXPENSE, |_| String::new());

    let state = flow
        .submit_and_refresh(&collection, || async { Err(anyhow!("500")) })
        .await
        .unwrap();

    assert_eq!(state, &FlowState::Failed(ERR_DELETE_EXPENSE.to_string()));
    assert_eq!(collection.source().calls(), 1);
}

#[tokio::test]
async fn submit_while_submitting_is_refused() {
    let mut flow = expense_flow();
    flow.begin().unwrap();

    let result = flow.submit(|| async { Ok("e1".to_string()) }).await;

    assert_eq!(result.err(), Some(FlowError::AlreadySubmitting));
}

#[tokio::test]
async fn each_modal_reports_its_own_failure() {
    let failures = [
        ERR_CREATE_EXPENSE,
        ERR_UPDATE_EXPENSE,
        ERR_DELETE_EXPENSE,
        ERR_CREATE_EVENT,
        ERR_CREATE_SERVICE,
        ERR_IMPORT_MEMBERS,
    ];

    for failure in failures {
        let mut flow: MutationFlow<()> = MutationFlow::new(failure, |_| String::new());

        flow.submit(|| async { Err(anyhow!("timeout")) }).await.unwrap();

        assert_eq!(flow.result_message().as_deref(), Some(failure));
    }
}
