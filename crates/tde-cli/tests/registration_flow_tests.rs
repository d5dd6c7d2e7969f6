//! Registration end to end: submit, re-fetch, and the single-flight rule

mod common;

use common::{dataset, dataset_json, FakeBackend};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tde_cli::api::ApiClient;
use tde_cli::error::CliError;
use tde_cli::view::{
    DatasetListViewModel, DatasetRegistrationController, LoadOutcome, RegistrationForm, Severity,
};
use tokio::sync::Mutex;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn filled() -> RegistrationForm {
    RegistrationForm {
        title: "Lung RNA".to_string(),
        abstract_text: "Bulk RNA-seq of resected tumours".to_string(),
        site: "WEHI Parkville".to_string(),
        ..RegistrationForm::default()
    }
}

#[tokio::test]
async fn test_new_dataset_gets_next_rank_after_refetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/datasets/"))
        .and(query_param("project_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            dataset_json(3, 2, "Lung WGS"),
            dataset_json(8, 2, "Lung WES")
        ])))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/datasets/"))
        .and(query_param("project_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            dataset_json(3, 2, "Lung WGS"),
            dataset_json(8, 2, "Lung WES"),
            dataset_json(12, 2, "Lung RNA")
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/datasets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dataset_json(12, 2, "Lung RNA")))
        .expect(1)
        .mount(&server)
        .await;

    let backend = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
    let listing = Mutex::new(DatasetListViewModel::new(Some(2), 10));

    let outcome = DatasetListViewModel::refresh_shared(&listing, &backend).await.unwrap();
    assert_eq!(outcome, LoadOutcome::Applied { count: 2 });
    let before = listing.lock().await.max_rank(2);
    assert_eq!(before, 2);

    let controller = DatasetRegistrationController::new(Some(2));
    controller.edit(|form| *form = filled());

    let registered = controller.submit(&backend, &listing).await.unwrap();
    assert!(registered.refreshed);
    assert_eq!(registered.notification.severity, Severity::Success);
    assert_eq!(registered.notification.message, "Dataset 'Lung RNA' created successfully!");

    let listing = listing.lock().await;
    assert_eq!(listing.display_id_of(12), Some(format!("P2-{}", before + 1).as_str()));
    assert_eq!(listing.total_count(), 3);
    assert_eq!(controller.form(), RegistrationForm::default());
}

#[tokio::test]
async fn test_backend_rejection_keeps_form_and_listing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/datasets/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Project 9 does not exist" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/datasets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let backend = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
    let listing = Mutex::new(DatasetListViewModel::new(Some(9), 10));
    let controller = DatasetRegistrationController::new(Some(9));
    controller.edit(|form| *form = filled());

    let err = controller.submit(&backend, &listing).await.unwrap_err();
    let notification = DatasetRegistrationController::failure_notification(&err);

    assert!(notification.is_error());
    assert!(notification.message.contains("Project 9 does not exist"));
    assert_eq!(controller.form(), filled());
    assert!(listing.lock().await.is_empty());
    assert!(!controller.is_submitting());
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let backend = FakeBackend::default();
    let listing = Mutex::new(DatasetListViewModel::new(None, 10));
    let controller = DatasetRegistrationController::new(None);
    controller.edit(|form| {
        *form = filled();
        form.abstract_text = "  ".to_string();
    });

    let err = controller.submit(&backend, &listing).await.unwrap_err();
    assert_eq!(
        DatasetRegistrationController::failure_notification(&err).message,
        "Abstract is required"
    );
    assert_eq!(backend.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_second_submission_while_in_flight_is_rejected() {
    let backend = FakeBackend::with_datasets(vec![dataset(1, 1, "Existing")]).holding();
    let listing = Mutex::new(DatasetListViewModel::new(Some(1), 10));
    let controller = DatasetRegistrationController::new(None);
    controller.edit(|form| *form = filled());

    let first = controller.submit(&backend, &listing);
    let second = async {
        backend.entered.notified().await;
        assert!(controller.is_submitting());
        assert!(!controller.can_submit());

        let result = controller.submit(&backend, &listing).await;
        backend.release.notify_one();
        result
    };

    let (first, second) = tokio::join!(first, second);

    let registered = first.unwrap();
    assert!(matches!(second, Err(CliError::InFlight(_))));
    assert_eq!(
        DatasetRegistrationController::failure_notification(&second.unwrap_err()).severity,
        Severity::Info
    );
    assert_eq!(backend.create_calls.load(Ordering::SeqCst), 1);
    assert_eq!(registered.dataset.id, 2);

    assert!(!controller.is_submitting());
    assert_eq!(listing.lock().await.display_id_of(2), Some("P1-2"));
}
