mod common;

use abtube::app::{drive, handle_event, Catalog, Event};
use abtube::domain::ClientError;
use abtube::ui::{render, Screen};
use abtube::worker::ApiResponse;
use common::{harness, FakeApi};

fn titles(catalog: &Catalog) -> Vec<&str> {
    catalog.filtered_videos().iter().map(|v| v.title.as_str()).collect()
}

#[tokio::test]
async fn test_refresh_then_filter_by_search_and_category() {
    let api = FakeApi::new();
    let (mut state, mut dispatcher) = harness(&api);

    drive(
        &mut state,
        &mut dispatcher,
        [
            Event::RefreshCatalog,
            Event::SearchChanged("CAT".to_string()),
            Event::CategorySelected("Other".to_string()),
        ],
    )
    .await
    .unwrap();

    assert_eq!(state.catalog.videos().len(), 3);
    assert_eq!(titles(&state.catalog), vec!["Cat Facts"]);
    assert!(!state.catalog.is_loading());

    drive(&mut state, &mut dispatcher, [Event::SearchChanged("teaching".to_string())])
        .await
        .unwrap();
    assert_eq!(titles(&state.catalog), vec!["Dog Tricks"]);

    drive(
        &mut state,
        &mut dispatcher,
        [
            Event::SearchChanged(String::new()),
            Event::CategorySelected("All".to_string()),
        ],
    )
    .await
    .unwrap();
    assert_eq!(titles(&state.catalog), vec!["Cat Facts", "Dog Tricks", "Rust in 10 minutes"]);
}

#[tokio::test]
async fn test_filters_apply_to_each_new_load() {
    let api = FakeApi::new();
    let (mut state, mut dispatcher) = harness(&api);

    drive(
        &mut state,
        &mut dispatcher,
        [Event::CategorySelected("Programming".to_string()), Event::RefreshCatalog],
    )
    .await
    .unwrap();

    assert_eq!(titles(&state.catalog), vec!["Rust in 10 minutes"]);
    assert_eq!(api.catalog_requests(), 1);
}

#[tokio::test]
async fn test_stale_catalog_response_is_dropped() {
    let api = FakeApi::new();
    let (mut state, mut dispatcher) = harness(&api);

    let stale = state.catalog.begin_load();
    drive(&mut state, &mut dispatcher, [Event::RefreshCatalog]).await.unwrap();
    assert_eq!(state.catalog.videos().len(), 3);

    let late = ApiResponse::CatalogLoaded {
        ticket: stale,
        result: Ok(vec![]),
    };
    let (rendered, actions) = handle_event(&mut state, &Event::WorkerResponse(late)).unwrap();

    assert!(!rendered);
    assert!(actions.is_empty());
    assert_eq!(state.catalog.videos().len(), 3);
}

#[tokio::test]
async fn test_failed_load_empties_the_list_and_shows_the_error() {
    let api = FakeApi::new();
    let (mut state, mut dispatcher) = harness(&api);
    drive(&mut state, &mut dispatcher, [Event::RefreshCatalog]).await.unwrap();

    api.set_fail_catalog(true);
    drive(&mut state, &mut dispatcher, [Event::RefreshCatalog]).await.unwrap();

    assert!(state.catalog.videos().is_empty());
    assert!(state.catalog.error().unwrap().contains("connection refused"));

    let empty = state.compute_viewmodel(80).empty_state.unwrap();
    assert_eq!(empty.message, "Could not load videos");

    api.set_fail_catalog(false);
    drive(&mut state, &mut dispatcher, [Event::RefreshCatalog]).await.unwrap();
    assert!(state.catalog.error().is_none());
    assert_eq!(state.catalog.videos().len(), 3);
}

#[tokio::test]
async fn test_catalog_load_without_event_loop() {
    let api = FakeApi::new();
    let mut catalog = Catalog::new();
    let changes = catalog.subscribe();
    catalog.set_search_term("rust");

    catalog.load_videos(api.as_ref()).await.unwrap();

    assert_eq!(titles(&catalog), vec!["Rust in 10 minutes"]);
    assert_eq!(changes.borrow().len(), 1);

    api.set_fail_catalog(true);
    let err = catalog.load_videos(api.as_ref()).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert!(catalog.filtered_videos().is_empty());
}

#[tokio::test]
async fn test_rendered_listing_shows_matching_rows_only() {
    let api = FakeApi::new();
    let (mut state, mut dispatcher) = harness(&api);
    drive(
        &mut state,
        &mut dispatcher,
        [Event::RefreshCatalog, Event::SearchChanged("dog".to_string())],
    )
    .await
    .unwrap();

    let mut out = Vec::new();
    render(&state, Screen::Catalog, 100, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("ABTube (1/3)"));
    assert!(text.contains("Tricks"));
    assert!(!text.contains("Cat Facts"));
}
