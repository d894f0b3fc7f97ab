mod common;

use std::io::Write;

use abtube::app::{drive, Event};
use abtube::domain::{ClientError, UploadForm};
use common::{harness, log_in, FakeApi};

fn video_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
    file.write_all(b"\x00\x00\x00\x18ftypmp42").unwrap();
    file
}

#[tokio::test]
async fn test_upload_refreshes_catalog() {
    let api = FakeApi::new();
    let (mut state, mut dispatcher) = harness(&api);
    log_in(&mut state, &mut dispatcher, "alice", "secret1").await;
    drive(&mut state, &mut dispatcher, [Event::RefreshCatalog]).await.unwrap();
    let before = api.catalog_requests();

    let file = video_file();
    let form = UploadForm {
        category: "Music".to_string(),
        duration: "4:20".to_string(),
        ..UploadForm::new("Evening Jazz", "Live set", file.path())
    };
    drive(&mut state, &mut dispatcher, [Event::UploadSubmitted(form)]).await.unwrap();

    assert_eq!(state.notice.as_deref(), Some("Uploaded video 101"));
    assert_eq!(api.catalog_requests(), before + 1);

    let uploaded = state.catalog.find(101).unwrap();
    assert_eq!(uploaded.title, "Evening Jazz");
    assert_eq!(uploaded.uploader, "alice");
    assert_eq!(uploaded.duration, "4:20");
}

#[tokio::test]
async fn test_incomplete_upload_form_is_rejected_locally() {
    let api = FakeApi::new();
    let (mut state, mut dispatcher) = harness(&api);
    log_in(&mut state, &mut dispatcher, "alice", "secret1").await;

    let file = video_file();
    let err = drive(
        &mut state,
        &mut dispatcher,
        [Event::UploadSubmitted(UploadForm::new("  ", "Live set", file.path()))],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let err = drive(
        &mut state,
        &mut dispatcher,
        [Event::UploadSubmitted(UploadForm::new("Title", "Live set", "/no/such/video.mp4"))],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(api.catalog_requests(), 0);
}

#[tokio::test]
async fn test_deleting_open_video_closes_player() {
    let api = FakeApi::new();
    let (mut state, mut dispatcher) = harness(&api);
    log_in(&mut state, &mut dispatcher, "alice", "secret1").await;
    drive(&mut state, &mut dispatcher, [Event::RefreshCatalog, Event::OpenVideo(1)])
        .await
        .unwrap();
    assert!(state.player.video().is_some());

    drive(&mut state, &mut dispatcher, [Event::DeleteVideo(1)]).await.unwrap();

    assert_eq!(state.notice.as_deref(), Some("Deleted video 1"));
    assert!(state.player.video_id().is_none());
    assert!(state.catalog.find(1).is_none());
    assert_eq!(state.catalog.videos().len(), 2);
    assert!(api.video(1).is_none());
}

#[tokio::test]
async fn test_deleting_other_video_keeps_player_open() {
    let api = FakeApi::new();
    let (mut state, mut dispatcher) = harness(&api);
    log_in(&mut state, &mut dispatcher, "alice", "secret1").await;
    drive(&mut state, &mut dispatcher, [Event::OpenVideo(3)]).await.unwrap();

    drive(&mut state, &mut dispatcher, [Event::DeleteVideo(1)]).await.unwrap();

    assert_eq!(state.player.video_id(), Some(3));
    assert!(state.player.video().is_some());
}

#[tokio::test]
async fn test_deleting_someone_elses_video_is_forbidden() {
    let api = FakeApi::new();
    let (mut state, mut dispatcher) = harness(&api);
    log_in(&mut state, &mut dispatcher, "bob", "hunter22").await;
    drive(&mut state, &mut dispatcher, [Event::RefreshCatalog]).await.unwrap();

    drive(&mut state, &mut dispatcher, [Event::DeleteVideo(1)]).await.unwrap();

    assert!(state.alert.as_deref().unwrap().starts_with("Forbidden"));
    assert!(state.notice.is_none());
    assert_eq!(state.catalog.videos().len(), 3);
    assert!(api.video(1).is_some());
}

#[tokio::test]
async fn test_deleting_unknown_video_reports_not_found() {
    let api = FakeApi::new();
    let (mut state, mut dispatcher) = harness(&api);
    log_in(&mut state, &mut dispatcher, "bob", "hunter22").await;

    drive(&mut state, &mut dispatcher, [Event::DeleteVideo(77)]).await.unwrap();

    assert!(state.alert.as_deref().unwrap().starts_with("Not found"));
}
