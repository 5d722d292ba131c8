use sea_orm::EntityTrait;

use store::api::{DatasetApi, RecordingApi};
use store::entity::dataset_recording;
use store::models::{CreateDataset, CreateRecording};

use crate::common::TestDb;

#[tokio::test]
async fn membership_is_idempotent() {
    let app = TestDb::spawn().await;
    let api = DatasetApi::new();
    let dataset = api
        .create(&app.db, CreateDataset::new("bats-2024", "/audio"))
        .await
        .unwrap();
    let recording = RecordingApi::new()
        .create(&app.db, CreateRecording::new("/audio/site1/a.wav", 5.0, 384_000, 1))
        .await
        .unwrap();
    let outsider = app.create_recording("b.wav").await;

    api.add_recording(&app.db, &dataset, &recording).await.unwrap();
    api.add_recording(&app.db, &dataset, &recording)
        .await
        .expect("second add is a no-op");

    let (members, total) = api
        .get_recordings(&app.db, &dataset, None, None)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(members[0].uuid, recording.uuid);

    let rows = dataset_recording::Entity::find().all(&app.db).await.unwrap();
    assert_eq!(rows[0].path, "site1/a.wav");

    api.remove_recording(&app.db, &dataset, &outsider)
        .await
        .expect("removing a non-member is a no-op");
    api.remove_recording(&app.db, &dataset, &recording).await.unwrap();
    let (_, total) = api
        .get_recordings(&app.db, &dataset, None, None)
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn deleting_dataset_keeps_recordings() {
    let app = TestDb::spawn().await;
    let api = DatasetApi::new();
    let dataset = api
        .create(&app.db, CreateDataset::new("d", "/"))
        .await
        .unwrap();
    let recording = app.create_recording("a.wav").await;
    api.add_recording(&app.db, &dataset, &recording).await.unwrap();

    api.delete(&app.db, &dataset).await.expect("delete");

    assert!(dataset_recording::Entity::find().all(&app.db).await.unwrap().is_empty());
    RecordingApi::new()
        .get(&app.db, &recording.uuid)
        .await
        .expect("recording survives");
}

#[tokio::test]
async fn duplicate_name_is_rejected() {
    let app = TestDb::spawn().await;
    let api = DatasetApi::new();
    api.create(&app.db, CreateDataset::new("same", "/a")).await.unwrap();
    let err = api
        .create(&app.db, CreateDataset::new("same", "/b"))
        .await
        .unwrap_err();
    assert!(err.is_duplicate());
    assert_eq!(api.get_by_name(&app.db, "same").await.unwrap().audio_dir, "/a");
}
