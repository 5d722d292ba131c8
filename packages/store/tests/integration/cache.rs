use store::api::{
    AnnotationProjectApi, AnnotationTaskApi, ClipAnnotationApi, ClipPredictionApi, RecordingApi,
    SoundEventApi, SoundEventPredictionApi,
};
use store::config::CacheConfig;
use store::models::{
    CreateAnnotationProject, CreateClipPrediction, CreateRecording, CreateSoundEvent,
    CreateSoundEventPrediction, Geometry, UpdateRecording,
};

use crate::common::TestDb;

#[tokio::test]
async fn reads_populate_and_writes_refresh_the_cache() {
    let app = TestDb::spawn().await;
    let api = RecordingApi::with_cache(8);
    let recording = RecordingApi::new()
        .create(&app.db, CreateRecording::new("a.wav", 10.0, 44_100, 2))
        .await
        .unwrap();
    assert!(!api.is_cached(&recording.uuid));

    api.get(&app.db, &recording.uuid).await.unwrap();
    assert!(api.is_cached(&recording.uuid));

    let updated = api
        .update(
            &app.db,
            &recording,
            UpdateRecording {
                channels: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let cached = api.get(&app.db, &recording.uuid).await.unwrap();
    assert_eq!(cached, updated);
    assert_eq!(cached.channels, 1);

    api.delete(&app.db, &recording).await.unwrap();
    assert!(!api.is_cached(&recording.uuid));
    assert!(api.get(&app.db, &recording.uuid).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn least_recently_used_entry_is_evicted() {
    let app = TestDb::spawn().await;
    let api = RecordingApi::with_cache(2);
    let a = api
        .create(&app.db, CreateRecording::new("a.wav", 1.0, 8_000, 1))
        .await
        .unwrap();
    let b = api
        .create(&app.db, CreateRecording::new("b.wav", 1.0, 8_000, 1))
        .await
        .unwrap();
    api.get(&app.db, &a.uuid).await.unwrap();
    let c = api
        .create(&app.db, CreateRecording::new("c.wav", 1.0, 8_000, 1))
        .await
        .unwrap();

    assert!(api.is_cached(&a.uuid));
    assert!(!api.is_cached(&b.uuid));
    assert!(api.is_cached(&c.uuid));
}

#[tokio::test]
async fn zero_capacity_disables_caching() {
    let app = TestDb::spawn().await;
    let api = RecordingApi::from_config(&CacheConfig { capacity: 0 });
    let recording = api
        .create(&app.db, CreateRecording::new("a.wav", 1.0, 8_000, 1))
        .await
        .unwrap();
    api.get(&app.db, &recording.uuid).await.unwrap();
    assert!(!api.is_cached(&recording.uuid));
}

#[tokio::test]
async fn update_through_one_facade_evicts_from_another() {
    let app = TestDb::spawn().await;
    let reader = RecordingApi::with_cache(8);
    let writer = RecordingApi::new();
    let recording = app.create_recording("a.wav").await;
    reader.get(&app.db, &recording.uuid).await.unwrap();

    writer
        .update(
            &app.db,
            &recording,
            UpdateRecording {
                channels: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(!reader.is_cached(&recording.uuid));
    assert_eq!(reader.get(&app.db, &recording.uuid).await.unwrap().channels, 2);
}

#[tokio::test]
async fn project_cascade_evicts_tasks_and_clip_annotations() {
    let app = TestDb::spawn().await;
    let projects = AnnotationProjectApi::new();
    let tasks = AnnotationTaskApi::with_cache(8);
    let annotations = ClipAnnotationApi::with_cache(8);
    let project = projects
        .create(&app.db, CreateAnnotationProject::new("survey", ""))
        .await
        .unwrap();
    let recording = app.create_recording("r.wav").await;
    let clip = app.create_clip(&recording, 0.0, 1.0).await;
    let task = tasks.create_task(&app.db, &project, &clip).await.unwrap();
    let annotation = annotations
        .get_by_id(&app.db, task.clip_annotation_id)
        .await
        .unwrap();
    annotations.get(&app.db, &annotation.uuid).await.unwrap();
    assert!(tasks.is_cached(&task.uuid));
    assert!(annotations.is_cached(&annotation.uuid));

    projects.delete(&app.db, &project).await.expect("delete project");

    assert!(tasks.get(&app.db, &task.uuid).await.unwrap_err().is_not_found());
    assert!(
        annotations
            .get(&app.db, &annotation.uuid)
            .await
            .unwrap_err()
            .is_not_found()
    );
}

#[tokio::test]
async fn prediction_cascade_evicts_sound_event_predictions() {
    let app = TestDb::spawn().await;
    let predictions = ClipPredictionApi::new();
    let events = SoundEventPredictionApi::with_cache(8);
    let recording = app.create_recording("r.wav").await;
    let clip = app.create_clip(&recording, 0.0, 1.0).await;
    let prediction = predictions
        .create(&app.db, CreateClipPrediction::new(clip.id))
        .await
        .unwrap();
    let event = SoundEventApi::new()
        .create(
            &app.db,
            CreateSoundEvent::new(recording.id, Geometry::new("TimeStamp", serde_json::json!(0.5))),
        )
        .await
        .unwrap();
    let predicted = events
        .create(
            &app.db,
            CreateSoundEventPrediction::new(prediction.id, event.id, 0.9),
        )
        .await
        .unwrap();
    assert!(events.is_cached(&predicted.uuid));

    predictions.delete(&app.db, &prediction).await.unwrap();

    assert!(!events.is_cached(&predicted.uuid));
    assert!(events.get(&app.db, &predicted.uuid).await.unwrap_err().is_not_found());
}
