use sea_orm::EntityTrait;
use serde_json::json;

use store::api::clip_predictions::ClipPredictionFilter;
use store::api::sound_event_predictions::SoundEventPredictionFilter;
use store::api::{ClipPredictionApi, ModelRunApi, SoundEventApi, SoundEventPredictionApi};
use store::entity::{model_run_clip_prediction, sound_event_prediction, sound_event_prediction_tag};
use store::models::{
    CreateClipPrediction, CreateModelRun, CreateSoundEvent, CreateSoundEventPrediction, Geometry,
    UpdateModelRun,
};

use crate::common::TestDb;

#[tokio::test]
async fn model_runs_deduplicate_on_name_and_version() {
    let app = TestDb::spawn().await;
    let api = ModelRunApi::new();
    api.create(&app.db, CreateModelRun::new("birdnet", "2.4"))
        .await
        .unwrap();

    let created = api
        .create_many_without_duplicates(
            &app.db,
            vec![
                CreateModelRun::new("birdnet", "2.4"),
                CreateModelRun::new("birdnet", "2.5"),
                CreateModelRun::new("birdnet", "2.5"),
            ],
            false,
        )
        .await
        .unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].version, "2.5");

    let err = api
        .create(&app.db, CreateModelRun::new("birdnet", "2.5"))
        .await
        .unwrap_err();
    assert!(err.is_duplicate());

    let run = api.get_by_name_version(&app.db, "birdnet", "2.4").await.unwrap();
    let updated = api
        .update(
            &app.db,
            &run,
            UpdateModelRun {
                description: Some("baseline".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.description, "baseline");
    assert_eq!(updated.version, "2.4");
}

#[tokio::test]
async fn model_run_collects_clip_predictions() {
    let app = TestDb::spawn().await;
    let runs = ModelRunApi::new();
    let predictions = ClipPredictionApi::new();
    let run = runs
        .create(&app.db, CreateModelRun::new("detector", "1"))
        .await
        .unwrap();
    let recording = app.create_recording("r.wav").await;
    let mut created = Vec::new();
    for start in [0.0, 1.0, 2.0] {
        let clip = app.create_clip(&recording, start, start + 1.0).await;
        let prediction = predictions
            .create(&app.db, CreateClipPrediction::new(clip.id))
            .await
            .unwrap();
        runs.add_clip_prediction(&app.db, &run, &prediction)
            .await
            .unwrap();
        created.push(prediction);
    }
    runs.add_clip_prediction(&app.db, &run, &created[0])
        .await
        .expect("second add is a no-op");

    let (page, total) = runs
        .get_clip_predictions(&app.db, &run, Some(2), Some(1))
        .await
        .unwrap();
    assert_eq!(total, 3);
    let uuids: Vec<_> = page.iter().map(|p| p.uuid).collect();
    assert_eq!(uuids, vec![created[1].uuid, created[2].uuid]);

    runs.remove_clip_prediction(&app.db, &run, &created[1])
        .await
        .unwrap();
    let filters = ClipPredictionFilter {
        model_run_id: Some(run.id),
        ..Default::default()
    }
    .into_conditions();
    let (_, total) = predictions
        .get_many(&app.db, None, None, filters, None)
        .await
        .unwrap();
    assert_eq!(total, 2);
}

#[tokio::test]
async fn predicted_tags_carry_scores() {
    let app = TestDb::spawn().await;
    let api = ClipPredictionApi::new();
    let recording = app.create_recording("r.wav").await;
    let clip = app.create_clip(&recording, 0.0, 3.0).await;
    let prediction = api
        .create(&app.db, CreateClipPrediction::new(clip.id))
        .await
        .unwrap();
    let myotis = app.create_tag("species", "Myotis").await;
    let pipistrellus = app.create_tag("species", "Pipistrellus").await;

    api.add_tag(&app.db, &prediction, pipistrellus.id, 0.25).await.unwrap();
    api.add_tag(&app.db, &prediction, myotis.id, 0.9).await.unwrap();

    let tags = api.get_predicted_tags(&app.db, &prediction).await.unwrap();
    let scored: Vec<_> = tags
        .iter()
        .map(|t| (t.tag.value.as_str(), t.score))
        .collect();
    assert_eq!(scored, vec![("Myotis", 0.9), ("Pipistrellus", 0.25)]);
}

#[tokio::test]
async fn deleting_clip_prediction_removes_sound_event_predictions() {
    let app = TestDb::spawn().await;
    let clip_api = ClipPredictionApi::new();
    let event_api = SoundEventPredictionApi::new();
    let runs = ModelRunApi::new();
    let recording = app.create_recording("r.wav").await;
    let clip = app.create_clip(&recording, 0.0, 3.0).await;
    let run = runs
        .create(&app.db, CreateModelRun::new("detector", "1"))
        .await
        .unwrap();
    let prediction = clip_api
        .create(&app.db, CreateClipPrediction::new(clip.id))
        .await
        .unwrap();
    runs.add_clip_prediction(&app.db, &run, &prediction)
        .await
        .unwrap();

    let event = SoundEventApi::new()
        .create(
            &app.db,
            CreateSoundEvent::new(recording.id, Geometry::new("TimeInterval", json!([0.5, 1.0]))),
        )
        .await
        .unwrap();
    let weak = event_api
        .create(
            &app.db,
            CreateSoundEventPrediction::new(prediction.id, event.id, 0.2),
        )
        .await
        .unwrap();
    let strong = event_api
        .create(
            &app.db,
            CreateSoundEventPrediction::new(prediction.id, event.id, 0.8),
        )
        .await
        .unwrap();
    let tag = app.create_tag("call", "social").await;
    event_api.add_tag(&app.db, &weak, tag.id, 0.4).await.unwrap();

    let filters = SoundEventPredictionFilter {
        clip_prediction_id: Some(prediction.id),
        min_score: Some(0.5),
    }
    .into_conditions();
    let (confident, _) = event_api
        .get_many(&app.db, None, None, filters, None)
        .await
        .unwrap();
    assert_eq!(confident.len(), 1);
    assert_eq!(confident[0].uuid, strong.uuid);

    clip_api.delete(&app.db, &prediction).await.expect("delete");

    assert!(sound_event_prediction::Entity::find().all(&app.db).await.unwrap().is_empty());
    assert!(sound_event_prediction_tag::Entity::find().all(&app.db).await.unwrap().is_empty());
    assert!(model_run_clip_prediction::Entity::find().all(&app.db).await.unwrap().is_empty());
    runs.get(&app.db, &run.uuid).await.expect("model run stays");
    SoundEventApi::new()
        .get(&app.db, &event.uuid)
        .await
        .expect("sound event stays");
}
