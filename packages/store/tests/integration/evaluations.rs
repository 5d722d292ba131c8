use sea_orm::EntityTrait;

use store::api::evaluations::EvaluationFilter;
use store::api::{
    ClipAnnotationApi, ClipEvaluationApi, ClipPredictionApi, EvaluationApi, FeatureNameApi,
    SoundEventEvaluationApi,
};
use store::entity::{clip_evaluation, clip_evaluation_feature, sound_event_evaluation_feature};
use store::models::{
    ClipEvaluation, CreateClipAnnotation, CreateClipEvaluation, CreateClipPrediction,
    CreateEvaluation, CreateSoundEventEvaluation, UpdateEvaluation,
};

use crate::common::TestDb;

async fn clip_evaluation(app: &TestDb, evaluation_id: i32) -> ClipEvaluation {
    let recording = app.create_recording("r.wav").await;
    let clip = app.create_clip(&recording, 0.0, 3.0).await;
    let annotation = ClipAnnotationApi::new()
        .create(&app.db, CreateClipAnnotation::new(clip.id))
        .await
        .unwrap();
    let prediction = ClipPredictionApi::new()
        .create(&app.db, CreateClipPrediction::new(clip.id))
        .await
        .unwrap();
    ClipEvaluationApi::new()
        .create(
            &app.db,
            CreateClipEvaluation::new(evaluation_id, annotation.id, prediction.id, 0.75),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn metrics_are_stored_as_features() {
    let app = TestDb::spawn().await;
    let api = EvaluationApi::new();
    let names = FeatureNameApi::new();
    let evaluation = api
        .create(&app.db, CreateEvaluation::new("clip_classification", 0.0))
        .await
        .unwrap();
    let precision = names.get_or_create(&app.db, "precision").await.unwrap();
    let recall = names.get_or_create(&app.db, "recall").await.unwrap();

    api.add_feature(&app.db, &evaluation, recall.id, 0.5).await.unwrap();
    api.add_feature(&app.db, &evaluation, precision.id, 0.8).await.unwrap();
    api.update_feature(&app.db, &evaluation, recall.id, 0.6)
        .await
        .unwrap();

    let metrics: Vec<_> = api
        .get_features(&app.db, &evaluation)
        .await
        .unwrap()
        .into_iter()
        .map(|feature| (feature.name, feature.value))
        .collect();
    assert_eq!(
        metrics,
        vec![("precision".to_string(), 0.8), ("recall".to_string(), 0.6)]
    );

    let updated = api
        .update(
            &app.db,
            &evaluation,
            UpdateEvaluation {
                score: Some(0.7),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.score, 0.7);
    assert_eq!(updated.task, "clip_classification");

    let filters = EvaluationFilter {
        task: Some("sound_event_detection".to_string()),
    }
    .into_conditions();
    let (found, _) = api.get_many(&app.db, None, None, filters, None).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn deleting_evaluation_removes_clip_and_sound_event_evaluations() {
    let app = TestDb::spawn().await;
    let api = EvaluationApi::new();
    let evaluation = api
        .create(&app.db, CreateEvaluation::new("sound_event_detection", 0.4))
        .await
        .unwrap();
    let clip_evaluation = clip_evaluation(&app, evaluation.id).await;
    let accuracy = FeatureNameApi::new()
        .get_or_create(&app.db, "accuracy")
        .await
        .unwrap();
    ClipEvaluationApi::new()
        .add_feature(&app.db, &clip_evaluation, accuracy.id, 1.0)
        .await
        .unwrap();
    let missed = SoundEventEvaluationApi::new()
        .create(
            &app.db,
            CreateSoundEventEvaluation::new(clip_evaluation.id, None, None, 0.0, 0.0),
        )
        .await
        .unwrap();
    SoundEventEvaluationApi::new()
        .add_feature(&app.db, &missed, accuracy.id, 0.0)
        .await
        .unwrap();

    api.delete(&app.db, &evaluation).await.expect("delete");

    assert!(clip_evaluation::Entity::find().all(&app.db).await.unwrap().is_empty());
    assert!(clip_evaluation_feature::Entity::find().all(&app.db).await.unwrap().is_empty());
    assert!(
        sound_event_evaluation_feature::Entity::find()
            .all(&app.db)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        SoundEventEvaluationApi::new()
            .get(&app.db, &missed.uuid)
            .await
            .unwrap_err()
            .is_not_found()
    );
    FeatureNameApi::new()
        .get_by_name(&app.db, "accuracy")
        .await
        .expect("feature names are shared");
}
