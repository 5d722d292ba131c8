use store::api::ClipApi;
use store::api::clips::ClipFilter;
use store::api::common::SortBy;
use store::entity::clip;
use store::models::CreateClip;

use crate::common::TestDb;

#[tokio::test]
async fn dedup_scenario() {
    let app = TestDb::spawn().await;
    let api = ClipApi::new();
    let recording = app.create_recording("r.wav").await;

    let candidates = || {
        vec![
            CreateClip::new(recording.id, 0.0, 1.0),
            CreateClip::new(recording.id, 0.0, 1.0),
            CreateClip::new(recording.id, 1.0, 2.0),
        ]
    };

    let created = api
        .create_many_without_duplicates(&app.db, candidates(), false)
        .await
        .expect("first run");
    let spans: Vec<_> = created.iter().map(|c| (c.start_time, c.end_time)).collect();
    assert_eq!(spans, vec![(0.0, 1.0), (1.0, 2.0)]);

    let again = api
        .create_many_without_duplicates(&app.db, candidates(), false)
        .await
        .expect("second run");
    assert!(again.is_empty());

    let all = api
        .create_many_without_duplicates(&app.db, candidates(), true)
        .await
        .expect("return all");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].uuid, created[0].uuid);

    let (_, total) = api.get_many(&app.db, None, None, vec![], None).await.unwrap();
    assert_eq!(total, 2);
}

#[tokio::test]
async fn create_many_fails_whole_batch_on_duplicate() {
    let app = TestDb::spawn().await;
    let api = ClipApi::new();
    let recording = app.create_recording("r.wav").await;
    app.create_clip(&recording, 0.0, 1.0).await;

    let err = api
        .create_many(
            &app.db,
            vec![
                CreateClip::new(recording.id, 5.0, 6.0),
                CreateClip::new(recording.id, 0.0, 1.0),
            ],
        )
        .await
        .unwrap_err();
    assert!(err.is_duplicate());

    let (_, total) = api.get_many(&app.db, None, None, vec![], None).await.unwrap();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn create_many_returns_rows_in_input_order() {
    let app = TestDb::spawn().await;
    let recording = app.create_recording("r.wav").await;

    let clips = ClipApi::new()
        .create_many(
            &app.db,
            vec![
                CreateClip::new(recording.id, 2.0, 3.0),
                CreateClip::new(recording.id, 0.0, 1.0),
            ],
        )
        .await
        .unwrap();

    assert_eq!(clips[0].start_time, 2.0);
    assert_eq!(clips[1].start_time, 0.0);
}

#[tokio::test]
async fn filter_by_recording_and_window() {
    let app = TestDb::spawn().await;
    let first = app.create_recording("a.wav").await;
    let second = app.create_recording("b.wav").await;
    for start in [0.0, 10.0, 20.0] {
        app.create_clip(&first, start, start + 5.0).await;
    }
    app.create_clip(&second, 10.0, 15.0).await;

    let filters = ClipFilter {
        recording_id: Some(first.id),
        start_time: Some(5.0),
        end_time: Some(30.0),
    }
    .into_conditions();
    let (clips, total) = ClipApi::new()
        .get_many(&app.db, None, None, filters, Some(SortBy::asc(clip::Column::StartTime)))
        .await
        .unwrap();

    assert_eq!(total, 2);
    assert_eq!(clips[0].start_time, 10.0);
    assert_eq!(clips[1].start_time, 20.0);
}

#[tokio::test]
async fn large_batches_are_deduplicated() {
    let app = TestDb::spawn().await;
    let api = ClipApi::new();
    let recording = app.create_recording("long.wav").await;
    let candidates = |count: usize| {
        (0..count)
            .map(|i| CreateClip::new(recording.id, i as f64, i as f64 + 1.0))
            .collect::<Vec<_>>()
    };

    let stored = api
        .create_many(&app.db, candidates(1_000))
        .await
        .expect("bulk create");
    assert_eq!(stored.len(), 1_000);

    let created = api
        .create_many_without_duplicates(&app.db, candidates(1_500), false)
        .await
        .expect("dedup run");
    assert_eq!(created.len(), 500);
    assert_eq!(created[0].start_time, 1_000.0);

    let all = api
        .create_many_without_duplicates(&app.db, candidates(1_500), true)
        .await
        .expect("return all");
    assert_eq!(all.len(), 1_500);
    assert!(all.iter().enumerate().all(|(i, c)| c.start_time == i as f64));
}

#[tokio::test]
async fn negative_zero_start_finds_stored_clip() {
    let app = TestDb::spawn().await;
    let api = ClipApi::new();
    let recording = app.create_recording("r.wav").await;
    let stored = app.create_clip(&recording, 0.0, 1.0).await;

    let created = api
        .create_many_without_duplicates(
            &app.db,
            vec![CreateClip::new(recording.id, -0.0, 1.0)],
            false,
        )
        .await
        .unwrap();
    assert!(created.is_empty());

    let all = api
        .create_many_without_duplicates(
            &app.db,
            vec![CreateClip::new(recording.id, -0.0, 1.0)],
            true,
        )
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].uuid, stored.uuid);
}
