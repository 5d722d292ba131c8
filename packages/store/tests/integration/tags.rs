use sea_orm::EntityTrait;

use store::api::tags::TagFilter;
use store::api::{ClipAnnotationApi, NoteApi, RecordingApi, TagApi};
use store::entity::{clip_annotation_tag, recording_note, recording_tag};
use store::models::{CreateClipAnnotation, CreateNote, CreateTag, UpdateTag};

use crate::common::TestDb;

#[tokio::test]
async fn get_or_create_is_stable() {
    let app = TestDb::spawn().await;
    let api = TagApi::new();

    let first = api.get_or_create(&app.db, "species", "Pipistrellus").await.unwrap();
    let second = api.get_or_create(&app.db, "species", "Pipistrellus").await.unwrap();

    assert_eq!(first.id, second.id);
    let (_, total) = api.get_many(&app.db, None, None, vec![], None).await.unwrap();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn same_value_under_different_keys_are_distinct() {
    let app = TestDb::spawn().await;
    let a = app.create_tag("genus", "Myotis").await;
    let b = app.create_tag("species", "Myotis").await;
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn bulk_tags_return_all_in_candidate_order() {
    let app = TestDb::spawn().await;
    let api = TagApi::new();
    app.create_tag("call", "social").await;

    let tags = api
        .create_many_without_duplicates(
            &app.db,
            vec![
                CreateTag::new("call", "feeding"),
                CreateTag::new("call", "social"),
                CreateTag::new("call", "feeding"),
            ],
            true,
        )
        .await
        .unwrap();

    let values: Vec<_> = tags.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["feeding", "social"]);
}

#[tokio::test]
async fn filter_by_key_and_search() {
    let app = TestDb::spawn().await;
    let api = TagApi::new();
    app.create_tag("species", "Myotis daubentonii").await;
    app.create_tag("species", "Nyctalus noctula").await;
    app.create_tag("genus", "Myotis").await;

    let filters = TagFilter {
        key: Some("species".into()),
        search: Some("myotis".into()),
    }
    .into_conditions();
    let (found, total) = api.get_many(&app.db, None, None, filters, None).await.unwrap();

    assert_eq!(total, 1);
    assert_eq!(found[0].value, "Myotis daubentonii");
}

#[tokio::test]
async fn renaming_onto_existing_tag_is_duplicate() {
    let app = TestDb::spawn().await;
    let api = TagApi::new();
    app.create_tag("k", "a").await;
    let b = app.create_tag("k", "b").await;

    let err = api
        .update(
            &app.db,
            &b,
            UpdateTag {
                value: Some("a".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_duplicate());
}

#[tokio::test]
async fn deleting_tag_detaches_it_everywhere() {
    let app = TestDb::spawn().await;
    let recording = app.create_recording("r.wav").await;
    let clip = app.create_clip(&recording, 0.0, 1.0).await;
    let annotation = ClipAnnotationApi::new()
        .create(&app.db, CreateClipAnnotation::new(clip.id))
        .await
        .unwrap();
    let tag = app.create_tag("species", "Myotis").await;

    RecordingApi::new().add_tag(&app.db, &recording, tag.id, ()).await.unwrap();
    ClipAnnotationApi::new()
        .add_tag(&app.db, &annotation, tag.id, None)
        .await
        .unwrap();

    TagApi::new().delete(&app.db, &tag).await.expect("delete tag");

    assert!(recording_tag::Entity::find().all(&app.db).await.unwrap().is_empty());
    assert!(clip_annotation_tag::Entity::find().all(&app.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_note_detaches_it() {
    let app = TestDb::spawn().await;
    let recording = app.create_recording("r.wav").await;
    let note = NoteApi::new().create(&app.db, CreateNote::new("check")).await.unwrap();
    RecordingApi::new().add_note(&app.db, &recording, note.id).await.unwrap();

    NoteApi::new().delete(&app.db, &note).await.expect("delete note");

    assert!(recording_note::Entity::find().all(&app.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn large_vocabulary_import() {
    let app = TestDb::spawn().await;
    let api = TagApi::new();
    let vocabulary = || {
        (0..1_500)
            .map(|i| CreateTag::new("call_type", format!("v{i}")))
            .collect::<Vec<_>>()
    };
    api.get_or_create(&app.db, "call_type", "v7").await.unwrap();

    let created = api
        .create_many_without_duplicates(&app.db, vocabulary(), false)
        .await
        .expect("import");
    assert_eq!(created.len(), 1_499);

    let all = api
        .create_many_without_duplicates(&app.db, vocabulary(), true)
        .await
        .expect("return all");
    assert_eq!(all.len(), 1_500);
    assert_eq!(all[1_499].value, "v1499");
}
