use sea_orm::{EntityTrait, TransactionTrait};
use uuid::Uuid;

use store::api::common::SortBy;
use store::api::recordings::RecordingFilter;
use store::api::{FeatureNameApi, NoteApi, RecordingApi};
use store::entity::{recording, recording_tag, tag};
use store::error::ApiError;
use store::models::{CreateNote, CreateRecording, UpdateRecording};

use crate::common::TestDb;

mod crud {
    use super::*;

    #[tokio::test]
    async fn create_then_get_returns_same_recording() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();

        let created = api
            .create(&app.db, CreateRecording::new("site1/a.wav", 30.0, 44_100, 2))
            .await
            .expect("create");
        let fetched = api.get(&app.db, &created.uuid).await.expect("get");

        assert_eq!(fetched, created);
        assert_eq!(fetched.path, "site1/a.wav");
        assert_eq!(fetched.time_expansion, 1.0);
        assert!(fetched.latitude.is_none());
    }

    #[tokio::test]
    async fn get_by_path_and_by_id() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        let created = app.create_recording("b.wav").await;

        let by_path = api.get_by_path(&app.db, "b.wav").await.expect("by path");
        let by_id = api.get_by_id(&app.db, created.id).await.expect("by id");

        assert_eq!(by_path.uuid, created.uuid);
        assert_eq!(by_id.uuid, created.uuid);
    }

    #[tokio::test]
    async fn missing_recording_is_not_found() {
        let app = TestDb::spawn().await;
        let err = RecordingApi::new()
            .get(&app.db, &Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn overrides_win_over_payload() {
        let app = TestDb::spawn().await;
        let recording = RecordingApi::new()
            .create_from_data(
                &app.db,
                CreateRecording::new("c.wav", 10.0, 8_000, 1),
                |active| active.rights = sea_orm::Set(Some("CC-BY".into())),
            )
            .await
            .expect("create");
        assert_eq!(recording.rights.as_deref(), Some("CC-BY"));
    }

    #[tokio::test]
    async fn delete_returns_last_state_and_removes_row() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        let created = app.create_recording("d.wav").await;

        let deleted = api.delete(&app.db, &created).await.expect("delete");
        assert_eq!(deleted.uuid, created.uuid);

        let err = api.get(&app.db, &created.uuid).await.unwrap_err();
        assert!(err.is_not_found());
        let err = api.delete(&app.db, &created).await.unwrap_err();
        assert!(err.is_not_found());
    }
}

mod partial_update {
    use super::*;

    #[tokio::test]
    async fn setting_latitude_leaves_other_fields_alone() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        let created = app.create_recording("lat.wav").await;

        let updated = api
            .update(
                &app.db,
                &created,
                UpdateRecording {
                    latitude: Some(Some(45.0)),
                    ..Default::default()
                },
            )
            .await
            .expect("update");

        assert_eq!(updated.latitude, Some(45.0));
        assert_eq!(updated.longitude, None);
        assert_eq!(updated.path, created.path);
        assert_eq!(updated.duration, created.duration);
        assert_eq!(updated.uuid, created.uuid);
    }

    #[tokio::test]
    async fn null_clears_a_nullable_column() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        let created = app.create_recording("clear.wav").await;
        let with_rights = api
            .update(
                &app.db,
                &created,
                UpdateRecording {
                    rights: Some(Some("CC0".into())),
                    ..Default::default()
                },
            )
            .await
            .expect("set rights");

        let patch: UpdateRecording = serde_json::from_str(r#"{"rights": null}"#).unwrap();
        let cleared = api.update(&app.db, &with_rights, patch).await.expect("clear");
        assert_eq!(cleared.rights, None);
    }

    #[tokio::test]
    async fn empty_update_returns_current_row() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        let created = app.create_recording("noop.wav").await;

        let updated = api
            .update(&app.db, &created, UpdateRecording::default())
            .await
            .expect("update");
        assert_eq!(updated, created);
    }
}

mod duplicates {
    use super::*;

    #[tokio::test]
    async fn duplicate_path_fails_and_connection_stays_usable() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        app.create_recording("dup.wav").await;

        let err = api
            .create(&app.db, CreateRecording::new("dup.wav", 1.0, 8_000, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::DuplicateObject { entity: "recording", .. }));

        let other = api
            .create(&app.db, CreateRecording::new("other.wav", 1.0, 8_000, 1))
            .await
            .expect("connection still usable");
        assert_eq!(other.path, "other.wav");
    }

    #[tokio::test]
    async fn duplicate_inside_transaction_keeps_transaction_usable() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        app.create_recording("txn.wav").await;

        let txn = app.db.begin().await.expect("begin");
        let err = api
            .create(&txn, CreateRecording::new("txn.wav", 1.0, 8_000, 1))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
        api.create(&txn, CreateRecording::new("txn2.wav", 1.0, 8_000, 1))
            .await
            .expect("savepoint rolled back only the failed insert");
        txn.commit().await.expect("commit");

        api.get_by_path(&app.db, "txn2.wav").await.expect("committed");
    }

    #[tokio::test]
    async fn bulk_create_without_duplicates_skips_existing_paths() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        app.create_recording("a.wav").await;

        let created = api
            .create_many_without_duplicates(
                &app.db,
                vec![
                    CreateRecording::new("a.wav", 1.0, 8_000, 1),
                    CreateRecording::new("b.wav", 1.0, 8_000, 1),
                    CreateRecording::new("b.wav", 2.0, 8_000, 1),
                ],
                false,
            )
            .await
            .expect("bulk");

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].path, "b.wav");
        assert_eq!(created[0].duration, 1.0);
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn pagination_reports_total_and_respects_sort() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        for path in ["c.wav", "a.wav", "e.wav", "b.wav", "d.wav"] {
            app.create_recording(path).await;
        }

        let (page, total) = api
            .get_many(
                &app.db,
                Some(2),
                Some(1),
                vec![],
                Some(SortBy::asc(recording::Column::Path)),
            )
            .await
            .expect("list");
        let paths: Vec<_> = page.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(total, 5);
        assert_eq!(paths, vec!["b.wav", "c.wav"]);

        let (all, _) = api
            .get_many(&app.db, Some(-1), None, vec![], Some(SortBy::from("-path")))
            .await
            .expect("list all");
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].path, "e.wav");
    }

    #[tokio::test]
    async fn unknown_sort_field_is_rejected() {
        let app = TestDb::spawn().await;
        let err = RecordingApi::new()
            .get_many(&app.db, None, None, vec![], Some(SortBy::from("loudness")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidSort(_)));
    }

    #[tokio::test]
    async fn filters_are_combined() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        api.create(&app.db, CreateRecording::new("forest/owl.wav", 10.0, 48_000, 1))
            .await
            .unwrap();
        api.create(&app.db, CreateRecording::new("forest/bat.wav", 10.0, 256_000, 1))
            .await
            .unwrap();
        api.create(&app.db, CreateRecording::new("river/Bat.wav", 10.0, 256_000, 1))
            .await
            .unwrap();

        let filters = RecordingFilter {
            search: Some("bat".into()),
            samplerate: Some(256_000),
            ..Default::default()
        }
        .into_conditions();
        let (found, total) = api
            .get_many(&app.db, None, None, filters, Some(SortBy::asc(recording::Column::Path)))
            .await
            .expect("list");

        assert_eq!(total, 2);
        assert_eq!(found[0].path, "forest/bat.wav");
        assert_eq!(found[1].path, "river/Bat.wav");
    }
}

mod associations {
    use super::*;

    #[tokio::test]
    async fn tag_scenario() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        let recording = app.create_recording("r.wav").await;
        let tag = app.create_tag("species", "Myotis").await;

        api.add_tag(&app.db, &recording, tag.id, ()).await.expect("add");
        api.add_tag(&app.db, &recording, tag.id, ())
            .await
            .expect("second add is a no-op");
        let tags = api.get_tags(&app.db, &recording).await.expect("tags");
        assert_eq!(tags.len(), 1);
        assert_eq!((tags[0].key.as_str(), tags[0].value.as_str()), ("species", "Myotis"));

        api.remove_tag(&app.db, &recording, tag.id).await.expect("remove");
        assert!(api.get_tags(&app.db, &recording).await.unwrap().is_empty());

        api.remove_tag(&app.db, &recording, tag.id)
            .await
            .expect("removing again is a no-op");
    }

    #[tokio::test]
    async fn adding_missing_tag_is_not_found() {
        let app = TestDb::spawn().await;
        let recording = app.create_recording("r.wav").await;
        let err = RecordingApi::new()
            .add_tag(&app.db, &recording, 999, ())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn notes_are_attached_in_creation_order() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        let notes = NoteApi::new();
        let recording = app.create_recording("n.wav").await;
        let first = notes.create(&app.db, CreateNote::new("clipping")).await.unwrap();
        let second = notes.create(&app.db, CreateNote::new("wind")).await.unwrap();

        api.add_note(&app.db, &recording, second.id).await.unwrap();
        api.add_note(&app.db, &recording, first.id).await.unwrap();

        let attached = api.get_notes(&app.db, &recording).await.unwrap();
        let messages: Vec<_> = attached.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["clipping", "wind"]);

        api.remove_note(&app.db, &recording, first.id).await.unwrap();
        assert_eq!(api.get_notes(&app.db, &recording).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn feature_update_replaces_value() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        let recording = app.create_recording("f.wav").await;
        let snr = FeatureNameApi::new()
            .get_or_create(&app.db, "snr")
            .await
            .unwrap();

        api.update_feature(&app.db, &recording, snr.id, 3.5)
            .await
            .expect("update adds when absent");
        api.add_feature(&app.db, &recording, snr.id, 9.0)
            .await
            .expect("add on existing is a no-op");
        api.update_feature(&app.db, &recording, snr.id, 7.25)
            .await
            .expect("update in place");

        let features = api.get_features(&app.db, &recording).await.unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].name, "snr");
        assert_eq!(features[0].value, 7.25);

        api.remove_feature(&app.db, &recording, snr.id).await.unwrap();
        assert!(api.get_features(&app.db, &recording).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_cascades_links_but_keeps_tags() {
        let app = TestDb::spawn().await;
        let api = RecordingApi::new();
        let recording = app.create_recording("cascade.wav").await;
        let tag = app.create_tag("quality", "good").await;
        api.add_tag(&app.db, &recording, tag.id, ()).await.unwrap();

        api.delete(&app.db, &recording).await.expect("delete");

        let links = recording_tag::Entity::find().all(&app.db).await.unwrap();
        assert!(links.is_empty());
        let tag_row = tag::Entity::find_by_id(tag.id).one(&app.db).await.unwrap();
        assert!(tag_row.is_some());
    }
}
