use sea_orm::EntityTrait;
use serde_json::json;

use store::api::annotation_tasks::AnnotationTaskFilter;
use store::api::{
    AnnotationProjectApi, AnnotationTaskApi, ClipAnnotationApi, NoteApi, SoundEventAnnotationApi,
    SoundEventApi, UserApi,
};
use store::entity::{annotation_status_badge, clip_annotation, sound_event_annotation};
use store::models::{
    AnnotationState, CreateAnnotationProject, CreateNote, CreateSoundEvent,
    CreateSoundEventAnnotation, CreateUser, Geometry,
};

use crate::common::TestDb;

async fn project(app: &TestDb) -> store::models::AnnotationProject {
    AnnotationProjectApi::new()
        .create(&app.db, CreateAnnotationProject::new("survey", "Bat survey"))
        .await
        .expect("create project")
}

mod tasks {
    use super::*;

    #[tokio::test]
    async fn create_task_creates_its_clip_annotation() {
        let app = TestDb::spawn().await;
        let project = project(&app).await;
        let recording = app.create_recording("r.wav").await;
        let clip = app.create_clip(&recording, 0.0, 3.0).await;

        let task = AnnotationProjectApi::new()
            .add_task(&app.db, &project, &clip)
            .await
            .expect("add task");

        let annotation = ClipAnnotationApi::new()
            .get_by_id(&app.db, task.clip_annotation_id)
            .await
            .expect("clip annotation exists");
        assert_eq!(annotation.clip_id, clip.id);
        assert_eq!(task.annotation_project_id, project.id);
    }

    #[tokio::test]
    async fn second_task_for_same_clip_is_duplicate_and_leaves_no_orphan() {
        let app = TestDb::spawn().await;
        let api = AnnotationTaskApi::new();
        let project = project(&app).await;
        let recording = app.create_recording("r.wav").await;
        let clip = app.create_clip(&recording, 0.0, 3.0).await;

        api.create_task(&app.db, &project, &clip).await.unwrap();
        let err = api.create_task(&app.db, &project, &clip).await.unwrap_err();
        assert!(err.is_duplicate());

        let annotations = clip_annotation::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(annotations.len(), 1);
    }

    #[tokio::test]
    async fn create_tasks_skips_clips_already_in_project() {
        let app = TestDb::spawn().await;
        let api = AnnotationTaskApi::new();
        let project = project(&app).await;
        let recording = app.create_recording("r.wav").await;
        let a = app.create_clip(&recording, 0.0, 1.0).await;
        let b = app.create_clip(&recording, 1.0, 2.0).await;
        api.create_task(&app.db, &project, &a).await.unwrap();

        let created = api
            .create_tasks(&app.db, &project, &[a.clone(), b.clone(), b.clone()])
            .await
            .unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].clip_id, b.id);
    }

    #[tokio::test]
    async fn status_badges_are_idempotent_and_filterable() {
        let app = TestDb::spawn().await;
        let api = AnnotationTaskApi::new();
        let project = project(&app).await;
        let recording = app.create_recording("r.wav").await;
        let user = UserApi::new()
            .create(&app.db, CreateUser::new("ana"))
            .await
            .unwrap();
        let done = api
            .create_task(&app.db, &project, &app.create_clip(&recording, 0.0, 1.0).await)
            .await
            .unwrap();
        api.create_task(&app.db, &project, &app.create_clip(&recording, 1.0, 2.0).await)
            .await
            .unwrap();

        api.add_status_badge(&app.db, &done, AnnotationState::Completed, Some(user.id))
            .await
            .unwrap();
        api.add_status_badge(&app.db, &done, AnnotationState::Completed, Some(user.id))
            .await
            .expect("same badge twice is a no-op");
        api.add_status_badge(&app.db, &done, AnnotationState::Verified, None)
            .await
            .unwrap();

        let badges = api.get_status_badges(&app.db, &done).await.unwrap();
        let states: Vec<_> = badges.iter().map(|b| b.state).collect();
        assert_eq!(states, vec![AnnotationState::Completed, AnnotationState::Verified]);

        let filters = AnnotationTaskFilter {
            annotation_project_id: Some(project.id),
            state: Some(AnnotationState::Completed),
            ..Default::default()
        }
        .into_conditions();
        let (found, total) = api.get_many(&app.db, None, None, filters, None).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(found[0].uuid, done.uuid);

        api.remove_status_badge(&app.db, &done, AnnotationState::Verified, None)
            .await
            .unwrap();
        api.remove_status_badge(&app.db, &done, AnnotationState::Rejected, None)
            .await
            .expect("removing a missing badge is a no-op");
        assert_eq!(api.get_status_badges(&app.db, &done).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleting_project_removes_tasks_badges_and_annotations() {
        let app = TestDb::spawn().await;
        let projects = AnnotationProjectApi::new();
        let tasks = AnnotationTaskApi::new();
        let project = project(&app).await;
        let recording = app.create_recording("r.wav").await;
        let clip = app.create_clip(&recording, 0.0, 1.0).await;
        let task = projects.add_task(&app.db, &project, &clip).await.unwrap();
        tasks
            .add_status_badge(&app.db, &task, AnnotationState::Assigned, None)
            .await
            .unwrap();
        let tag = app.create_tag("label", "bat").await;
        projects.add_tag(&app.db, &project, tag.id, ()).await.unwrap();

        projects.delete(&app.db, &project).await.expect("delete project");

        assert!(tasks.get(&app.db, &task.uuid).await.unwrap_err().is_not_found());
        assert!(annotation_status_badge::Entity::find().all(&app.db).await.unwrap().is_empty());
        assert!(clip_annotation::Entity::find().all(&app.db).await.unwrap().is_empty());
    }
}

mod clip_annotations {
    use super::*;

    #[tokio::test]
    async fn tags_record_their_creator() {
        let app = TestDb::spawn().await;
        let project = project(&app).await;
        let recording = app.create_recording("r.wav").await;
        let clip = app.create_clip(&recording, 0.0, 1.0).await;
        let task = AnnotationTaskApi::new()
            .create_task(&app.db, &project, &clip)
            .await
            .unwrap();
        let api = ClipAnnotationApi::new();
        let annotation = api.get_by_id(&app.db, task.clip_annotation_id).await.unwrap();
        let user = UserApi::new()
            .create(&app.db, CreateUser::new("bo"))
            .await
            .unwrap();
        let tag = app.create_tag("species", "Myotis").await;

        api.add_tag(&app.db, &annotation, tag.id, Some(user.id)).await.unwrap();

        let links = store::entity::clip_annotation_tag::Entity::find()
            .all(&app.db)
            .await
            .unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].created_by_id, Some(user.id));
        assert_eq!(api.get_tags(&app.db, &annotation).await.unwrap()[0].id, tag.id);
    }

    #[tokio::test]
    async fn deleting_clip_annotation_removes_sound_event_annotations() {
        let app = TestDb::spawn().await;
        let recording = app.create_recording("r.wav").await;
        let clip = app.create_clip(&recording, 0.0, 1.0).await;
        let api = ClipAnnotationApi::new();
        let annotation = api
            .create(&app.db, store::models::CreateClipAnnotation::new(clip.id))
            .await
            .unwrap();
        let event = SoundEventApi::new()
            .create(
                &app.db,
                CreateSoundEvent::new(
                    recording.id,
                    Geometry::new("TimeInterval", json!([0.1, 0.4])),
                ),
            )
            .await
            .unwrap();
        let sea_api = SoundEventAnnotationApi::new();
        let sea = sea_api
            .create(
                &app.db,
                CreateSoundEventAnnotation::new(annotation.id, event.id),
            )
            .await
            .unwrap();
        let note = NoteApi::new()
            .create(&app.db, CreateNote::new("faint"))
            .await
            .unwrap();
        sea_api.add_note(&app.db, &sea, note.id).await.unwrap();
        let tag = app.create_tag("call", "echolocation").await;
        sea_api.add_tag(&app.db, &sea, tag.id, None).await.unwrap();

        api.delete(&app.db, &annotation).await.expect("delete");

        assert!(sound_event_annotation::Entity::find().all(&app.db).await.unwrap().is_empty());
        SoundEventApi::new()
            .get(&app.db, &event.uuid)
            .await
            .expect("sound event stays");
        NoteApi::new().get(&app.db, &note.uuid).await.expect("note stays");
    }
}
