use std::time::Duration;

use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::entity::{annotation_task, clip, model_run, tag};

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    // Set connection pool options
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(config.sqlx_logging);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("store::entity::*")
        .sync(&db)
        .await?;
    ensure_indexes(&db).await?;

    Ok(db)
}

/// Unique indexes backing the natural keys used by bulk deduplicated inserts.
fn natural_key_indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .if_not_exists()
            .unique()
            .name("uq_tag_key_value")
            .table(tag::Entity)
            .col(tag::Column::Key)
            .col(tag::Column::Value)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .unique()
            .name("uq_clip_recording_span")
            .table(clip::Entity)
            .col(clip::Column::RecordingId)
            .col(clip::Column::StartTime)
            .col(clip::Column::EndTime)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .unique()
            .name("uq_annotation_task_project_clip")
            .table(annotation_task::Entity)
            .col(annotation_task::Column::AnnotationProjectId)
            .col(annotation_task::Column::ClipId)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .unique()
            .name("uq_model_run_name_version")
            .table(model_run::Entity)
            .col(model_run::Column::Name)
            .col(model_run::Column::Version)
            .to_owned(),
    ]
}

/// Ensure required database indexes exist.
///
/// Schema sync only knows single-column uniqueness, so composite natural
/// keys are created here.
pub async fn ensure_indexes<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    for index in natural_key_indexes() {
        db.execute_raw(backend.build(&index)).await?;
    }
    info!("Ensured natural key indexes exist");

    Ok(())
}
