use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use store::api::{ClipApi, RecordingApi, TagApi};
use store::config::DatabaseConfig;
use store::models::{Clip, CreateClip, CreateRecording, Recording, Tag};

/// A fresh SQLite database in its own temporary directory.
pub struct TestDb {
    pub db: DatabaseConnection,
    _dir: TempDir,
}

impl TestDb {
    pub async fn spawn() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let mut config = DatabaseConfig::new(url);
        config.max_connections = 1;
        let db = store::database::init_db(&config)
            .await
            .expect("Failed to initialize test database");
        Self { db, _dir: dir }
    }

    pub async fn create_recording(&self, path: &str) -> Recording {
        RecordingApi::new()
            .create(&self.db, CreateRecording::new(path, 60.0, 48_000, 1))
            .await
            .expect("Failed to create recording")
    }

    pub async fn create_tag(&self, key: &str, value: &str) -> Tag {
        TagApi::new()
            .get_or_create(&self.db, key, value)
            .await
            .expect("Failed to create tag")
    }

    pub async fn create_clip(&self, recording: &Recording, start: f64, end: f64) -> Clip {
        ClipApi::new()
            .create(&self.db, CreateClip::new(recording.id, start, end))
            .await
            .expect("Failed to create clip")
    }
}
