//! Entity modules built on the generic CRUD facade in [`common`].

pub mod annotation_projects;
pub mod annotation_tasks;
pub mod clip_annotations;
pub mod clip_evaluations;
pub mod clip_predictions;
pub mod clips;
pub mod common;
pub mod datasets;
pub mod evaluations;
pub mod features;
pub mod model_runs;
pub mod notes;
pub mod recordings;
pub mod sound_event_annotations;
pub mod sound_event_evaluations;
pub mod sound_event_predictions;
pub mod sound_events;
pub mod tags;
pub mod users;

pub use annotation_projects::AnnotationProjectApi;
pub use annotation_tasks::AnnotationTaskApi;
pub use clip_annotations::ClipAnnotationApi;
pub use clip_evaluations::ClipEvaluationApi;
pub use clip_predictions::ClipPredictionApi;
pub use clips::ClipApi;
pub use datasets::DatasetApi;
pub use evaluations::EvaluationApi;
pub use features::FeatureNameApi;
pub use model_runs::ModelRunApi;
pub use notes::NoteApi;
pub use recordings::RecordingApi;
pub use sound_event_annotations::SoundEventAnnotationApi;
pub use sound_event_evaluations::SoundEventEvaluationApi;
pub use sound_event_predictions::SoundEventPredictionApi;
pub use sound_events::SoundEventApi;
pub use tags::TagApi;
pub use users::UserApi;
