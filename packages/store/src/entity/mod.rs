pub mod annotation_project;
pub mod annotation_project_tag;
pub mod annotation_status_badge;
pub mod annotation_task;
pub mod clip;
pub mod clip_annotation;
pub mod clip_annotation_note;
pub mod clip_annotation_tag;
pub mod clip_evaluation;
pub mod clip_evaluation_feature;
pub mod clip_feature;
pub mod clip_prediction;
pub mod clip_prediction_tag;
pub mod dataset;
pub mod dataset_recording;
pub mod evaluation;
pub mod evaluation_feature;
pub mod feature_name;
pub mod model_run;
pub mod model_run_clip_prediction;
pub mod note;
pub mod recording;
pub mod recording_feature;
pub mod recording_note;
pub mod recording_tag;
pub mod sound_event;
pub mod sound_event_annotation;
pub mod sound_event_annotation_note;
pub mod sound_event_annotation_tag;
pub mod sound_event_evaluation;
pub mod sound_event_evaluation_feature;
pub mod sound_event_feature;
pub mod sound_event_prediction;
pub mod sound_event_prediction_tag;
pub mod tag;
pub mod user;
