pub mod annotation_project;
pub mod annotation_task;
pub mod clip;
pub mod clip_annotation;
pub mod clip_prediction;
pub mod dataset;
pub mod evaluation;
pub mod feature;
pub mod model_run;
pub mod note;
pub mod recording;
pub mod shared;
pub mod sound_event;
pub mod sound_event_annotation;
pub mod sound_event_prediction;
pub mod tag;
pub mod user;

pub use annotation_project::*;
pub use annotation_task::*;
pub use clip::*;
pub use clip_annotation::*;
pub use clip_prediction::*;
pub use dataset::*;
pub use evaluation::*;
pub use feature::*;
pub use model_run::*;
pub use note::*;
pub use recording::*;
pub use sound_event::*;
pub use sound_event_annotation::*;
pub use sound_event_prediction::*;
pub use tag::*;
pub use user::*;
