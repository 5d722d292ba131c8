pub mod associations;
pub mod base;
pub mod bulk;
mod cache;
pub mod utils;

pub use associations::{HasFeatures, HasNotes, HasTags};
pub use base::{BaseApi, HasId, NoUpdate, Resource};
pub use utils::{SortBy, UpdateSchema};
