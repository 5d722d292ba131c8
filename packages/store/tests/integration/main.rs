mod annotations;
mod cache;
mod clips;
mod common;
mod datasets;
mod evaluations;
mod predictions;
mod recordings;
mod tags;
