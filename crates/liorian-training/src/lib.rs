//! # liorian-training
//!
//! Training records on the object store: progress snapshots, quiz results,
//! JSON and PDF reports, a connectivity probe and age-based cleanup.

pub mod keys;
pub mod store;

pub use store::{SavedObject, TrainingStore};
