//! # liorian-storage
//!
//! Storage backends for Liorian: string key-value stores standing in for
//! the browser storage areas, the [`SerializedStore`] actor that makes
//! read-modify-write sequences atomic, and blob stores for training data
//! (in-memory, and S3 behind the `s3` feature).

pub mod factory;
pub mod keys;
pub mod kv;
pub mod object;

pub use factory::{build_kv_store, build_object_store};
pub use kv::{FileKvStore, JsonList, MemoryKvStore, SerializedStore};
pub use object::MemoryObjectStore;
#[cfg(feature = "s3")]
pub use object::S3ObjectStore;
