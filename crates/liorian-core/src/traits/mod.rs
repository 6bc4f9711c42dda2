//! Core traits defined in `liorian-core` and implemented by other crates.

pub mod clock;
pub mod kv;
pub mod object;

pub use clock::{Clock, ManualClock, SystemClock};
pub use kv::{KeyValueStore, UpdateFn};
pub use object::{ObjectMeta, ObjectStore};
