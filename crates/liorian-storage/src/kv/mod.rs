//! Key-value store implementations.

pub mod file;
pub mod list;
pub mod memory;
pub mod serialized;

pub use file::FileKvStore;
pub use list::JsonList;
pub use memory::MemoryKvStore;
pub use serialized::SerializedStore;
