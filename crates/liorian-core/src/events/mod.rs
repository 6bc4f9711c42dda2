//! Domain events emitted by Liorian operations.
//!
//! Content events are delivered to catalog subscribers; session events are
//! logged by the session manager and surfaced to CLI callers.

pub mod content;
pub mod session;

pub use content::{ContentCollection, ContentEvent};
pub use session::SessionEvent;
