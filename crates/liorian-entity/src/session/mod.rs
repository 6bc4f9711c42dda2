//! Client session records and derived state.

pub mod model;
pub mod state;

pub use model::SessionRecord;
pub use state::{SessionState, SessionStatus};
