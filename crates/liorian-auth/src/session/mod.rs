//! Client session management.
//!
//! A session lives in two storage areas: one shared by every window of the
//! browser profile and one private to the window. The manager keeps the role
//! token, the device pin and a redundant session record in them, and derives
//! [`SessionState`](liorian_entity::session::SessionState) from what it finds.

pub mod device;
pub mod manager;
pub mod tasks;

pub use device::generate_device_session_id;
pub use manager::{LogoutOutcome, SessionManager};
pub use tasks::BackgroundTasks;
