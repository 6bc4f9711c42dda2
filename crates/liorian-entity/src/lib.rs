//! # liorian-entity
//!
//! Domain models shared by every Liorian crate: user roles and system users,
//! client session records, catalog entries, training records, and the
//! newsletter/application inbox.

pub mod content;
pub mod inbox;
pub mod session;
pub mod training;
pub mod user;

pub use content::{CatalogItem, Course, CourseStatus, Post, PostStatus, Service, ServiceStatus};
pub use inbox::{Application, NewsletterCampaign, NewsletterSubscriber};
pub use session::{SessionRecord, SessionState, SessionStatus};
pub use training::{ProgressRecord, QuizResult, TrainingReport, UserTrainingData};
pub use user::{SystemUser, UserProfile, UserStatus, UserType};
