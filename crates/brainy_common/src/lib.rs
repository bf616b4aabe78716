//! Brainy Common - Core library for the Brainy Tutor client.
//!
//! Holds everything presentation does not: the session state machine,
//! response normalization, the API client seam, and the saved-query vault.

pub mod api;
pub mod config;
pub mod error;
pub mod normalize;
pub mod query;
pub mod section;
pub mod session;
pub mod vault;

pub use api::{FakeTutorClient, HttpTutorClient, TutorApi};
pub use config::TutorConfig;
pub use error::TutorError;
pub use normalize::normalize;
pub use query::{Query, ResponseMode, DEFAULT_PROFILE};
pub use section::{ResponseBundle, Section, SectionKind, SectionPayload};
pub use session::{Phase, SessionController, SessionState, SubmitToken};
pub use vault::{SavedQuery, VaultStore};
