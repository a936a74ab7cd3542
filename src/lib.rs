#![doc = include_str!("../README.md")]

pub mod cookies;
pub mod error;
pub mod guard;
pub mod models;
pub mod session;
pub mod types;
pub mod views;

#[cfg(feature = "client")]
pub mod api;
#[cfg(feature = "web")]
pub mod middleware;

// Re-exports for convenient access
pub use error::Error;
pub use guard::{GuardDecision, PathClass, classify, evaluate};
pub use session::{Anonymous, FileSlot, MemorySlot, SessionSlot, SessionSource, SessionStore};
pub use types::{Role, SessionRecord, UserId};

#[cfg(feature = "client")]
pub use api::{ApiClient, ApiError, NewAccount};
