//! Session and authorization state for the storefront API client.
//!
//! # Overview
//!
//! - [`Session`]: a bearer [`AccessToken`] paired with the [`User`] it belongs to
//! - [`SessionStore`]: the single owner of the current session
//! - [`CredentialStorage`]: durable medium the store persists to
//!   ([`MemoryStorage`], [`FileStorage`])
//! - [`CapabilityGate`]: client-side checks used before privileged calls
//!
//! # Lifecycle
//!
//! A session is created by a successful login or registration, has its user
//! replaced on a profile update, and is destroyed on logout or when an
//! authenticated request is rejected with 401.
//!
//! # Example
//!
//! ```rust
//! use storefront_api::auth::{FileStorage, SessionStore};
//!
//! let path = std::env::temp_dir().join("storefront-api-doc-session.json");
//! let store = SessionStore::with_storage(FileStorage::open(&path).unwrap());
//! assert!(!store.is_authenticated());
//! ```

mod capability;
pub mod session;
pub mod storage;
mod store;

pub use capability::{CapabilityGate, ADMIN_REQUIRED};
pub use session::{AccessToken, Role, Session, User};
pub use storage::{CredentialStorage, FileStorage, MemoryStorage, StorageError};
pub use store::SessionStore;
