//! # gatehub-auth
//!
//! Session storage, signed-token issuance/validation, and role-based
//! access control for GateHub.
//!
//! ## Modules
//!
//! - `token` — signed session-token issuance and verification
//! - `session` — session store variants (memory, persistent) and cleanup
//! - `rbac` — role registry with inheritance and permission resolution
//! - `system` — the auth facade composing the above
//!
//! Nothing in this crate holds global state: construct an
//! [`AuthSystem`] once at process start and inject it where needed.

pub mod rbac;
pub mod session;
pub mod system;
pub mod token;

pub use rbac::RoleRegistry;
pub use session::{
    MemorySessionStore, PersistentSessionStore, SessionCleanup, SessionStore, build_session_store,
};
pub use system::AuthSystem;
pub use token::{TokenClaims, TokenManager};
