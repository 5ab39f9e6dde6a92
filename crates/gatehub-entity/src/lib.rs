//! # gatehub-entity
//!
//! Domain entity models for GateHub. Every struct in this crate represents
//! a stored record or a domain value object. All entities derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`.

pub mod permission;
pub mod role;
pub mod session;

pub use permission::{Permission, Scope};
pub use role::Role;
pub use session::Session;
