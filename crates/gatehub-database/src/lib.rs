//! # gatehub-database
//!
//! The session repository seam — GateHub's view of the external
//! parameterized-query executor — plus a PostgreSQL implementation,
//! connection pool management, and schema bootstrap.

pub mod connection;
pub mod migration;
pub mod repository;

pub use connection::SessionDatabase;
pub use repository::{PgSessionRepository, SessionRepository};
