//! Role-based access control.

pub mod registry;

pub use registry::RoleRegistry;
