//! # gatehub-core
//!
//! Core crate for GateHub. Contains configuration schemas, the duration
//! parser, logging setup, and the unified error system.
//!
//! This crate has **no** internal dependencies on other GateHub crates.

pub mod config;
pub mod duration;
pub mod error;
pub mod logging;
pub mod result;

pub use duration::parse_duration;
pub use logging::init_logging;
pub use error::{AppError, ErrorKind};
pub use result::AppResult;
