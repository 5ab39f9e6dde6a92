//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod auth;
pub mod database;
pub mod logging;
pub mod rbac;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::auth::{AuthConfig, TokenAlgorithm};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::rbac::{RbacConfig, RoleConfig};
pub use self::session::{
    MemorySessionConfig, PersistentSessionConfig, SessionConfig, SessionStrategy,
};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Token issuance and validation settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session storage settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Role-based access control settings.
    #[serde(default)]
    pub rbac: RbacConfig,
    /// Database connection settings (persistent strategy only).
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `GATEHUB`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("GATEHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
