//! World configuration and validation.

use crate::error::{ErrorSeverity, RealmError};

/// Errors raised while validating configuration. Fatal to startup.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required attribute [{field}]")]
    Missing { field: &'static str },

    #[error("invalid attribute [{field}]: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl RealmError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "CONFIG_MISSING",
            Self::Invalid { .. } => "CONFIG_INVALID",
        }
    }
}

/// World construction parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Display name of the world.
    pub name: String,
    /// Number of cells in the horizontal direction.
    pub width: u32,
    /// Number of cells in the vertical direction.
    pub height: u32,
    /// Longest push chain the resolver follows. A push past it is blocked.
    pub max_cascade_depth: usize,
}

impl WorldConfig {
    pub const DEFAULT_WIDTH: u32 = 80;
    pub const DEFAULT_HEIGHT: u32 = 50;
    pub const DEFAULT_MAX_CASCADE_DEPTH: usize = 256;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_max_cascade_depth(mut self, depth: usize) -> Self {
        self.max_cascade_depth = depth;
        self
    }

    /// Total number of cells in the grid.
    pub fn cell_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Missing { field: "name" });
        }
        if self.width == 0 {
            return Err(ConfigError::invalid("width", "must be a positive integer"));
        }
        if self.height == 0 {
            return Err(ConfigError::invalid("height", "must be a positive integer"));
        }
        // Positions are i32; keep every cell addressable.
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(ConfigError::invalid(
                "width/height",
                format!("must not exceed {}", i32::MAX),
            ));
        }
        if self.max_cascade_depth == 0 {
            return Err(ConfigError::invalid(
                "max_cascade_depth",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: "realm".to_string(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            max_cascade_depth: Self::DEFAULT_MAX_CASCADE_DEPTH,
        }
    }
}
