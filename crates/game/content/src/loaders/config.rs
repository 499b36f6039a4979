//! Tile world configuration loader.

use std::path::Path;

use crate::TileWorldConfig;
use crate::loaders::{LoadResult, read_file};

/// Loader for tile world configuration from TOML files.
///
/// Missing keys fall back to their defaults. World keys (`name`, `width`,
/// `height`, `max_cascade_depth`) sit at the top level next to the densities:
///
/// ```toml
/// name = "sandbox"
/// width = 40
/// height = 20
/// obstacles = 0.05
/// holes = 0.01
/// seed = 7
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<TileWorldConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse and validate config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<TileWorldConfig> {
        let config: TileWorldConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}
