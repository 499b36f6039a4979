//! Client configuration assembled from an optional TOML file and environment
//! variables.
use std::path::PathBuf;

use anyhow::Result;
use realm_content::{ConfigLoader, TileWorldConfig};
use realm_runtime::RuntimeConfig;

/// Everything the `realm` binary needs to start a session.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub tile_world: TileWorldConfig,
    pub runtime: RuntimeConfig,
    /// Log directory name; a timestamped one is generated when absent.
    pub session_id: Option<String>,
    /// File the tile world config was loaded from, if any.
    pub config_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REALM_CONFIG` - TOML file with world and density settings
    /// - `REALM_NAME`, `REALM_WIDTH`, `REALM_HEIGHT` - world overrides
    /// - `REALM_OBSTACLES`, `REALM_HOLES` - density overrides
    /// - `REALM_SEED` - fixed layout seed
    /// - `REALM_SESSION_ID` - log directory name
    /// - `REALM_COMMAND_BUFFER`, `REALM_EVENT_BUFFER` - runtime channel sizes
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();

        if let Some(path) = read("REALM_CONFIG") {
            let path = PathBuf::from(path);
            config.tile_world = ConfigLoader::load(&path)?;
            config.config_path = Some(path);
        }

        if let Some(name) = read("REALM_NAME") {
            config.tile_world.world.name = name;
        }
        if let Some(width) = parse(&read, "REALM_WIDTH") {
            config.tile_world.world.width = width;
        }
        if let Some(height) = parse(&read, "REALM_HEIGHT") {
            config.tile_world.world.height = height;
        }
        if let Some(obstacles) = parse(&read, "REALM_OBSTACLES") {
            config.tile_world.obstacles = obstacles;
        }
        if let Some(holes) = parse(&read, "REALM_HOLES") {
            config.tile_world.holes = holes;
        }
        if let Some(seed) = parse(&read, "REALM_SEED") {
            config.tile_world.seed = Some(seed);
        }
        if let Some(size) = parse::<usize>(&read, "REALM_COMMAND_BUFFER") {
            config.runtime.command_buffer_size = size.max(1);
        }
        if let Some(size) = parse::<usize>(&read, "REALM_EVENT_BUFFER") {
            config.runtime.event_buffer_size = size.max(1);
        }
        config.session_id = read("REALM_SESSION_ID");

        config.tile_world.validate()?;
        Ok(config)
    }
}

fn parse<T>(read: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = read(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable environment value");
            None
        }
    }
}
