//! Tile world content for the realm engine.
//!
//! This crate houses the kind presets placed in a tile world, random naming,
//! the procedural generator and (behind the default `loaders` feature) the
//! TOML configuration loader.

pub mod kinds;
pub mod names;
pub mod tile_world;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use kinds::ThingKind;
pub use tile_world::{GenerateError, TileWorld, TileWorldConfig, TileWorldGenerator};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult};
