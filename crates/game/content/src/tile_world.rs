//! Procedural tile world generation.
//!
//! A tile world has one agent in the centre plus obstacles, holes and tiles
//! scattered at configured densities of the cell count.

use rand::Rng;
use realm_core::{
    ConfigError, ErrorSeverity, Position, RealmError, StateError, ThingId, World, WorldConfig,
};

use crate::{ThingKind, names};

/// Tile world parameters on top of the base [`WorldConfig`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TileWorldConfig {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub world: WorldConfig,
    /// Fraction of cells holding an obstacle, in `[0, 1)`.
    pub obstacles: f64,
    /// Fraction of cells holding a hole, in `[0, 1)`.
    pub holes: f64,
    /// Fraction of cells holding a tile. Defaults to the hole density.
    pub tiles: Option<f64>,
    /// Seed for reproducible layouts. Entropy is used when absent.
    pub seed: Option<u64>,
}

impl TileWorldConfig {
    pub const DEFAULT_OBSTACLES: f64 = 0.01;
    pub const DEFAULT_HOLES: f64 = 0.001;

    pub fn new(world: WorldConfig) -> Self {
        Self {
            world,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_densities(mut self, obstacles: f64, holes: f64) -> Self {
        self.obstacles = obstacles;
        self.holes = holes;
        self
    }

    #[must_use]
    pub fn with_tiles(mut self, tiles: f64) -> Self {
        self.tiles = Some(tiles);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn tile_density(&self) -> f64 {
        self.tiles.unwrap_or(self.holes)
    }

    /// Number of things of `kind` the generator places.
    pub fn population(&self, kind: ThingKind) -> u64 {
        let density = match kind {
            ThingKind::Agent => return 1,
            ThingKind::Obstacle => self.obstacles,
            ThingKind::Hole => self.holes,
            ThingKind::Tile => self.tile_density(),
        };
        (density * self.world.cell_count() as f64).floor() as u64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        check_density("obstacles", self.obstacles)?;
        check_density("holes", self.holes)?;
        check_density("tiles", self.tile_density())?;

        let total = self.obstacles + self.holes + self.tile_density();
        if total >= 1.0 {
            return Err(ConfigError::invalid(
                "obstacles/holes/tiles",
                format!("densities must sum to less than 1 (got {total})"),
            ));
        }

        let placed = [ThingKind::Obstacle, ThingKind::Hole, ThingKind::Tile]
            .into_iter()
            .map(|kind| self.population(kind))
            .sum::<u64>();
        if placed >= self.world.cell_count() {
            return Err(ConfigError::invalid(
                "obstacles/holes/tiles",
                format!(
                    "{placed} things leave no free cell for the agent in a {}x{} world",
                    self.world.width, self.world.height
                ),
            ));
        }
        Ok(())
    }
}

impl Default for TileWorldConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            obstacles: Self::DEFAULT_OBSTACLES,
            holes: Self::DEFAULT_HOLES,
            tiles: None,
            seed: None,
        }
    }
}

fn check_density(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("density must be in [0, 1) (got {value})"),
        ))
    }
}

/// Errors raised while building a tile world.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl RealmError for GenerateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(err) => err.severity(),
            Self::State(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(err) => err.error_code(),
            Self::State(err) => err.error_code(),
        }
    }
}

/// Freshly generated world with a handle on its agent.
#[derive(Debug)]
pub struct TileWorld {
    pub world: World,
    pub agent: ThingId,
}

/// Builds tile worlds from a validated config and an injected RNG.
pub struct TileWorldGenerator<'a> {
    config: &'a TileWorldConfig,
}

impl<'a> TileWorldGenerator<'a> {
    pub fn new(config: &'a TileWorldConfig) -> Self {
        Self { config }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TileWorld, GenerateError> {
        self.config.validate()?;
        let mut world = World::new(&self.config.world)?;
        let agent = self.populate(&mut world, rng)?;
        Ok(TileWorld { world, agent })
    }

    /// Places the agent and every scattered kind into an empty `world`.
    fn populate<R: Rng + ?Sized>(
        &self,
        world: &mut World,
        rng: &mut R,
    ) -> Result<ThingId, GenerateError> {
        let centre = Position::new((world.width() / 2) as i32, (world.height() / 2) as i32);
        let name = names::random_name(rng, ThingKind::Agent);
        let agent = world.spawn(ThingKind::Agent.spec(name, centre))?;

        for kind in [ThingKind::Obstacle, ThingKind::Hole, ThingKind::Tile] {
            let count = self.config.population(kind);
            self.scatter(world, rng, kind, count)?;
            tracing::info!(world = %world.name(), kind = %kind, count, "scattered");
        }
        Ok(agent)
    }

    fn scatter<R: Rng + ?Sized>(
        &self,
        world: &mut World,
        rng: &mut R,
        kind: ThingKind,
        count: u64,
    ) -> Result<(), GenerateError> {
        let (width, height) = (world.width() as i32, world.height() as i32);
        let mut placed = 0;
        while placed < count {
            let position = Position::new(rng.gen_range(0..width), rng.gen_range(0..height));
            if world.locate(position).is_some() {
                continue;
            }
            let name = names::random_name(rng, kind);
            world.spawn(kind.spec(name, position))?;
            placed += 1;
        }
        Ok(())
    }
}
