//! Thing kinds that populate a tile world.

use realm_core::{Color, Position, ThingSpec};

/// Closed set of kinds placed by the tile world generator.
///
/// Parsing is case-insensitive and the canonical label is lowercase, which is
/// what ends up in [`ThingSpec::kind`] and in destroy sets.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ThingKind {
    /// Player-controlled, pushes tiles, falls into holes.
    Agent,
    /// Static and indestructible.
    Obstacle,
    /// Static trap that swallows agents and tiles.
    Hole,
    /// Pushable block.
    Tile,
}

impl ThingKind {
    pub fn glyph(self) -> char {
        match self {
            Self::Agent => '@',
            Self::Obstacle => '#',
            Self::Hole => 'O',
            Self::Tile => '■',
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Hole => Color::rgb(0, 255, 0),
            Self::Agent | Self::Obstacle | Self::Tile => Color::WHITE,
        }
    }

    /// Capitalised label used when composing display names.
    pub fn title(self) -> &'static str {
        match self {
            Self::Agent => "Agent",
            Self::Obstacle => "Obstacle",
            Self::Hole => "Hole",
            Self::Tile => "Tile",
        }
    }

    /// Preset spec for this kind at `position`.
    pub fn spec(self, name: impl Into<String>, position: Position) -> ThingSpec {
        let spec = ThingSpec::new(self.as_ref(), name, position)
            .glyph(self.glyph())
            .color(self.color());
        match self {
            Self::Agent | Self::Tile => spec.movable(true).destructible(true),
            Self::Obstacle => spec,
            Self::Hole => spec.destroys([Self::Agent.as_ref(), Self::Tile.as_ref()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use realm_core::{ActionRequest, Outcome, World, WorldConfig};
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(ThingKind::from_str("HOLE").unwrap(), ThingKind::Hole);
        assert_eq!(ThingKind::from_str("Tile").unwrap(), ThingKind::Tile);
        assert!(ThingKind::from_str("tiles").is_err());
        assert_eq!(ThingKind::Obstacle.to_string(), "obstacle");
    }

    #[test]
    fn presets_are_valid_specs() {
        for kind in ThingKind::iter() {
            let spec = kind.spec(format!("Test{}", kind.title()), Position::ORIGIN);
            assert!(spec.validate().is_ok(), "{kind} preset invalid");
            assert_eq!(spec.kind, kind.as_ref());
        }
    }

    #[test]
    fn hole_swallows_pushed_tile() {
        let mut world = World::new(&WorldConfig::new("presets").with_size(5, 1)).unwrap();
        let agent = world
            .spawn(ThingKind::Agent.spec("A", Position::new(0, 0)))
            .unwrap();
        let tile = world
            .spawn(ThingKind::Tile.spec("T", Position::new(1, 0)))
            .unwrap();
        world
            .spawn(ThingKind::Hole.spec("H", Position::new(2, 0)))
            .unwrap();
        let obstacle = world
            .spawn(ThingKind::Obstacle.spec("O", Position::new(3, 0)))
            .unwrap();

        let outcome = world.resolve(&ActionRequest::move_by(agent, 1, 0)).unwrap();
        assert_eq!(outcome.outcome, Outcome::Succeeded);
        assert!(world.get(tile).is_none());

        // Agent walks into the hole next.
        let outcome = world.resolve(&ActionRequest::move_by(agent, 1, 0)).unwrap();
        assert!(matches!(outcome.outcome, Outcome::ActorDestroyed { .. }));
        assert!(world.get(obstacle).is_some());
    }
}
