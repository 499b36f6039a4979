use super::{Position, Thing, World, WorldId};

/// Owned, cloneable read model of a world at one instant.
///
/// Renderers and the runtime hand these out instead of borrowing the world.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    pub id: WorldId,
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Things in identifier order.
    pub things: Vec<Thing>,
}

impl WorldSnapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            id: world.id(),
            name: world.name().to_string(),
            width: world.width(),
            height: world.height(),
            things: world.things().cloned().collect(),
        }
    }

    pub fn locate(&self, position: Position) -> Option<&Thing> {
        self.things.iter().find(|thing| thing.position == position)
    }

    /// Row-major glyph grid, `None` for empty cells.
    pub fn glyph_rows(&self) -> Vec<Vec<Option<&Thing>>> {
        let mut rows = vec![vec![None; self.width as usize]; self.height as usize];
        // Reverse so the lowest identifier wins a shared cell, like `locate`.
        for thing in self.things.iter().rev() {
            let (x, y) = (thing.position.x, thing.position.y);
            if x < 0 || y < 0 {
                continue;
            }
            if let Some(cell) = rows
                .get_mut(y as usize)
                .and_then(|row| row.get_mut(x as usize))
            {
                *cell = Some(thing);
            }
        }
        rows
    }
}
