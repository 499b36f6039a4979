use crate::state::Thing;

/// Rule that applies when an actor moves into an occupied cell.
///
/// Variants are listed in precedence order; [`Interaction::between`] returns
/// the first one that matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interaction {
    Push,
    MutualDestruction,
    Destroys,
    DestroyedBy,
    Blocked,
}

impl Interaction {
    pub fn between(actor: &Thing, occupant: &Thing) -> Self {
        if actor.pushes(occupant) {
            return Self::Push;
        }
        match (actor.destroys(occupant), actor.is_destroyed_by(occupant)) {
            (true, true) => Self::MutualDestruction,
            (true, false) => Self::Destroys,
            (false, true) => Self::DestroyedBy,
            (false, false) => Self::Blocked,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::MutualDestruction => "mutual_destruction",
            Self::Destroys => "destroys",
            Self::DestroyedBy => "destroyed_by",
            Self::Blocked => "blocked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Position, ThingId, ThingSpec};

    fn thing(spec: ThingSpec) -> Thing {
        Thing::from_spec(ThingId(0), spec.glyph('x')).unwrap()
    }

    fn spec(kind: &str) -> ThingSpec {
        ThingSpec::new(kind, kind, Position::ORIGIN)
    }

    #[test]
    fn precedence_follows_rule_order() {
        let agent = thing(spec("agent").movable(true).destructible(true));
        let crate_ = thing(spec("crate").movable(true).destructible(true));
        let obstacle = thing(spec("obstacle"));
        let hole = thing(spec("hole").destroys(["agent"]));
        let brittle = thing(spec("brittle").destructible(true));
        let bomb = thing(
            spec("bomb")
                .movable(true)
                .destructible(true)
                .destroys(["agent"]),
        );
        let wrecker = thing(
            spec("agent")
                .movable(true)
                .destructible(true)
                .destroys(["brittle", "bomb"]),
        );

        assert_eq!(Interaction::between(&agent, &crate_), Interaction::Push);
        assert_eq!(Interaction::between(&wrecker, &bomb), Interaction::MutualDestruction);
        assert_eq!(Interaction::between(&wrecker, &brittle), Interaction::Destroys);
        assert_eq!(Interaction::between(&agent, &hole), Interaction::DestroyedBy);
        assert_eq!(Interaction::between(&agent, &obstacle), Interaction::Blocked);
    }
}
