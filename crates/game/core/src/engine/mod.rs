//! Action resolution.
//!
//! The [`Resolver`] turns one [`ActionRequest`] plus the current world into
//! exactly one terminal [`Outcome`], mutating the registry and notifying
//! subscribers along the way. Pushes cascade by resolving a derived request
//! for the occupant before the original actor moves.

mod errors;
mod interaction;

pub use errors::ResolveError;
pub use interaction::Interaction;

use crate::action::{ActionKind, ActionRequest, RequestId};
use crate::events::{NotAllowedReason, Outcome, OutcomeEvent};
use crate::state::{ThingId, World};

/// Applies interaction rules to a borrowed world.
pub struct Resolver<'a> {
    world: &'a mut World,
}

impl<'a> Resolver<'a> {
    pub fn new(world: &'a mut World) -> Self {
        Self { world }
    }

    /// Resolves `request` and every request its pushes cascade into.
    ///
    /// Returns the outcome of `request` itself. Cascaded outcomes are only
    /// visible to outcome subscribers.
    pub fn resolve(&mut self, request: &ActionRequest) -> Result<OutcomeEvent, ResolveError> {
        self.resolve_at(request, None, 0)
    }

    fn resolve_at(
        &mut self,
        request: &ActionRequest,
        cause: Option<RequestId>,
        depth: usize,
    ) -> Result<OutcomeEvent, ResolveError> {
        let id = self.world.next_request_id();
        if self.world.get(request.actor).is_none() {
            return Err(ResolveError::ActorNotFound {
                actor: request.actor,
                request: id,
            });
        }

        let outcome = match request.kind {
            ActionKind::Move { dx, dy } => self.resolve_move(id, request.actor, dx, dy, depth)?,
        };

        let event = OutcomeEvent {
            request: id,
            cause,
            actor: request.actor,
            outcome,
        };
        tracing::debug!(
            request = %id,
            cause = ?cause,
            actor = %request.actor,
            outcome = outcome.as_str(),
            "request resolved"
        );
        self.world.publish_outcome(&event);
        Ok(event)
    }

    fn resolve_move(
        &mut self,
        id: RequestId,
        actor: ThingId,
        dx: i32,
        dy: i32,
        depth: usize,
    ) -> Result<Outcome, ResolveError> {
        let Some(current) = self.world.get(actor) else {
            return Err(ResolveError::ActorNotFound { actor, request: id });
        };
        if !current.can_move() {
            return Ok(not_allowed(NotAllowedReason::Immovable));
        }
        if dx == 0 && dy == 0 {
            return Ok(not_allowed(NotAllowedReason::ZeroDelta));
        }

        let destination = current.position.offset(dx, dy);
        if !self.world.contains(destination) {
            return Ok(not_allowed(NotAllowedReason::OutOfBounds { destination }));
        }

        let Some(occupant) = self.world.locate(destination) else {
            self.world.relocate(actor, destination, id)?;
            return Ok(Outcome::Succeeded);
        };
        let occupant_id = occupant.id;
        let interaction = Interaction::between(current, occupant);
        tracing::debug!(
            request = %id,
            actor = %actor,
            occupant = %occupant_id,
            interaction = interaction.as_str(),
            "destination occupied"
        );

        match interaction {
            Interaction::Push if depth >= self.world.max_cascade_depth() => {
                tracing::debug!(
                    request = %id,
                    depth,
                    "push chain reached the cascade limit"
                );
                Ok(Outcome::Blocked {
                    blocked_by: occupant_id,
                })
            }
            Interaction::Push => {
                let cascade = ActionRequest::move_by(occupant_id, dx, dy);
                self.resolve_at(&cascade, Some(id), depth + 1)?;
                match self.world.locate(destination) {
                    None => {
                        self.world.relocate(actor, destination, id)?;
                        Ok(Outcome::Succeeded)
                    }
                    Some(blocker) => Ok(Outcome::Blocked {
                        blocked_by: blocker.id,
                    }),
                }
            }
            Interaction::MutualDestruction => {
                self.world.destroy(actor, id)?;
                self.world.destroy(occupant_id, id)?;
                Ok(Outcome::ActorDestroyed {
                    destroyed_by: occupant_id,
                })
            }
            Interaction::Destroys => {
                self.world.destroy(occupant_id, id)?;
                self.world.relocate(actor, destination, id)?;
                Ok(Outcome::Succeeded)
            }
            Interaction::DestroyedBy => {
                self.world.destroy(actor, id)?;
                Ok(Outcome::ActorDestroyed {
                    destroyed_by: occupant_id,
                })
            }
            Interaction::Blocked => Ok(Outcome::Blocked {
                blocked_by: occupant_id,
            }),
        }
    }
}

fn not_allowed(reason: NotAllowedReason) -> Outcome {
    Outcome::NotAllowed { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::events::{Change, ChangeEvent, EventLog};
    use crate::state::{Position, ThingSpec};

    struct Harness {
        world: World,
        outcomes: EventLog<OutcomeEvent>,
        changes: EventLog<ChangeEvent>,
    }

    impl Harness {
        fn new(width: u32, height: u32) -> Self {
            Self::with_config(WorldConfig::new("resolver").with_size(width, height))
        }

        fn with_config(config: WorldConfig) -> Self {
            let mut world = World::new(&config).unwrap();
            let outcomes = EventLog::new();
            let changes = EventLog::new();
            world.subscribe_outcomes(outcomes.clone());
            world.subscribe_changes(changes.clone());
            Self {
                world,
                outcomes,
                changes,
            }
        }

        fn spawn(&mut self, spec: ThingSpec) -> ThingId {
            self.world.spawn(spec).unwrap()
        }

        fn move_by(&mut self, actor: ThingId, dx: i32, dy: i32) -> Outcome {
            self.world
                .resolve(&ActionRequest::move_by(actor, dx, dy))
                .unwrap()
                .outcome
        }

        fn position(&self, id: ThingId) -> Option<Position> {
            self.world.get(id).map(|thing| thing.position)
        }
    }

    fn at(kind: &str, x: i32, y: i32) -> ThingSpec {
        ThingSpec::new(kind, kind, Position::new(x, y)).glyph('x')
    }

    fn agent(x: i32, y: i32) -> ThingSpec {
        at("agent", x, y).movable(true).destructible(true)
    }

    fn obstacle(x: i32, y: i32) -> ThingSpec {
        at("obstacle", x, y)
    }

    fn tile(x: i32, y: i32) -> ThingSpec {
        at("tile", x, y).movable(true).destructible(true)
    }

    fn hole(x: i32, y: i32) -> ThingSpec {
        at("hole", x, y).destroys(["agent", "tile"])
    }

    #[test]
    fn move_into_empty_cell_succeeds() {
        let mut h = Harness::new(10, 10);
        let a = h.spawn(agent(5, 5));

        assert_eq!(h.move_by(a, 2, -3), Outcome::Succeeded);
        assert_eq!(h.position(a), Some(Position::new(7, 2)));
        assert_eq!(
            h.changes.drain(),
            vec![ChangeEvent {
                request: RequestId(0),
                change: Change::Moved {
                    thing: a,
                    from: Position::new(5, 5),
                    to: Position::new(7, 2),
                },
            }]
        );
    }

    #[test]
    fn immovable_actor_is_not_allowed() {
        let mut h = Harness::new(10, 10);
        let rock = h.spawn(obstacle(5, 5));

        assert_eq!(
            h.move_by(rock, 1, 0),
            Outcome::NotAllowed {
                reason: NotAllowedReason::Immovable
            }
        );
        assert_eq!(h.position(rock), Some(Position::new(5, 5)));
        assert!(h.changes.is_empty());
    }

    #[test]
    fn zero_delta_is_not_allowed() {
        let mut h = Harness::new(10, 10);
        let a = h.spawn(agent(5, 5));

        assert_eq!(
            h.move_by(a, 0, 0),
            Outcome::NotAllowed {
                reason: NotAllowedReason::ZeroDelta
            }
        );
        assert!(h.changes.is_empty());
    }

    #[test]
    fn leaving_the_grid_is_not_allowed() {
        let mut h = Harness::new(10, 10);
        let a = h.spawn(agent(0, 9));

        for (dx, dy) in [(-1, 0), (0, 1), (i32::MAX, 0), (i32::MIN, i32::MIN)] {
            assert!(matches!(
                h.move_by(a, dx, dy),
                Outcome::NotAllowed {
                    reason: NotAllowedReason::OutOfBounds { .. }
                }
            ));
        }
        assert_eq!(h.position(a), Some(Position::new(0, 9)));
    }

    #[test]
    fn static_indestructible_obstacle_blocks() {
        let mut h = Harness::new(10, 10);
        let a = h.spawn(agent(5, 5));
        let rock = h.spawn(obstacle(6, 5));

        assert_eq!(h.move_by(a, 1, 0), Outcome::Blocked { blocked_by: rock });
        assert_eq!(h.position(a), Some(Position::new(5, 5)));
        assert_eq!(h.position(rock), Some(Position::new(6, 5)));
        assert!(h.changes.is_empty());
    }

    #[test]
    fn actor_destroys_occupant_and_moves_in() {
        let mut h = Harness::new(10, 10);
        let a = h.spawn(agent(5, 5).destroys(["obstacle"]));
        let rock = h.spawn(obstacle(6, 5).destructible(true));

        assert_eq!(h.move_by(a, 1, 0), Outcome::Succeeded);
        assert_eq!(h.position(a), Some(Position::new(6, 5)));
        assert!(h.world.get(rock).is_none());

        let changes: Vec<Change> = h.changes.drain().into_iter().map(|e| e.change).collect();
        assert_eq!(
            changes,
            vec![
                Change::Removed {
                    thing: rock,
                    position: Position::new(6, 5)
                },
                Change::Moved {
                    thing: a,
                    from: Position::new(5, 5),
                    to: Position::new(6, 5)
                },
            ]
        );
    }

    #[test]
    fn push_moves_occupant_then_actor() {
        let mut h = Harness::new(10, 10);
        let a = h.spawn(agent(5, 5));
        let block = h.spawn(tile(6, 5));

        assert_eq!(h.move_by(a, 1, 0), Outcome::Succeeded);
        assert_eq!(h.position(block), Some(Position::new(7, 5)));
        assert_eq!(h.position(a), Some(Position::new(6, 5)));

        let outcomes = h.outcomes.drain();
        assert_eq!(outcomes.len(), 2);
        let (cascade, original) = (outcomes[0], outcomes[1]);
        assert_eq!(cascade.actor, block);
        assert_eq!(cascade.outcome, Outcome::Succeeded);
        assert_eq!(cascade.cause, Some(original.request));
        assert_eq!(original.actor, a);
        assert_eq!(original.cause, None);
        assert_ne!(cascade.request, original.request);
    }

    #[test]
    fn push_chain_cascades_through_every_occupant() {
        let mut h = Harness::new(10, 3);
        let a = h.spawn(agent(1, 1));
        let tiles: Vec<ThingId> = (2..5).map(|x| h.spawn(tile(x, 1))).collect();

        assert_eq!(h.move_by(a, 1, 0), Outcome::Succeeded);
        for (offset, id) in tiles.iter().enumerate() {
            assert_eq!(h.position(*id), Some(Position::new(3 + offset as i32, 1)));
        }
        assert_eq!(h.outcomes.len(), 4);
    }

    #[test]
    fn failed_cascade_blocks_the_actor() {
        let mut h = Harness::new(10, 10);
        let a = h.spawn(agent(5, 5));
        let block = h.spawn(tile(6, 5));
        h.spawn(obstacle(7, 5));

        assert_eq!(h.move_by(a, 1, 0), Outcome::Blocked { blocked_by: block });
        assert_eq!(h.position(a), Some(Position::new(5, 5)));
        assert_eq!(h.position(block), Some(Position::new(6, 5)));
        assert!(h.changes.is_empty());

        let outcomes = h.outcomes.drain();
        assert!(matches!(outcomes[0].outcome, Outcome::Blocked { .. }));
        assert_eq!(outcomes[0].actor, block);
    }

    #[test]
    fn push_against_the_edge_blocks() {
        let mut h = Harness::new(3, 1);
        let a = h.spawn(agent(1, 0));
        let block = h.spawn(tile(2, 0));

        assert_eq!(h.move_by(a, 1, 0), Outcome::Blocked { blocked_by: block });
        let cascade = h.outcomes.drain()[0];
        assert!(matches!(
            cascade.outcome,
            Outcome::NotAllowed {
                reason: NotAllowedReason::OutOfBounds { .. }
            }
        ));
    }

    #[test]
    fn tile_pushed_into_hole_is_destroyed_and_actor_moves() {
        let mut h = Harness::new(10, 10);
        let a = h.spawn(agent(5, 5));
        let block = h.spawn(tile(6, 5));
        let pit = h.spawn(hole(7, 5));

        assert_eq!(h.move_by(a, 1, 0), Outcome::Succeeded);
        assert!(h.world.get(block).is_none());
        assert_eq!(h.position(a), Some(Position::new(6, 5)));
        assert_eq!(h.position(pit), Some(Position::new(7, 5)));

        let cascade = h.outcomes.drain()[0];
        assert_eq!(cascade.outcome, Outcome::ActorDestroyed { destroyed_by: pit });
    }

    #[test]
    fn occupant_destroys_actor() {
        let mut h = Harness::new(10, 10);
        let a = h.spawn(agent(5, 5));
        let pit = h.spawn(hole(6, 5));

        assert_eq!(h.move_by(a, 1, 0), Outcome::ActorDestroyed { destroyed_by: pit });
        assert!(h.world.get(a).is_none());
        assert_eq!(h.position(pit), Some(Position::new(6, 5)));
        assert_eq!(
            h.changes.drain()[0].change,
            Change::Removed {
                thing: a,
                position: Position::new(5, 5)
            }
        );
    }

    #[test]
    fn mutual_destruction_removes_both() {
        let mut h = Harness::new(10, 10);
        let a = h.spawn(agent(5, 5).destroys(["bomb"]));
        let bomb = h.spawn(at("bomb", 6, 5).destructible(true).destroys(["agent"]));

        assert_eq!(h.move_by(a, 1, 0), Outcome::ActorDestroyed { destroyed_by: bomb });
        assert!(h.world.is_empty());
        assert_eq!(h.changes.len(), 2);

        for id in [a, bomb] {
            assert!(matches!(
                h.world.resolve(&ActionRequest::move_by(id, 0, 1)),
                Err(ResolveError::ActorNotFound { actor, .. }) if actor == id
            ));
        }
    }

    #[test]
    fn unknown_actor_is_fatal_and_silent() {
        let mut h = Harness::new(10, 10);

        let err = h
            .world
            .resolve(&ActionRequest::move_by(ThingId(42), 1, 0))
            .unwrap_err();
        assert!(matches!(err, ResolveError::ActorNotFound { .. }));
        assert!(h.outcomes.is_empty());
        assert!(h.changes.is_empty());
    }

    #[test]
    fn cascade_limit_blocks_the_chain_without_mutation() {
        let config = WorldConfig::new("deep")
            .with_size(10, 1)
            .with_max_cascade_depth(2);
        let mut h = Harness::with_config(config);
        let a = h.spawn(agent(0, 0));
        let tiles: Vec<_> = (1..=3).map(|x| h.spawn(tile(x, 0))).collect();
        let before = h.world.snapshot();

        assert_eq!(
            h.move_by(a, 1, 0),
            Outcome::Blocked {
                blocked_by: tiles[0]
            }
        );

        let outcomes = h.outcomes.drain();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].actor, tiles[1]);
        assert_eq!(
            outcomes[0].outcome,
            Outcome::Blocked {
                blocked_by: tiles[2]
            }
        );
        assert_eq!(h.world.snapshot(), before);
        assert!(h.changes.is_empty());
    }

    #[test]
    fn chain_longer_than_default_limit_yields_an_outcome() {
        let limit = WorldConfig::DEFAULT_MAX_CASCADE_DEPTH as i32;
        let mut h = Harness::new(300, 1);
        let a = h.spawn(agent(0, 0));
        for x in 1..=limit + 1 {
            h.spawn(tile(x, 0));
        }
        let before = h.world.snapshot();

        let event = h
            .world
            .resolve(&ActionRequest::move_by(a, 1, 0))
            .unwrap();

        assert!(matches!(event.outcome, Outcome::Blocked { .. }));
        assert_eq!(h.world.snapshot(), before);
        assert!(h.changes.is_empty());
    }

    #[test]
    fn raised_limit_lets_a_long_chain_through() {
        let config = WorldConfig::new("long")
            .with_size(300, 1)
            .with_max_cascade_depth(300);
        let mut h = Harness::with_config(config);
        let a = h.spawn(agent(0, 0));
        let last = (1..=257).map(|x| h.spawn(tile(x, 0))).last().unwrap();

        assert_eq!(h.move_by(a, 1, 0), Outcome::Succeeded);
        assert_eq!(h.position(a), Some(Position::new(1, 0)));
        assert_eq!(h.position(last), Some(Position::new(258, 0)));
    }

    #[test]
    fn cascade_within_depth_limit_succeeds() {
        let config = WorldConfig::new("deep")
            .with_size(10, 1)
            .with_max_cascade_depth(2);
        let mut h = Harness::with_config(config);
        let a = h.spawn(agent(0, 0));
        h.spawn(tile(1, 0));
        h.spawn(tile(2, 0));

        assert_eq!(h.move_by(a, 1, 0), Outcome::Succeeded);
    }

    #[test]
    fn request_ids_are_monotonic() {
        let mut h = Harness::new(10, 10);
        let a = h.spawn(agent(0, 0));

        let first = h.world.resolve(&ActionRequest::move_by(a, 1, 0)).unwrap();
        let second = h.world.resolve(&ActionRequest::move_by(a, 1, 0)).unwrap();
        assert!(second.request > first.request);
    }

    #[test]
    fn exactly_one_outcome_per_request_without_cascades() {
        let mut h = Harness::new(5, 5);
        let a = h.spawn(agent(2, 2));
        h.spawn(obstacle(3, 2));

        for (dx, dy) in [(1, 0), (0, 1), (0, 0), (-9, 0), (-1, 0)] {
            h.move_by(a, dx, dy);
            assert_eq!(h.outcomes.drain().len(), 1);
        }
    }
}
