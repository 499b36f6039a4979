use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use super::{Position, StateError, Thing, ThingId, ThingSpec, WorldSnapshot};
use crate::action::{ActionRequest, RequestId};
use crate::config::{ConfigError, WorldConfig};
use crate::engine::{ResolveError, Resolver};
use crate::events::{Change, ChangeEvent, Channel, OutcomeEvent, Subscriber, SubscriptionId};

static NEXT_WORLD_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identifier of a world instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldId(pub u32);

impl WorldId {
    fn allocate() -> Self {
        Self(NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "world-{}", self.0)
    }
}

/// Bounded grid that owns every thing and its notification channels.
///
/// Things are kept in identifier order, so positional scans are
/// deterministic. All mutation goes through [`World::add`],
/// [`World::remove`], [`World::spawn`] and [`World::resolve`].
#[derive(Debug)]
pub struct World {
    id: WorldId,
    name: String,
    width: u32,
    height: u32,
    max_cascade_depth: usize,
    things: BTreeMap<ThingId, Thing>,
    next_thing_id: ThingId,
    next_request_id: RequestId,
    outcomes: Channel<OutcomeEvent>,
    changes: Channel<ChangeEvent>,
}

impl World {
    pub fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = Self {
            id: WorldId::allocate(),
            name: config.name.clone(),
            width: config.width,
            height: config.height,
            max_cascade_depth: config.max_cascade_depth,
            things: BTreeMap::new(),
            next_thing_id: ThingId::FIRST,
            next_request_id: RequestId::default(),
            outcomes: Channel::new(),
            changes: Channel::new(),
        };
        tracing::info!(
            world = %world.id,
            name = %world.name,
            width = world.width,
            height = world.height,
            "world constructed"
        );
        Ok(world)
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn max_cascade_depth(&self) -> usize {
        self.max_cascade_depth
    }

    /// Reserves the next thing identifier.
    pub fn allocate_id(&mut self) -> Result<ThingId, StateError> {
        let id = self.next_thing_id;
        self.next_thing_id = id.next().ok_or(StateError::ThingIdOverflow { current: id })?;
        Ok(id)
    }

    /// Registers `thing` under its identifier.
    ///
    /// With `replace` the entry is overwritten unconditionally. Otherwise an
    /// existing entry wins and `false` is returned, logging a warning unless
    /// `silent` is set. No occupancy or bounds checks are made here; use
    /// [`World::spawn`] for a checked insertion.
    pub fn add(&mut self, thing: Thing, replace: bool, silent: bool) -> bool {
        if !replace && self.things.contains_key(&thing.id) {
            if !silent {
                tracing::warn!(
                    world = %self.name,
                    thing = %thing.id,
                    kind = %thing.kind,
                    "add rejected: identifier already registered"
                );
            }
            return false;
        }
        if thing.id >= self.next_thing_id {
            // Keep allocation ahead of externally chosen identifiers.
            if let Some(next) = thing.id.next() {
                self.next_thing_id = next;
            }
        }
        self.things.insert(thing.id, thing);
        true
    }

    /// Deletes a thing from the registry and returns it.
    ///
    /// Emits no change event; destruction during resolution goes through the
    /// resolver, which reports it.
    pub fn remove(&mut self, id: ThingId) -> Result<Thing, StateError> {
        self.things.remove(&id).ok_or_else(|| StateError::ThingNotFound {
            id,
            world: self.name.clone(),
        })
    }

    /// Validates `spec`, allocates an identifier and places the new thing.
    pub fn spawn(&mut self, spec: ThingSpec) -> Result<ThingId, StateError> {
        spec.validate()?;
        self.ensure_in_bounds(spec.position)?;
        if let Some(occupant) = self.locate(spec.position) {
            return Err(StateError::PositionOccupied {
                position: spec.position,
                occupant: occupant.id,
            });
        }
        let id = self.allocate_id()?;
        let thing = Thing::from_spec(id, spec)?;
        tracing::trace!(thing = %id, kind = %thing.kind, position = %thing.position, "spawned");
        if !self.add(thing, false, false) {
            return Err(StateError::DuplicateId { id });
        }
        Ok(id)
    }

    /// First thing at `position`, scanning in identifier order.
    pub fn locate(&self, position: Position) -> Option<&Thing> {
        self.things.values().find(|thing| thing.position == position)
    }

    /// First thing with the given display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Thing> {
        self.things.values().find(|thing| thing.name == name)
    }

    pub fn get(&self, id: ThingId) -> Option<&Thing> {
        self.things.get(&id)
    }

    pub fn things(&self) -> impl Iterator<Item = &Thing> {
        self.things.values()
    }

    pub fn len(&self) -> usize {
        self.things.len()
    }

    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }

    /// True if `position` lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// True if `position` is inside the world and nothing occupies it.
    pub fn is_vacant(&self, position: Position) -> bool {
        self.contains(position) && self.locate(position).is_none()
    }

    /// Drops every thing. Subscriptions and allocators are kept.
    pub fn clear(&mut self) {
        tracing::info!(world = %self.name, things = self.things.len(), "world cleared");
        self.things.clear();
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(self)
    }

    /// Resolves `request` to completion, cascades included.
    ///
    /// Subscribers are notified before this returns. The returned event is the
    /// outcome of `request` itself.
    pub fn resolve(&mut self, request: &ActionRequest) -> Result<OutcomeEvent, ResolveError> {
        Resolver::new(self).resolve(request)
    }

    pub fn subscribe_outcomes(
        &mut self,
        subscriber: impl Subscriber<OutcomeEvent> + 'static,
    ) -> SubscriptionId {
        self.outcomes.subscribe(subscriber)
    }

    pub fn subscribe_changes(
        &mut self,
        subscriber: impl Subscriber<ChangeEvent> + 'static,
    ) -> SubscriptionId {
        self.changes.subscribe(subscriber)
    }

    pub fn unsubscribe_outcomes(&mut self, id: SubscriptionId) -> bool {
        self.outcomes.unsubscribe(id)
    }

    pub fn unsubscribe_changes(&mut self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }

    fn ensure_in_bounds(&self, position: Position) -> Result<(), StateError> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(StateError::PositionOutOfBounds {
                position,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id = RequestId(id.0.wrapping_add(1));
        id
    }

    /// Writes a new position and reports the move.
    pub(crate) fn relocate(
        &mut self,
        id: ThingId,
        to: Position,
        request: RequestId,
    ) -> Result<(), StateError> {
        self.ensure_in_bounds(to)?;
        let thing = self.things.get_mut(&id).ok_or_else(|| StateError::ThingNotFound {
            id,
            world: self.name.clone(),
        })?;
        let from = thing.position;
        thing.position = to;
        self.changes.publish(&ChangeEvent {
            request,
            change: Change::Moved { thing: id, from, to },
        });
        Ok(())
    }

    /// Removes a thing and reports the removal.
    pub(crate) fn destroy(&mut self, id: ThingId, request: RequestId) -> Result<Thing, StateError> {
        let thing = self.remove(id)?;
        self.changes.publish(&ChangeEvent {
            request,
            change: Change::Removed {
                thing: id,
                position: thing.position,
            },
        });
        Ok(thing)
    }

    pub(crate) fn publish_outcome(&mut self, event: &OutcomeEvent) {
        self.outcomes.publish(event);
    }
}
