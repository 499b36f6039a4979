//! Client-side view of the world, kept current from runtime events.
use std::collections::VecDeque;

use realm_core::{Change, ChangeEvent, NotAllowedReason, Outcome, OutcomeEvent, ThingId, WorldSnapshot};

/// Messages kept for the log panel.
pub const MESSAGE_CAPACITY: usize = 64;

/// Cached snapshot plus the message log rendered each frame.
pub struct AppState {
    snapshot: WorldSnapshot,
    player: Option<ThingId>,
    messages: VecDeque<String>,
}

impl AppState {
    pub fn new(snapshot: WorldSnapshot, player: Option<ThingId>) -> Self {
        Self {
            snapshot,
            player,
            messages: VecDeque::with_capacity(MESSAGE_CAPACITY),
        }
    }

    pub fn snapshot(&self) -> &WorldSnapshot {
        &self.snapshot
    }

    /// True while the player agent is still in the world.
    pub fn player_alive(&self) -> bool {
        self.player
            .is_some_and(|id| self.snapshot.things.iter().any(|thing| thing.id == id))
    }

    /// Newest first.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().rev().map(String::as_str)
    }

    /// Replace the cache wholesale, e.g. after lagging behind the event stream.
    pub fn reset(&mut self, snapshot: WorldSnapshot) {
        self.snapshot = snapshot;
    }

    /// Returns true when the map needs a redraw.
    pub fn apply_change(&mut self, event: &ChangeEvent) -> bool {
        let thing = event.thing();
        match event.change {
            Change::Moved { to, .. } => {
                match self.snapshot.things.iter_mut().find(|t| t.id == thing) {
                    Some(entry) => {
                        entry.position = to;
                        true
                    }
                    None => false,
                }
            }
            Change::Removed { .. } => {
                let before = self.snapshot.things.len();
                self.snapshot.things.retain(|t| t.id != thing);
                if Some(thing) == self.player {
                    self.push_message("You were destroyed.".to_string());
                }
                before != self.snapshot.things.len()
            }
        }
    }

    /// Log the player's own outcomes; cascaded ones are too noisy.
    pub fn apply_outcome(&mut self, event: &OutcomeEvent) {
        if event.cause.is_some()
            || Some(event.actor) != self.player
            || event.outcome.is_success()
        {
            return;
        }
        if let Some(text) = self.describe(&event.outcome) {
            self.push_message(text);
        }
    }

    pub fn push_message(&mut self, text: String) {
        if self.messages.len() == MESSAGE_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(text);
    }

    fn name_of(&self, id: ThingId) -> String {
        self.snapshot
            .things
            .iter()
            .find(|thing| thing.id == id)
            .map(|thing| thing.name.clone())
            .unwrap_or_else(|| format!("thing #{}", id.0))
    }

    fn describe(&self, outcome: &Outcome) -> Option<String> {
        match outcome {
            Outcome::Succeeded => None,
            Outcome::Blocked { blocked_by } => {
                Some(format!("Blocked by {}.", self.name_of(*blocked_by)))
            }
            Outcome::NotAllowed { reason } => Some(match reason {
                NotAllowedReason::Immovable => "You cannot move.".to_string(),
                NotAllowedReason::OutOfBounds { destination } => {
                    format!("{} is outside the world.", destination)
                }
                NotAllowedReason::ZeroDelta => "Nothing happens.".to_string(),
            }),
            Outcome::ActorDestroyed { destroyed_by } => {
                Some(format!("Destroyed by {}.", self.name_of(*destroyed_by)))
            }
        }
    }
}
