//! Outcome and change notifications.
//!
//! Every resolved request produces exactly one [`OutcomeEvent`]; every
//! position write or removal produces one [`ChangeEvent`]. Both are delivered
//! synchronously through a [`Channel`] owned by the world.
mod channel;
mod outcome;

pub use channel::{Channel, EventLog, Subscriber, SubscriptionId};
pub use outcome::{Change, ChangeEvent, NotAllowedReason, Outcome, OutcomeEvent};
