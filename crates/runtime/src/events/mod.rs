//! Topic-based event bus for runtime events.
//!
//! The simulation worker forwards the world's synchronous outcome and change
//! notifications onto this bus, and consumers subscribe only to the topics
//! they need.

mod bus;

pub use bus::{Event, EventBus, Topic};
