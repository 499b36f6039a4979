//! Terminal presentation components used by the client.
pub mod terminal;
pub mod ui;
