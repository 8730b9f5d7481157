//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - dt-driven stepping only, no wall-clock reads
//! - Stable resolution order (table declaration order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod table;
pub mod tick;

pub use collision::{Contact, circle_circle_contact, circle_segment_contact, resolve_contact};
pub use state::{Ball, Bumper, Flipper, GamePhase, GameState, LaneRect, Plunger, Target, Wall};
pub use table::Table;
pub use tick::{TickInput, substep_count, tick};
