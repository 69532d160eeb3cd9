//! Shared primitive types used across the entire simulation.

/// Wall-clock milliseconds. All timestamps in state use this unit.
pub type Millis = u64;

/// A stable identifier for catalog entries (automations, action buttons).
pub type EntityId = String;

/// The canonical identifier of one playthrough, regenerated on reset.
pub type GameId = uuid::Uuid;
