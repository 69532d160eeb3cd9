//! Snapshot serialization: the persisted field set to/from JSON.
//!
//! A snapshot is written after every mutating action. Restoring fails
//! closed: anything that does not decode, has the wrong version, or
//! breaks a state invariant is discarded in favour of a fresh game.

use crate::{error::GameResult, state::SimulationState, types::Millis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub state: SimulationState,
}

/// Why a stored snapshot was not used.
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    Restored,
    NoSnapshot,
    Rejected { reason: String },
}

impl GameSnapshot {
    /// Snapshot `state`, stamped with `saved_at_ms` from the caller's clock.
    pub fn capture(state: &SimulationState, saved_at_ms: Millis) -> Self {
        let saved_at = i64::try_from(saved_at_ms)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or_default();
        Self {
            version: SNAPSHOT_VERSION,
            saved_at,
            state: state.clone(),
        }
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and check a stored snapshot.
    pub fn decode(json: &str) -> Result<Self, String> {
        let snapshot: GameSnapshot = serde_json::from_str(json).map_err(|e| e.to_string())?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            ));
        }
        snapshot.state.validate()?;
        Ok(snapshot)
    }

    /// Restore from optional stored JSON, falling back to `fresh` on any problem.
    pub fn restore_or<F>(json: Option<&str>, fresh: F) -> (SimulationState, RestoreOutcome)
    where
        F: FnOnce() -> SimulationState,
    {
        let Some(json) = json else {
            return (fresh(), RestoreOutcome::NoSnapshot);
        };
        match Self::decode(json) {
            Ok(snapshot) => (snapshot.state, RestoreOutcome::Restored),
            Err(reason) => {
                log::warn!("Discarding saved snapshot: {reason}");
                (fresh(), RestoreOutcome::Rejected { reason })
            }
        }
    }
}
