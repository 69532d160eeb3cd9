//! Events emitted by engine actions.
//!
//! Every action returns the events it produced. Mutating events are
//! appended to the store's event log; `ActionIgnored` and
//! `ProductionAccrued` are returned to the caller only.

use crate::{
    economy::MarketDirection,
    random_event::EventKind,
    repair::RepairTier,
    state::ActiveModal,
    types::{EntityId, GameId, Millis},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Timer ──────────────────────────────────────
    ProductionAccrued {
        elapsed_secs: f64,
        amount: f64,
    },
    PauseChanged {
        paused: bool,
    },

    // ── Progress ───────────────────────────────────
    ButtonClicked {
        button_id: EntityId,
        cost: f64,
        resource_gain: f64,
        progress_gain: f64,
        progress: f64,
    },
    MarketMoved {
        direction: MarketDirection,
    },
    AutomationPurchased {
        automation_id: EntityId,
        cost: f64,
        new_level: u32,
    },
    AppDelivered {
        project_name: String,
        completed_level: u32,
        payment: f64,
        payment_multiplier: f64,
        market: MarketDirection,
        prestige_multiplier: f64,
        next_project: String,
    },

    // ── Threshold events ───────────────────────────
    ThresholdReached {
        threshold: f64,
        outcome: EventKind,
    },
    ModalOpened {
        modal: ActiveModal,
        bugs_clicks_required: Option<u32>,
    },
    BugsClickRegistered {
        progress: u32,
        required: u32,
    },
    BugsResolved {
        clicks: u32,
    },
    HardwareRepaired {
        tier: RepairTier,
        cost: f64,
        stability: f64,
    },

    // ── Day cycle ──────────────────────────────────
    DayStarted {
        day: u32,
        starting_fatigue: u32,
        automatic: bool,
    },
    RentCharged {
        day: u32,
        amount: f64,
        cash: f64,
    },

    // ── Lifecycle ──────────────────────────────────
    GameReset {
        game_id: GameId,
        project_name: String,
    },

    // ── Rejections (no mutation) ───────────────────
    ActionIgnored {
        action: String,
        reason: IgnoreReason,
    },
}

impl GameEvent {
    /// Stable name for the event_type column.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ProductionAccrued { .. }   => "production_accrued",
            Self::PauseChanged { .. }        => "pause_changed",
            Self::ButtonClicked { .. }       => "button_clicked",
            Self::MarketMoved { .. }         => "market_moved",
            Self::AutomationPurchased { .. } => "automation_purchased",
            Self::AppDelivered { .. }        => "app_delivered",
            Self::ThresholdReached { .. }    => "threshold_reached",
            Self::ModalOpened { .. }         => "modal_opened",
            Self::BugsClickRegistered { .. } => "bugs_click_registered",
            Self::BugsResolved { .. }        => "bugs_resolved",
            Self::HardwareRepaired { .. }    => "hardware_repaired",
            Self::DayStarted { .. }          => "day_started",
            Self::RentCharged { .. }         => "rent_charged",
            Self::GameReset { .. }           => "game_reset",
            Self::ActionIgnored { .. }       => "action_ignored",
        }
    }

    /// Whether this event belongs in the persisted event log.
    pub fn is_logged(&self) -> bool {
        !matches!(self, Self::ActionIgnored { .. } | Self::ProductionAccrued { .. })
    }
}

/// Why an action was a no-op.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IgnoreReason {
    Paused,
    ModalActive { modal: ActiveModal },
    ProjectIncomplete { progress: f64 },
    UnknownButton { button_id: EntityId },
    UnknownAutomation { automation_id: EntityId },
    Cooldown { remaining_ms: Millis },
    InsufficientResource { needed: f64, available: f64 },
    InsufficientCash { needed: f64, available: f64 },
    NoMatchingModal { expected: ActiveModal, actual: ActiveModal },
    UnknownRepairTier { tier: RepairTier },
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: Option<i64>,
    pub slot: String,
    pub game_id: GameId,
    pub at_ms: Millis,
    pub event_type: String,
    pub payload: String, // JSON-serialized GameEvent
}
