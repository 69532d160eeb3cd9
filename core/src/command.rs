use crate::{repair::RepairTier, types::EntityId};
use serde::{Deserialize, Serialize};

/// All player-issued actions. This is the only mutation surface;
/// the engine dispatches each variant to its action method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Timer ─────────────────────────────────────
    Tick,
    Pause,
    Resume,

    // ── Progress ──────────────────────────────────
    Click { button_id: EntityId },
    BuyAutomation { automation_id: EntityId },

    // ── Events ────────────────────────────────────
    ClickBugsModal,
    ResolveHardware { tier: RepairTier },

    // ── Day cycle ─────────────────────────────────
    Sleep,

    // ── Lifecycle ─────────────────────────────────
    ResetGame,
}

impl PlayerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tick                 => "tick",
            Self::Pause                => "pause",
            Self::Resume               => "resume",
            Self::Click { .. }         => "click",
            Self::BuyAutomation { .. } => "buy_automation",
            Self::ClickBugsModal       => "click_bugs_modal",
            Self::ResolveHardware { .. } => "resolve_hardware",
            Self::Sleep                => "sleep",
            Self::ResetGame            => "reset_game",
        }
    }
}
