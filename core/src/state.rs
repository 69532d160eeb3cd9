//! The simulation state: one owned aggregate, mutated only by the engine.
//!
//! Everything in here is persisted. Transient presentation data (terminal
//! lines, the file tree, pending display events) lives outside.

use crate::{
    config::{ActionButtonSpec, AutomationSpec, GameConfig},
    economy::EconomyState,
    fatigue::FatigueState,
    formulas,
    procedural::ButtonLabel,
    types::{EntityId, GameId, Millis},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Automation {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub base_production_rate: f64,
    pub current_level: u32,
    pub base_cost: f64,
}

impl Automation {
    pub fn from_spec(spec: &AutomationSpec) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            description: spec.description.clone(),
            base_production_rate: spec.base_production_rate,
            current_level: 0,
            base_cost: spec.base_cost,
        }
    }

    pub fn next_cost(&self) -> f64 {
        formulas::upgrade_cost(self.base_cost, self.current_level)
    }

    pub fn production(&self) -> f64 {
        formulas::production_rate(self.base_production_rate, self.current_level)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionButton {
    pub id: EntityId,
    pub label: String,
    pub description: String,
    pub base_progress: f64,
    pub base_cost: f64,
    pub cooldown_ms: Millis,
    pub last_used_ms: Millis,
}

impl ActionButton {
    pub fn from_spec(spec: &ActionButtonSpec) -> Self {
        Self {
            id: spec.id.clone(),
            label: spec.id.clone(),
            description: spec.description.clone(),
            base_progress: spec.base_progress,
            base_cost: spec.base_cost,
            cooldown_ms: spec.cooldown_ms,
            last_used_ms: 0,
        }
    }

    /// Milliseconds until the button can be used again.
    pub fn cooldown_remaining(&self, now: Millis) -> Millis {
        let since = now.saturating_sub(self.last_used_ms);
        self.cooldown_ms.saturating_sub(since)
    }

    pub fn is_ready(&self, now: Millis) -> bool {
        self.cooldown_remaining(now) == 0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActiveModal {
    #[default]
    None,
    Bugs,
    Hardware,
}

/// Top-level control state derived from the open modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Running,
    EventBlocked(ActiveModal),
}

/// Threshold flags and the open modal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EventState {
    #[serde(rename = "event_triggered_50")]
    pub triggered_first: bool,
    #[serde(rename = "event_triggered_90")]
    pub triggered_second: bool,
    #[serde(default)]
    pub active_modal: ActiveModal,
    /// Only meaningful while the bugs modal is open.
    pub bugs_clicks_required: u32,
    pub bugs_clicks_progress: u32,
}

impl EventState {
    pub fn clear_thresholds(&mut self) {
        self.triggered_first = false;
        self.triggered_second = false;
    }

    pub fn close_modal(&mut self) {
        self.active_modal = ActiveModal::None;
        self.bugs_clicks_required = 0;
        self.bugs_clicks_progress = 0;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationState {
    pub game_id: GameId,

    /// Spendable code points.
    pub resource: f64,
    /// Completion of the current project, 0..=100.
    pub progress: f64,
    /// Projects started; 1 on a fresh game.
    pub level: u32,
    pub project_name: String,

    pub automations: Vec<Automation>,
    #[serde(default)]
    pub upgrades: BTreeMap<String, u32>,

    pub total_clicks: u64,
    pub total_apps_delivered: u64,
    pub prestige_multiplier: f64,

    pub last_tick_ms: Millis,
    pub is_paused: bool,

    pub action_buttons: Vec<ActionButton>,

    pub fatigue: FatigueState,
    pub economy: EconomyState,
    pub events: EventState,
    pub stability: f64,
}

impl SimulationState {
    /// A fresh game built from the catalog and balance constants.
    pub fn new(config: &GameConfig, game_id: GameId, project_name: String, labels: &[ButtonLabel], now: Millis) -> Self {
        let balance = &config.balance;
        let mut state = Self {
            game_id,
            resource: 0.0,
            progress: 0.0,
            level: 1,
            project_name,
            automations: config.catalog.automations.iter().map(Automation::from_spec).collect(),
            upgrades: BTreeMap::new(),
            total_clicks: 0,
            total_apps_delivered: 0,
            prestige_multiplier: formulas::prestige_multiplier(0),
            last_tick_ms: now,
            is_paused: false,
            action_buttons: config.catalog.action_buttons.iter().map(ActionButton::from_spec).collect(),
            fatigue: FatigueState::new(balance.fatigue.max_fatigue),
            economy: EconomyState::new(&balance.economy),
            events: EventState::default(),
            stability: balance.repair.starting_stability,
        };
        state.relabel(labels);
        state
    }

    pub fn control_state(&self) -> ControlState {
        match self.events.active_modal {
            ActiveModal::None => ControlState::Running,
            modal => ControlState::EventBlocked(modal),
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.events.active_modal != ActiveModal::None
    }

    pub fn automation(&self, id: &str) -> Option<&Automation> {
        self.automations.iter().find(|a| a.id == id)
    }

    /// Points per second including the prestige multiplier.
    pub fn production_per_second(&self) -> f64 {
        formulas::total_production(&self.automations) * self.prestige_multiplier
    }

    /// Replace every button label. Labels cycle if there are more buttons.
    pub fn relabel(&mut self, labels: &[ButtonLabel]) {
        if labels.is_empty() {
            return;
        }
        for (i, button) in self.action_buttons.iter_mut().enumerate() {
            button.label = labels[i % labels.len()].to_string();
        }
    }

    /// Structural sanity check applied to restored snapshots.
    pub fn validate(&self) -> Result<(), String> {
        let finite = [
            ("resource", self.resource),
            ("progress", self.progress),
            ("prestige_multiplier", self.prestige_multiplier),
            ("cash", self.economy.cash),
            ("last_payment", self.economy.last_payment),
            ("stability", self.stability),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{name} is not finite"));
        }
        if self.resource < 0.0 {
            return Err("resource is negative".into());
        }
        if !(0.0..=100.0).contains(&self.progress) {
            return Err(format!("progress {} outside [0, 100]", self.progress));
        }
        if !(0.0..=100.0).contains(&self.stability) {
            return Err(format!("stability {} outside [0, 100]", self.stability));
        }
        if self.level == 0 {
            return Err("level must be >= 1".into());
        }
        if self.prestige_multiplier < 1.0 {
            return Err("prestige multiplier below 1".into());
        }
        if self.automations.is_empty() || self.action_buttons.is_empty() {
            return Err("catalog is empty".into());
        }
        if self.automations.iter().any(|a| !(a.base_cost > 0.0) || !(a.base_production_rate >= 0.0)) {
            return Err("automation with invalid economics".into());
        }
        if self.action_buttons.iter().any(|b| !(b.base_progress > 0.0) || !(b.base_cost >= 0.0)) {
            return Err("action button with invalid economics".into());
        }
        if self.fatigue.max_fatigue == 0 || self.fatigue.fatigue_level > self.fatigue.max_fatigue {
            return Err("fatigue out of range".into());
        }
        if self.events.active_modal == ActiveModal::Bugs && self.events.bugs_clicks_required == 0 {
            return Err("bugs modal open without a requirement".into());
        }
        Ok(())
    }
}
