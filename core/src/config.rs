//! Game data: the automation / action-button catalog and every balance
//! constant. Loaded from `catalog.json` + `balance.json` in a data
//! directory, or built in via `GameConfig::default()`.

use crate::{
    error::{GameError, GameResult},
    repair::RepairTier,
    types::{EntityId, Millis},
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutomationSpec {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub base_production_rate: f64, // points per second
    pub base_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionButtonSpec {
    pub id: EntityId,
    pub description: String,
    pub base_progress: f64,
    pub base_cost: f64,
    pub cooldown_ms: Millis,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    pub automations: Vec<AutomationSpec>,
    pub action_buttons: Vec<ActionButtonSpec>,
}

/// Half-open multiplier range `[min, max)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MultiplierRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EconomyConfig {
    pub starting_cash: f64,
    pub rent_amount: f64,
    pub rent_interval_days: u32,
    pub payment_base: f64,
    pub market_up: MultiplierRange,
    pub market_down: MultiplierRange,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FatigueConfig {
    pub max_fatigue: u32,
    pub fatigue_per_click: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventConfig {
    pub first_threshold: f64,
    pub second_threshold: f64,
    /// Draws below this select no event.
    pub none_below: f64,
    /// Draws below this (and at or above `none_below`) select bugs.
    pub bugs_below: f64,
    pub bugs_clicks_min: u32,
    pub bugs_clicks_max: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepairTierConfig {
    pub tier: RepairTier,
    pub base_cost: f64,
    pub stability_delta: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepairConfig {
    pub tiers: Vec<RepairTierConfig>,
    pub starting_stability: f64,
    pub high_stability_above: f64,
    pub high_stability_modifier: f64,
    pub low_stability_below: f64,
    pub low_stability_modifier: f64,
}

impl RepairConfig {
    pub fn tier(&self, tier: RepairTier) -> Option<&RepairTierConfig> {
        self.tiers.iter().find(|t| t.tier == tier)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresentationConfig {
    pub tick_interval_ms: Millis,
    pub log_stagger_ms: Millis,
    pub terminal_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceConfig {
    pub economy: EconomyConfig,
    pub fatigue: FatigueConfig,
    pub events: EventConfig,
    pub repair: RepairConfig,
    pub presentation: PresentationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    pub catalog: CatalogConfig,
    pub balance: BalanceConfig,
}

impl GameConfig {
    /// Load from a data directory holding `catalog.json` and `balance.json`.
    pub fn load(data_dir: impl AsRef<Path>) -> GameResult<Self> {
        let dir = data_dir.as_ref();

        let catalog_path = dir.join("catalog.json");
        let catalog_content = std::fs::read_to_string(&catalog_path)
            .with_context(|| format!("reading {}", catalog_path.display()))?;
        let catalog: CatalogConfig = serde_json::from_str(&catalog_content)?;

        let balance_path = dir.join("balance.json");
        let balance_content = std::fs::read_to_string(&balance_path)
            .with_context(|| format!("reading {}", balance_path.display()))?;
        let balance: BalanceConfig = serde_json::from_str(&balance_content)?;

        let config = Self { catalog, balance };
        config.validate()?;
        log::debug!(
            "Loaded config from {}: {} automations, {} action buttons",
            dir.display(),
            config.catalog.automations.len(),
            config.catalog.action_buttons.len()
        );
        Ok(config)
    }

    /// Reject data the engine cannot run on.
    pub fn validate(&self) -> GameResult<()> {
        let catalog = &self.catalog;
        if catalog.automations.is_empty() {
            return invalid("catalog has no automations");
        }
        if catalog.action_buttons.is_empty() {
            return invalid("catalog has no action buttons");
        }
        for a in &catalog.automations {
            if !(a.base_cost > 0.0) || !(a.base_production_rate >= 0.0) {
                return invalid(format!("automation '{}' has non-positive cost or negative rate", a.id));
            }
        }
        for b in &catalog.action_buttons {
            if !(b.base_progress > 0.0) || !(b.base_cost >= 0.0) {
                return invalid(format!("action button '{}' has non-positive progress or negative cost", b.id));
            }
        }
        if has_duplicates(catalog.automations.iter().map(|a| a.id.as_str()))
            || has_duplicates(catalog.action_buttons.iter().map(|b| b.id.as_str()))
        {
            return invalid("catalog ids must be unique");
        }

        let b = &self.balance;
        if b.fatigue.max_fatigue == 0 {
            return invalid("max_fatigue must be > 0");
        }
        if b.economy.rent_interval_days == 0 {
            return invalid("rent_interval_days must be > 0");
        }
        for range in [b.economy.market_up, b.economy.market_down] {
            if !(range.min > 0.0 && range.min < range.max) {
                return invalid("market multiplier ranges must satisfy 0 < min < max");
            }
        }
        let ev = &b.events;
        if !(0.0 < ev.first_threshold && ev.first_threshold < ev.second_threshold && ev.second_threshold <= 100.0) {
            return invalid("event thresholds must satisfy 0 < first < second <= 100");
        }
        if !(0.0 <= ev.none_below && ev.none_below <= ev.bugs_below && ev.bugs_below <= 1.0) {
            return invalid("event draw cut points must satisfy 0 <= none_below <= bugs_below <= 1");
        }
        if ev.bugs_clicks_min == 0 || ev.bugs_clicks_min > ev.bugs_clicks_max {
            return invalid("bugs clicks range must satisfy 0 < min <= max");
        }
        for tier in RepairTier::ALL {
            if !b.repair.tier(tier).is_some_and(|t| t.base_cost > 0.0) {
                return invalid(format!("repair tier {tier:?} missing or free"));
            }
        }
        if b.presentation.terminal_capacity == 0 {
            return invalid("terminal_capacity must be > 0");
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let automation = |id: &str, name: &str, description: &str, rate: f64, cost: f64| AutomationSpec {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            base_production_rate: rate,
            base_cost: cost,
        };
        let button = |id: &str, description: &str, progress: f64, cost: f64, cooldown_ms: Millis| ActionButtonSpec {
            id: id.into(),
            description: description.into(),
            base_progress: progress,
            base_cost: cost,
            cooldown_ms,
        };

        Self {
            catalog: CatalogConfig {
                automations: vec![
                    automation("ai-assistant", "AI Assistant Bot", "Generates code points passively", 0.5, 10.0),
                    automation("auto-debugger", "Auto-Debugger", "Fixes bugs automatically", 2.0, 50.0),
                    automation("code-optimizer", "Code Optimizer", "Optimizes code for performance", 8.0, 250.0),
                    automation("ci-pipeline", "CI/CD Pipeline", "Automates testing and deployment", 32.0, 1000.0),
                    automation("neural-coder", "Neural Coder", "Advanced AI coding system", 128.0, 5000.0),
                ],
                action_buttons: vec![
                    button("code", "Write code manually", 2.0, 0.0, 0),
                    button("debug", "Fix bugs in the code", 4.0, 5.0, 500),
                    button("lint", "Lint and format code", 6.0, 10.0, 1000),
                    button("test", "Run end-to-end tests", 10.0, 20.0, 2000),
                ],
            },
            balance: BalanceConfig {
                economy: EconomyConfig {
                    starting_cash: 1200.0,
                    rent_amount: 2000.0,
                    rent_interval_days: 30,
                    payment_base: 600.0,
                    market_up: MultiplierRange { min: 1.01, max: 2.01 },
                    market_down: MultiplierRange { min: 0.50, max: 0.99 },
                },
                fatigue: FatigueConfig {
                    max_fatigue: 300,
                    fatigue_per_click: 1,
                },
                events: EventConfig {
                    first_threshold: 50.0,
                    second_threshold: 90.0,
                    none_below: 1.0 / 3.0,
                    bugs_below: 2.0 / 3.0,
                    bugs_clicks_min: 50,
                    bugs_clicks_max: 150,
                },
                repair: RepairConfig {
                    tiers: vec![
                        RepairTierConfig { tier: RepairTier::Cheap, base_cost: 100.0, stability_delta: -15.0 },
                        RepairTierConfig { tier: RepairTier::Standard, base_cost: 300.0, stability_delta: 0.0 },
                        RepairTierConfig { tier: RepairTier::Premium, base_cost: 600.0, stability_delta: 15.0 },
                    ],
                    starting_stability: 50.0,
                    high_stability_above: 70.0,
                    high_stability_modifier: 0.7,
                    low_stability_below: 30.0,
                    low_stability_modifier: 1.75,
                },
                presentation: PresentationConfig {
                    tick_interval_ms: 100,
                    log_stagger_ms: 50,
                    terminal_capacity: 50,
                },
            },
        }
    }
}

fn invalid<T>(reason: impl Into<String>) -> GameResult<T> {
    Err(GameError::InvalidConfig { reason: reason.into() })
}

fn has_duplicates<'a>(ids: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().any(|id| !seen.insert(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        GameConfig::default().validate().expect("built-in config must validate");
    }

    #[test]
    fn shipped_data_matches_builtin_defaults() {
        let data_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");
        let loaded = GameConfig::load(data_dir).expect("load shipped data");
        assert_eq!(loaded, GameConfig::default());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let mut config = GameConfig::default();
        config.balance.events.first_threshold = 95.0;
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_duplicate_button_ids() {
        let mut config = GameConfig::default();
        let dup = config.catalog.action_buttons[0].clone();
        config.catalog.action_buttons.push(dup);
        assert!(config.validate().is_err());
    }

    #[test]
    fn every_repair_tier_is_priced() {
        let config = GameConfig::default();
        let repair = &config.balance.repair;
        assert_eq!(repair.tier(RepairTier::Cheap).map(|t| t.base_cost), Some(100.0));
        assert_eq!(repair.tier(RepairTier::Premium).map(|t| t.stability_delta), Some(15.0));

        let mut config = GameConfig::default();
        config.balance.repair.tiers.retain(|t| t.tier != RepairTier::Standard);
        assert!(config.balance.repair.tier(RepairTier::Standard).is_none());
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig { .. })));
    }

    #[test]
    fn missing_data_dir_is_an_error() {
        assert!(GameConfig::load("/definitely/not/here").is_err());
    }
}
