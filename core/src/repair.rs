//! Hardware repair pricing.
//!
//! Three fixed tiers; a global modifier from current stability scales
//! every price (discount when stable, markup when fragile).

use crate::config::RepairConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RepairTier {
    Cheap,
    Standard,
    Premium,
}

impl RepairTier {
    pub const ALL: [RepairTier; 3] = [Self::Cheap, Self::Standard, Self::Premium];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cheap    => "Quick Fix",
            Self::Standard => "Standard Repair",
            Self::Premium  => "Premium Service",
        }
    }
}

/// Price multiplier for the current stability.
pub fn cost_modifier(config: &RepairConfig, stability: f64) -> f64 {
    if stability > config.high_stability_above {
        config.high_stability_modifier
    } else if stability < config.low_stability_below {
        config.low_stability_modifier
    } else {
        1.0
    }
}

/// `floor(base_cost * modifier)`, or None if the tier is not configured.
pub fn repair_cost(config: &RepairConfig, tier: RepairTier, stability: f64) -> Option<f64> {
    let tier_config = config.tier(tier)?;
    Some((tier_config.base_cost * cost_modifier(config, stability)).floor())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepairQuote {
    pub tier: RepairTier,
    pub label: String,
    pub cost: f64,
    pub stability_delta: f64,
    pub affordable: bool,
}

/// Every configured tier priced at the current stability.
pub fn quotes(config: &RepairConfig, stability: f64, cash: f64) -> Vec<RepairQuote> {
    let modifier = cost_modifier(config, stability);
    config
        .tiers
        .iter()
        .map(|t| {
            let cost = (t.base_cost * modifier).floor();
            RepairQuote {
                tier: t.tier,
                label: t.tier.label().to_string(),
                cost,
                stability_delta: t.stability_delta,
                affordable: cash >= cost,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepairOutcome {
    Repaired { cost: f64, cash: f64, stability: f64 },
    Unaffordable { cost: f64, cash: f64 },
}

/// Price a repair and compute the resulting cash and stability.
/// Pure: the caller applies a `Repaired` outcome.
pub fn attempt(config: &RepairConfig, tier: RepairTier, stability: f64, cash: f64) -> Option<RepairOutcome> {
    let delta = config.tier(tier)?.stability_delta;
    let cost = repair_cost(config, tier, stability)?;
    if cash < cost {
        return Some(RepairOutcome::Unaffordable { cost, cash });
    }
    Some(RepairOutcome::Repaired {
        cost,
        cash: cash - cost,
        stability: (stability + delta).clamp(0.0, 100.0),
    })
}
