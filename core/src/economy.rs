//! Cash, market direction, delivery payments and rent.

use crate::{config::EconomyConfig, rng::RandomSource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarketDirection {
    #[default]
    Up,
    Down,
}

impl MarketDirection {
    /// Fresh fair coin flip.
    pub fn roll(rng: &mut dyn RandomSource) -> Self {
        if rng.chance(0.5) { Self::Up } else { Self::Down }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Up   => "↑",
            Self::Down => "↓",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EconomyState {
    /// May go negative (debt).
    pub cash: f64,
    pub market_direction: MarketDirection,
    pub last_payment: f64,
}

impl EconomyState {
    pub fn new(config: &EconomyConfig) -> Self {
        Self {
            cash: config.starting_cash,
            market_direction: MarketDirection::Up,
            last_payment: 0.0,
        }
    }

    pub fn is_in_debt(&self) -> bool {
        self.cash < 0.0
    }

    pub fn charge_rent(&mut self, config: &EconomyConfig) -> f64 {
        self.cash -= config.rent_amount;
        config.rent_amount
    }

    pub fn receive(&mut self, payment: &Payment) {
        self.cash += payment.amount;
        self.last_payment = payment.amount;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub multiplier: f64,
    pub amount: f64,
}

/// `floor(base * m)` with m drawn from the range for the market direction.
pub fn delivery_payment(
    config: &EconomyConfig,
    direction: MarketDirection,
    rng: &mut dyn RandomSource,
) -> Payment {
    let range = match direction {
        MarketDirection::Up   => config.market_up,
        MarketDirection::Down => config.market_down,
    };
    let multiplier = rng.range_f64(range.min, range.max);
    Payment {
        multiplier,
        amount: (config.payment_base * multiplier).floor(),
    }
}

/// Rent is due on every positive multiple of the interval.
pub fn rent_due(day: u32, interval_days: u32) -> bool {
    interval_days > 0 && day > 0 && day % interval_days == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GameConfig, rng::{GameRng, ScriptedRng}};

    #[test]
    fn down_market_payment_bounds() {
        let c = GameConfig::default().balance.economy;
        let mut rng = GameRng::new(1234, 0);
        for _ in 0..5_000 {
            let p = delivery_payment(&c, MarketDirection::Down, &mut rng);
            assert!((300.0..=594.0).contains(&p.amount), "payment {}", p.amount);
            assert!(p.multiplier >= 0.50 && p.multiplier < 0.99);
        }
    }

    #[test]
    fn up_market_payment_bounds() {
        let c = GameConfig::default().balance.economy;
        let mut low = ScriptedRng::new([0.0]);
        assert_eq!(delivery_payment(&c, MarketDirection::Up, &mut low).amount, 606.0);
        let mut high = ScriptedRng::new([0.999_999]);
        assert_eq!(delivery_payment(&c, MarketDirection::Up, &mut high).amount, 1205.0);
    }

    #[test]
    fn rent_cadence() {
        assert!(!rent_due(0, 30));
        assert!(!rent_due(29, 30));
        assert!(rent_due(30, 30));
        assert!(rent_due(60, 30));
        assert!(!rent_due(61, 30));
    }

    #[test]
    fn coin_flip_uses_one_draw() {
        let mut rng = ScriptedRng::new([0.2, 0.8]);
        assert_eq!(MarketDirection::roll(&mut rng), MarketDirection::Up);
        assert_eq!(MarketDirection::roll(&mut rng), MarketDirection::Down);
    }
}
