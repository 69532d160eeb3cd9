//! Random event selection at the progress thresholds.

use crate::{config::EventConfig, rng::RandomSource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    None,
    Bugs,
    Hardware,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RandomEvent {
    None,
    Bugs { clicks_required: u32 },
    Hardware,
}

impl RandomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::None       => EventKind::None,
            Self::Bugs { .. } => EventKind::Bugs,
            Self::Hardware   => EventKind::Hardware,
        }
    }
}

/// Classify one uniform draw in [0, 1).
pub fn classify(r: f64, config: &EventConfig) -> EventKind {
    if r < config.none_below {
        EventKind::None
    } else if r < config.bugs_below {
        EventKind::Bugs
    } else {
        EventKind::Hardware
    }
}

/// Draw an event. Bugs consume a second draw for the click requirement.
pub fn select(rng: &mut dyn RandomSource, config: &EventConfig) -> RandomEvent {
    match classify(rng.next_f64(), config) {
        EventKind::None     => RandomEvent::None,
        EventKind::Hardware => RandomEvent::Hardware,
        EventKind::Bugs => RandomEvent::Bugs {
            clicks_required: rng.range_u32_inclusive(config.bugs_clicks_min, config.bugs_clicks_max),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GameConfig, rng::{GameRng, ScriptedRng}};

    fn events() -> EventConfig {
        GameConfig::default().balance.events
    }

    #[test]
    fn thirds() {
        let c = events();
        assert_eq!(classify(0.0, &c), EventKind::None);
        assert_eq!(classify(0.333, &c), EventKind::None);
        assert_eq!(classify(1.0 / 3.0, &c), EventKind::Bugs);
        assert_eq!(classify(0.666, &c), EventKind::Bugs);
        assert_eq!(classify(2.0 / 3.0, &c), EventKind::Hardware);
        assert_eq!(classify(0.999, &c), EventKind::Hardware);
    }

    #[test]
    fn bugs_requirement_in_range() {
        let c = events();
        let mut rng = GameRng::new(99, 0);
        let mut seen_bugs = 0;
        for _ in 0..2_000 {
            if let RandomEvent::Bugs { clicks_required } = select(&mut rng, &c) {
                assert!((50..=150).contains(&clicks_required));
                seen_bugs += 1;
            }
        }
        assert!(seen_bugs > 400, "bugs should be roughly a third of draws, saw {seen_bugs}");
    }

    #[test]
    fn scripted_bugs_draw() {
        let c = events();
        let mut rng = ScriptedRng::new([0.5, 0.0]);
        assert_eq!(select(&mut rng, &c), RandomEvent::Bugs { clicks_required: 50 });
    }
}
