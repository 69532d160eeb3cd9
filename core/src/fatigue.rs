//! Fatigue and the day cycle.
//!
//! Fatigue is pacing, never a hard gate: a click that would reach the
//! maximum rolls the day over instead of blocking. Clicks spent inside a
//! modal cannot roll the day, so their overflow accrues as sleep debt and
//! becomes the next day's starting fatigue.

use crate::economy::rent_due;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FatigueState {
    pub fatigue_level: u32,
    pub max_fatigue: u32,
    pub day_count: u32,
    pub sleep_debt: u32,
}

/// A completed day rollover.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayRollover {
    pub day: u32,
    pub starting_fatigue: u32,
    pub rent_due: bool,
    pub automatic: bool,
}

impl FatigueState {
    pub fn new(max_fatigue: u32) -> Self {
        Self {
            fatigue_level: 0,
            max_fatigue,
            day_count: 0,
            sleep_debt: 0,
        }
    }

    /// Fatigue as a fraction of the maximum, in [0, 1].
    pub fn ratio(&self) -> f64 {
        if self.max_fatigue == 0 {
            return 0.0;
        }
        (self.fatigue_level as f64 / self.max_fatigue as f64).clamp(0.0, 1.0)
    }

    /// Tire from a regular click. Returns the rollover if the day ended.
    pub fn exert(&mut self, amount: u32, rent_interval_days: u32) -> Option<DayRollover> {
        let next = self.fatigue_level.saturating_add(amount);
        if next < self.max_fatigue {
            self.fatigue_level = next;
            return None;
        }
        let starting = self.sleep_debt.min(self.max_fatigue);
        Some(self.start_new_day(starting, rent_interval_days, true))
    }

    /// Tire from a click inside a modal. Excess over the maximum becomes
    /// sleep debt; the day never rolls here.
    pub fn exert_blocked(&mut self, amount: u32) {
        let next = self.fatigue_level.saturating_add(amount);
        if next > self.max_fatigue {
            self.sleep_debt = self.sleep_debt.saturating_add(next - self.max_fatigue);
            self.fatigue_level = self.max_fatigue;
        } else {
            self.fatigue_level = next;
        }
    }

    /// Manual rest: a full night, debt forgiven.
    pub fn sleep(&mut self, rent_interval_days: u32) -> DayRollover {
        self.start_new_day(0, rent_interval_days, false)
    }

    fn start_new_day(&mut self, starting: u32, rent_interval_days: u32, automatic: bool) -> DayRollover {
        self.day_count = self.day_count.saturating_add(1);
        self.fatigue_level = starting;
        self.sleep_debt = 0;
        DayRollover {
            day: self.day_count,
            starting_fatigue: starting,
            rent_due: rent_due(self.day_count, rent_interval_days),
            automatic,
        }
    }
}
