//! Progression formulas. Pure, deterministic, no state.
//!
//! Every function clamps its inputs at the boundary so no negative,
//! NaN or infinite value ever escapes: a non-positive cost or rate is
//! treated as the base case, and overflowing growth saturates at f64::MAX.

use crate::state::Automation;

/// Exponential cost growth per level.
pub const COST_GROWTH: f64 = 1.15;

/// Weight of lifetime deliveries in the prestige multiplier.
pub const PRESTIGE_WEIGHT: f64 = 0.1;

/// Cost of buying the next level of an upgrade.
///
/// `base * 1.15^level * (ln(1 + level) + 1)`, floored; level 0 costs `base`.
pub fn upgrade_cost(base_cost: f64, current_level: u32) -> f64 {
    let base = sanitize(base_cost);
    if current_level == 0 || base == 0.0 {
        return base;
    }
    let level = current_level as f64;
    let exponential = COST_GROWTH.powf(level);
    let log_modifier = (1.0 + level).ln() + 1.0;
    saturate((base * exponential * log_modifier).floor())
}

/// Points per second produced by one automation at `level`.
pub fn production_rate(base_rate: f64, level: u32) -> f64 {
    if level == 0 {
        return 0.0;
    }
    let level = level as f64;
    let log_modifier = (1.0 + level / 2.0).ln() + 1.0;
    saturate(sanitize(base_rate) * level * log_modifier)
}

/// Progress gained by one click at project `level`, with diminishing
/// returns from level 3 onwards.
pub fn click_progress(base_progress: f64, level: u32) -> f64 {
    let base = sanitize(base_progress);
    if level < 3 {
        return base;
    }
    let diminishing = 1.0 / ((1.0 + level as f64 / 3.0).ln() + 0.5);
    saturate(base * diminishing)
}

/// Global reward multiplier from lifetime deliveries. Always >= 1.
pub fn prestige_multiplier(total_apps_delivered: u64) -> f64 {
    (total_apps_delivered as f64 + 1.0).ln() * PRESTIGE_WEIGHT + 1.0
}

/// Sum of production over every automation.
pub fn total_production(automations: &[Automation]) -> f64 {
    saturate(
        automations
            .iter()
            .map(|a| production_rate(a.base_production_rate, a.current_level))
            .sum(),
    )
}

/// Compact display form: whole units below a thousand, then one decimal
/// with a K, M, B or T suffix. Negative values keep their sign; NaN shows as 0.
pub fn format_number(num: f64) -> String {
    if num.is_nan() {
        return "0".to_string();
    }
    let sign = if num < 0.0 { "-" } else { "" };
    let n = num.abs();
    if n < 1e3 {
        return format!("{sign}{}", n.floor());
    }
    let (scaled, suffix) = if n < 1e6 {
        (n / 1e3, "K")
    } else if n < 1e9 {
        (n / 1e6, "M")
    } else if n < 1e12 {
        (n / 1e9, "B")
    } else {
        (n / 1e12, "T")
    };
    format!("{sign}{scaled:.1}{suffix}")
}

fn sanitize(x: f64) -> f64 {
    if x.is_nan() || x <= 0.0 {
        0.0
    } else {
        saturate(x)
    }
}

fn saturate(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.min(f64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_zero_costs_base() {
        assert_eq!(upgrade_cost(10.0, 0), 10.0);
        assert_eq!(upgrade_cost(5000.0, 0), 5000.0);
    }

    #[test]
    fn second_level_cost_matches_closed_form() {
        // floor(10 * 1.15 * (ln 2 + 1)) = floor(19.47...)
        assert_eq!(upgrade_cost(10.0, 1), 19.0);
    }

    #[test]
    fn production_at_level_three() {
        let rate = production_rate(2.0, 3);
        let expected = 2.0 * 3.0 * ((2.5f64).ln() + 1.0);
        assert!((rate - expected).abs() < 1e-12);
        assert!((rate - 11.4977).abs() < 1e-3, "rate = {rate}");
    }

    #[test]
    fn click_progress_flat_below_level_three() {
        assert_eq!(click_progress(4.0, 1), 4.0);
        assert_eq!(click_progress(4.0, 2), 4.0);
        assert!(click_progress(4.0, 3) < 4.0 / 1.1);
        assert!(click_progress(4.0, 30) < click_progress(4.0, 3));
    }

    #[test]
    fn prestige_starts_at_one() {
        assert_eq!(prestige_multiplier(0), 1.0);
        assert!((prestige_multiplier(1) - (1.0 + 2f64.ln() * 0.1)).abs() < 1e-12);
    }

    #[test]
    fn bad_inputs_never_escape() {
        assert_eq!(upgrade_cost(-5.0, 3), 0.0);
        assert_eq!(upgrade_cost(f64::NAN, 3), 0.0);
        assert_eq!(production_rate(-1.0, 4), 0.0);
        assert_eq!(click_progress(f64::NAN, 9), 0.0);
        let huge = upgrade_cost(5000.0, u32::MAX);
        assert!(huge.is_finite());
        assert!(production_rate(f64::MAX, u32::MAX).is_finite());
    }

    #[test]
    fn format_number_uses_compact_suffixes() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.9), "999");
        assert_eq!(format_number(1_000.0), "1.0K");
        assert_eq!(format_number(12_340.0), "12.3K");
        assert_eq!(format_number(2_500_000.0), "2.5M");
        assert_eq!(format_number(7_000_000_000.0), "7.0B");
        assert_eq!(format_number(3.2e13), "32.0T");
        assert_eq!(format_number(-800.0), "-800");
        assert_eq!(format_number(-4_200.0), "-4.2K");
        assert_eq!(format_number(f64::NAN), "0");
    }
}
