// Standings Gain Points (SGP) calculation.
//
// Converts one player's projected stat line into an estimate of how many
// standings points it is worth. Counting categories contribute their
// season total divided by the category's SGP multiplier. Rate categories
// contribute the distance from the league baseline, scaled by the player's
// share of an assumed team total of playing time (the dilution factor): a
// part-time hitter's .320 average moves a team's composite average far
// less than a full-time hitter's does.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{Category, CategorySettings, LeagueSettings};
use crate::player::stats::PlayerStats;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Total SGP plus the per-category contributions that sum to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SgpBreakdown {
    pub total: f64,
    pub categories: HashMap<Category, f64>,
}

impl SgpBreakdown {
    pub fn category(&self, category: Category) -> f64 {
        self.categories.get(&category).copied().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Per-category formulas
// ---------------------------------------------------------------------------

/// Counting category SGP: `value / multiplier * weight`.
pub fn counting_sgp(value: f64, settings: &CategorySettings) -> f64 {
    value / settings.multiplier * settings.weight
}

/// Rate category SGP:
/// `(rate - baseline) / multiplier * weight * dilution`, with the
/// subtraction flipped for inverse categories (ERA, WHIP) where lower is
/// better.
///
/// A missing rate (zero denominator in the underlying components) yields
/// zero contribution rather than an error: no sample means no impact on a
/// team's composite rate.
pub fn rate_sgp(rate: Option<f64>, dilution: f64, settings: &CategorySettings) -> f64 {
    let Some(rate) = rate else {
        return 0.0;
    };
    let edge = if settings.inverse {
        settings.baseline - rate
    } else {
        rate - settings.baseline
    };
    edge / settings.multiplier * settings.weight * dilution
}

// ---------------------------------------------------------------------------
// Whole-player computation
// ---------------------------------------------------------------------------

/// Compute SGP for one player's projection.
///
/// Hitters accumulate only the hitting categories and pitchers only the
/// pitching categories; there is no cross-contamination. The dilution
/// factor is the player's share of the assumed team playing time: PA over
/// `team_pa` for hitters, IP over `team_ip` for pitchers.
pub fn compute_sgp(stats: &PlayerStats, is_pitcher: bool, league: &LeagueSettings) -> SgpBreakdown {
    let categories: &[CategorySettings] = if is_pitcher {
        &league.pitching_categories
    } else {
        &league.hitting_categories
    };

    let dilution = if is_pitcher {
        stats.ip / league.team_ip
    } else {
        stats.pa as f64 / league.team_pa
    };

    let mut breakdown = SgpBreakdown::default();
    for cat in categories {
        let sgp = if cat.category.is_rate() {
            rate_sgp(cat.category.rate_value(stats), dilution, cat)
        } else {
            counting_sgp(cat.category.counting_value(stats), cat)
        };
        breakdown.total += sgp;
        breakdown.categories.insert(cat.category, sgp);
    }
    breakdown
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
