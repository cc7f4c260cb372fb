// Positional scarcity analysis.
//
// Groups the valued pool by primary position and compares each position's
// average dollar value to the league-wide average. A position whose
// rosterable players are worth noticeably more than the pool at large is
// scarce; one worth noticeably less is deep.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::player::position::Position;
use crate::valuation::auction::ValuedPlayer;

const SCARCE_THRESHOLD: f64 = 1.2;
const DEEP_THRESHOLD: f64 = 0.8;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScarcityTier {
    Scarce,
    Normal,
    Deep,
}

impl fmt::Display for ScarcityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScarcityTier::Scarce => "scarce",
            ScarcityTier::Normal => "normal",
            ScarcityTier::Deep => "deep",
        };
        write!(f, "{s}")
    }
}

/// Value distribution for one position within the rosterable pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionScarcity {
    pub position: Position,
    pub player_count: usize,
    pub avg_value: f64,
    pub median_value: f64,
    pub top_value: f64,
    /// Minimum value among the rosterable players at this position.
    pub replacement_value: f64,
    /// League average value over this position's average value.
    pub scarcity_multiplier: f64,
    pub tier: ScarcityTier,
}

fn classify(multiplier: f64) -> ScarcityTier {
    if multiplier > SCARCE_THRESHOLD {
        ScarcityTier::Scarce
    } else if multiplier < DEEP_THRESHOLD {
        ScarcityTier::Deep
    } else {
        ScarcityTier::Normal
    }
}

fn median(sorted_desc: &[f64]) -> f64 {
    let n = sorted_desc.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted_desc[n / 2]
    } else {
        (sorted_desc[n / 2 - 1] + sorted_desc[n / 2]) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Analyze positional scarcity over a valued pool.
///
/// Only players worth more than the dollar floor are considered part of
/// the rosterable pool. Positions with no such players are omitted rather
/// than reported as zero entries. Output is sorted scarcest first.
pub fn analyze_scarcity(pool: &[ValuedPlayer], min_value: f64) -> Vec<PositionScarcity> {
    let rosterable: Vec<&ValuedPlayer> = pool
        .iter()
        .filter(|p| p.dollar_value > min_value)
        .collect();
    if rosterable.is_empty() {
        return Vec::new();
    }

    let league_avg: f64 =
        rosterable.iter().map(|p| p.dollar_value).sum::<f64>() / rosterable.len() as f64;

    let mut by_position: HashMap<Position, Vec<f64>> = HashMap::new();
    for vp in &rosterable {
        by_position
            .entry(vp.primary_position)
            .or_default()
            .push(vp.dollar_value);
    }

    let mut table: Vec<PositionScarcity> = by_position
        .into_iter()
        .map(|(position, mut values)| {
            values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
            let avg = values.iter().sum::<f64>() / values.len() as f64;
            let multiplier = league_avg / avg;
            PositionScarcity {
                position,
                player_count: values.len(),
                avg_value: avg,
                median_value: median(&values),
                top_value: values[0],
                replacement_value: *values.last().unwrap_or(&0.0),
                scarcity_multiplier: multiplier,
                tier: classify(multiplier),
            }
        })
        .collect();

    table.sort_by(|a, b| {
        b.scarcity_multiplier
            .partial_cmp(&a.scarcity_multiplier)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    table
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
