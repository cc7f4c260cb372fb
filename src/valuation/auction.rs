// Auction dollar value conversion.
//
// Turns a full player pool's SGP scores into dollar values that sum to the
// league budget. Each player is measured against the replacement level at
// their primary position (VORP), and the league's total dollars are
// distributed proportionally to positive VORP. Everyone else gets the
// dollar floor.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LeagueSettings;
use crate::error::EngineError;
use crate::player::contract::Contract;
use crate::player::position::Position;
use crate::player::Player;
use crate::valuation::sgp::{compute_sgp, SgpBreakdown};

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A player carried through the valuation pipeline with computed outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuedPlayer {
    pub player_id: String,
    pub name: String,
    pub positions: Vec<Position>,
    pub primary_position: Position,
    pub contract: Option<Contract>,
    pub sgp: SgpBreakdown,
    pub vorp: f64,
    pub dollar_value: f64,
    /// Whether the player clears the replacement level at their position.
    pub above_replacement: bool,
}

impl ValuedPlayer {
    pub fn salary(&self) -> f64 {
        self.contract.as_ref().map_or(0.0, |c| c.salary)
    }
}

// ---------------------------------------------------------------------------
// Replacement level
// ---------------------------------------------------------------------------

/// Index of the replacement-level player within a position bucket:
/// the configured depth scaled to league size, floored to an integer.
pub fn replacement_index(depth: usize, num_teams: usize) -> usize {
    (depth as f64 * num_teams as f64 / 12.0).floor() as usize
}

/// Replacement SGP for one position bucket (sorted descending by SGP).
///
/// Falls back to the weakest player when the bucket is shallower than the
/// threshold, and to 0 for an empty bucket. A single-player bucket still
/// yields a (degenerate) replacement level from that player.
fn replacement_sgp(bucket: &[f64], depth: usize, num_teams: usize) -> f64 {
    let idx = replacement_index(depth, num_teams);
    if let Some(&sgp) = bucket.get(idx) {
        sgp
    } else {
        bucket.last().copied().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Pool valuation
// ---------------------------------------------------------------------------

/// Round a dollar value to one decimal place.
pub fn round_dollars(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Value a full player pool.
///
/// Algorithm:
/// 1. Compute SGP for every player with a projection and bucket by
///    primary position.
/// 2. Sort each bucket descending by SGP and find its replacement level.
/// 3. VORP = player SGP minus the position's replacement SGP.
/// 4. Distribute `budget * num_teams` proportionally to positive VORP;
///    players at or below replacement get the dollar floor.
/// 5. Round to one decimal and return sorted descending by value.
///
/// Players without a projection are skipped entirely. If the pool has no
/// positive VORP at all, every player gets the floor.
pub fn value_player_pool(
    players: &[Player],
    league: &LeagueSettings,
) -> Result<Vec<ValuedPlayer>, EngineError> {
    if league.num_teams == 0 {
        return Err(EngineError::EmptyLeague);
    }

    // 1. SGP and position buckets.
    let mut valued: Vec<ValuedPlayer> = Vec::new();
    for player in players {
        let Some(projection) = &player.projection else {
            continue;
        };
        let sgp = compute_sgp(projection, player.is_pitcher(), league);
        valued.push(ValuedPlayer {
            player_id: player.id.clone(),
            name: player.name.clone(),
            positions: player.positions.clone(),
            primary_position: player.primary_position(),
            contract: player.contract.clone(),
            sgp,
            vorp: 0.0,
            dollar_value: league.min_value,
            above_replacement: false,
        });
    }

    let mut buckets: HashMap<Position, Vec<f64>> = HashMap::new();
    for vp in &valued {
        buckets
            .entry(vp.primary_position)
            .or_default()
            .push(vp.sgp.total);
    }
    for bucket in buckets.values_mut() {
        bucket.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    }

    // 2. Replacement level per position.
    let replacement: HashMap<Position, f64> = buckets
        .iter()
        .map(|(&pos, bucket)| {
            let repl = replacement_sgp(bucket, league.depth_for(pos), league.num_teams);
            (pos, repl)
        })
        .collect();

    // 3. VORP.
    for vp in &mut valued {
        let repl = replacement
            .get(&vp.primary_position)
            .copied()
            .unwrap_or(0.0);
        vp.vorp = vp.sgp.total - repl;
        vp.above_replacement = vp.vorp > 0.0;
    }

    // 4. Dollars proportional to positive VORP.
    let total_positive_vorp: f64 = valued.iter().filter(|p| p.vorp > 0.0).map(|p| p.vorp).sum();
    let total_budget = league.budget * league.num_teams as f64;
    debug!(
        pool = valued.len(),
        total_positive_vorp, total_budget, "valuing player pool"
    );

    for vp in &mut valued {
        let raw = if vp.vorp > 0.0 && total_positive_vorp > 0.0 {
            (vp.vorp * total_budget / total_positive_vorp).max(league.min_value)
        } else {
            league.min_value
        };
        vp.dollar_value = round_dollars(raw);
    }

    // 5. Sort descending by dollar value, ties broken by VORP.
    valued.sort_by(|a, b| {
        b.dollar_value
            .partial_cmp(&a.dollar_value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.vorp
                    .partial_cmp(&a.vorp)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    Ok(valued)
}

/// Look up a valued player by ID.
pub fn valued_player<'a>(pool: &'a [ValuedPlayer], player_id: &str) -> Option<&'a ValuedPlayer> {
    pool.iter().find(|p| p.player_id == player_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
