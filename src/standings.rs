// Roto standings simulation.
//
// Aggregates each roster into per-category season totals, ranks the teams
// category by category, and awards roto points. Rate categories are
// recomputed from summed counting components; two rate stats are never
// merged by averaging. The trade-simulation mode reruns the identical
// ranking over before and after rosters so category impact can be read
// straight off the two snapshots.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::config::{Category, CategorySettings, LeagueSettings};
use crate::error::EngineError;
use crate::player::stats::PlayerStats;
use crate::player::FantasyTeam;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One team's line in one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStanding {
    pub category: Category,
    /// Season total (counting) or recomputed rate. `None` means the team
    /// has no sample for a rate category and ranks last in it.
    pub value: Option<f64>,
    /// 1 = best in category.
    pub rank: usize,
    /// Roto points: `num_teams - rank + 1`.
    pub points: f64,
    pub weighted_points: f64,
}

/// One team's full standings line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: String,
    pub team_name: String,
    pub categories: Vec<CategoryStanding>,
    pub total_points: f64,
    /// Overall rank, 1 = first place.
    pub rank: usize,
}

impl TeamStanding {
    pub fn category(&self, category: Category) -> Option<&CategoryStanding> {
        self.categories.iter().find(|c| c.category == category)
    }
}

/// A complete standings computation, teams sorted by overall rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsSnapshot {
    pub teams: Vec<TeamStanding>,
}

impl StandingsSnapshot {
    pub fn team(&self, team_id: &str) -> Option<&TeamStanding> {
        self.teams.iter().find(|t| t.team_id == team_id)
    }
}

// ---------------------------------------------------------------------------
// Category totals
// ---------------------------------------------------------------------------

/// A team's season total in one category.
///
/// Counting categories sum the relevant rosters' projections. Rate
/// categories combine the counting components of every relevant player and
/// recompute the rate from the combined line.
fn team_category_value(team: &FantasyTeam, cat: &CategorySettings) -> Option<f64> {
    let relevant = team.roster.iter().filter_map(|p| {
        let projection = p.projection.as_ref()?;
        (p.is_pitcher() == cat.category.is_pitching()).then_some(projection)
    });

    if cat.category.is_rate() {
        let mut combined = PlayerStats::default();
        let mut any = false;
        for stats in relevant {
            combined = combined.combine(stats);
            any = true;
        }
        if !any {
            return None;
        }
        cat.category.rate_value(&combined)
    } else {
        Some(relevant.map(|s| cat.category.counting_value(s)).sum())
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Rank category values best-first.
///
/// Input is `(team index, value)`; output maps team index to rank. Normal
/// categories rank descending, inverse ascending. `None` always ranks
/// behind every concrete value. The sort is stable, so ties keep their
/// incoming order and every rank in 1..=n is assigned exactly once.
fn rank_category(values: &[(usize, Option<f64>)], inverse: bool) -> Vec<(usize, usize)> {
    let mut order: Vec<(usize, Option<f64>)> = values.to_vec();
    order.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(a), Some(b)) => {
            let cmp = a.partial_cmp(b).unwrap_or(Ordering::Equal);
            if inverse {
                cmp
            } else {
                cmp.reverse()
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    order
        .into_iter()
        .enumerate()
        .map(|(i, (team_idx, _))| (team_idx, i + 1))
        .collect()
}

/// Simulate full roto standings for a set of teams.
pub fn simulate_standings(
    teams: &[FantasyTeam],
    league: &LeagueSettings,
) -> Result<StandingsSnapshot, EngineError> {
    if teams.is_empty() {
        return Err(EngineError::EmptyLeague);
    }
    let n = teams.len();
    debug!(teams = n, "simulating standings");

    let mut standings: Vec<TeamStanding> = teams
        .iter()
        .map(|t| TeamStanding {
            team_id: t.id.clone(),
            team_name: t.name.clone(),
            categories: Vec::new(),
            total_points: 0.0,
            rank: 0,
        })
        .collect();

    for cat in league.all_categories() {
        let values: Vec<(usize, Option<f64>)> = teams
            .iter()
            .enumerate()
            .map(|(i, t)| (i, team_category_value(t, cat)))
            .collect();
        let ranks = rank_category(&values, cat.inverse);

        for (team_idx, rank) in ranks {
            let points = (n - rank + 1) as f64;
            let weighted_points = points * cat.weight;
            standings[team_idx].total_points += weighted_points;
            standings[team_idx].categories.push(CategoryStanding {
                category: cat.category,
                value: values[team_idx].1,
                rank,
                points,
                weighted_points,
            });
        }
    }

    // Overall rank by total points, descending; stable for ties.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        standings[b]
            .total_points
            .partial_cmp(&standings[a].total_points)
            .unwrap_or(Ordering::Equal)
    });
    for (i, &team_idx) in order.iter().enumerate() {
        standings[team_idx].rank = i + 1;
    }
    standings.sort_by_key(|t| t.rank);

    Ok(StandingsSnapshot { teams: standings })
}

// ---------------------------------------------------------------------------
// Trade simulation
// ---------------------------------------------------------------------------

/// Standings before and after a hypothetical trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeSimulation {
    pub before: StandingsSnapshot,
    pub after: StandingsSnapshot,
}

/// Clone the league's teams with the traded players swapped between the
/// two sides. Every other team passes through untouched.
pub fn swap_rosters(
    teams: &[FantasyTeam],
    team_a: &str,
    team_b: &str,
    sends_a: &[String],
    sends_b: &[String],
) -> Result<Vec<FantasyTeam>, EngineError> {
    if team_a == team_b {
        return Err(EngineError::SameTeamTrade);
    }
    let find = |id: &str| {
        teams
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineError::UnknownTeam { id: id.into() })
    };
    let a = find(team_a)?;
    let b = find(team_b)?;

    let validate = |team: &FantasyTeam, player_ids: &[String]| {
        for pid in player_ids {
            if !team.has_player(pid) {
                return Err(EngineError::PlayerNotOnTeam {
                    player_id: pid.clone(),
                    team_id: team.id.clone(),
                });
            }
        }
        Ok(())
    };
    validate(a, sends_a)?;
    validate(b, sends_b)?;

    let transfer = |from: &FantasyTeam, to: &FantasyTeam, sent: &[String], received: &[String]| {
        let mut roster: Vec<_> = from
            .roster
            .iter()
            .filter(|p| !sent.contains(&p.id))
            .cloned()
            .collect();
        for pid in received {
            // Validated above, so the lookup cannot miss.
            if let Some(p) = to.player(pid) {
                let mut moved = p.clone();
                moved.team_id = Some(from.id.clone());
                roster.push(moved);
            }
        }
        roster
    };

    Ok(teams
        .iter()
        .map(|t| {
            let mut out = t.clone();
            if t.id == team_a {
                out.roster = transfer(a, b, sends_a, sends_b);
            } else if t.id == team_b {
                out.roster = transfer(b, a, sends_b, sends_a);
            }
            out
        })
        .collect())
}

/// Run the standings simulation in trade mode: identical ranking algorithm
/// over the current rosters and over the rosters with the trade applied.
pub fn simulate_trade_standings(
    teams: &[FantasyTeam],
    league: &LeagueSettings,
    team_a: &str,
    team_b: &str,
    sends_a: &[String],
    sends_b: &[String],
) -> Result<TradeSimulation, EngineError> {
    let before = simulate_standings(teams, league)?;
    let swapped = swap_rosters(teams, team_a, team_b, sends_a, sends_b)?;
    let after = simulate_standings(&swapped, league)?;
    Ok(TradeSimulation { before, after })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
