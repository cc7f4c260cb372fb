// Roster fit scoring.
//
// Measures how well a trade's incoming players repair (or damage) a team's
// positional slot coverage. Slot assignment uses a greedy heuristic, most
// constrained player first, each placed into the eligible open slot with
// the least remaining capacity. This is a known approximation, not a full
// bipartite matching; an exact max-flow assignment would be a behavior
// change and should be flagged as one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::LeagueSettings;
use crate::player::position::Position;
use crate::player::Player;

const NEED_WEIGHT: f64 = 40.0;
const MULTI_ELIGIBILITY_CAP: f64 = 20.0;
const COVERAGE_WEIGHT: f64 = 25.0;
const BENCH_WEIGHT: f64 = 15.0;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Roster fit evaluation for one side of a trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFit {
    /// Composite score, 0 to 100.
    pub score: f64,
    /// Positional need component (0 to 40).
    pub need_score: f64,
    /// Multi-eligibility bonus (0 to 20).
    pub multi_eligibility_bonus: f64,
    /// Slot coverage component (0 to 25).
    pub coverage_score: f64,
    /// Bench depth component (0 to 15).
    pub bench_score: f64,
    /// Positions that go from unfilled to filled.
    pub filled_positions: Vec<Position>,
    /// Positions that go from filled to unfilled.
    pub lost_positions: Vec<Position>,
    pub notes: Vec<String>,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Slot assignment
// ---------------------------------------------------------------------------

/// Result of greedily assigning a roster to the league's starting slots.
#[derive(Debug, Clone)]
struct SlotAssignment {
    /// Slots filled per position, never above the requirement.
    filled: HashMap<Position, usize>,
    /// Players left over after every assignable slot is taken.
    bench: usize,
}

impl SlotAssignment {
    fn total_filled(&self) -> usize {
        self.filled.values().sum()
    }
}

/// Whether a player can occupy a slot at the given position. The utility
/// slot takes any hitter; every other slot requires explicit eligibility.
fn eligible_for_slot(player: &Player, slot: Position) -> bool {
    if slot == Position::Utility {
        !player.is_pitcher()
    } else {
        player.positions.contains(&slot)
    }
}

/// Greedy slot assignment: most constrained player first, least-capacity
/// eligible slot preferred. Unplaced players land on the bench.
fn assign_slots(roster: &[&Player], league: &LeagueSettings) -> SlotAssignment {
    let mut remaining: HashMap<Position, usize> = league
        .roster_slots
        .iter()
        .map(|(&pos, &count)| (pos, count))
        .collect();

    let slot_count = |player: &Player| {
        remaining
            .keys()
            .filter(|&&slot| eligible_for_slot(player, slot))
            .count()
    };
    let mut ordered: Vec<&Player> = roster.to_vec();
    ordered.sort_by_key(|p| slot_count(p));

    let mut bench = 0usize;
    for player in ordered {
        // Least remaining capacity wins; ties resolve through the primary
        // position priority order so assignment stays deterministic.
        let target = remaining
            .iter()
            .filter(|(&slot, &cap)| cap > 0 && eligible_for_slot(player, slot))
            .min_by_key(|(&slot, &cap)| (cap, slot.priority_index()))
            .map(|(&slot, _)| slot);
        match target {
            Some(slot) => {
                if let Some(cap) = remaining.get_mut(&slot) {
                    *cap -= 1;
                }
            }
            None => bench += 1,
        }
    }

    let filled = league
        .roster_slots
        .iter()
        .map(|(&pos, &count)| (pos, count - remaining.get(&pos).copied().unwrap_or(0)))
        .collect();
    SlotAssignment { filled, bench }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Bonus for one incoming player's position flexibility.
fn eligibility_bonus(player: &Player) -> f64 {
    let positions = player
        .positions
        .iter()
        .filter(|p| !p.is_meta_slot())
        .count();
    match positions {
        0 | 1 => 0.0,
        2 => 3.0,
        3 => 5.0,
        _ => 8.0,
    }
}

/// Evaluate how a trade changes a team's positional coverage.
///
/// `roster` is the team's current roster; `incoming` the players it would
/// receive; `outgoing_ids` the players it would send away.
pub fn evaluate_roster_fit(
    roster: &[Player],
    incoming: &[Player],
    outgoing_ids: &[String],
    league: &LeagueSettings,
) -> RosterFit {
    let before_roster: Vec<&Player> = roster.iter().collect();
    let after_roster: Vec<&Player> = roster
        .iter()
        .filter(|p| !outgoing_ids.contains(&p.id))
        .chain(incoming.iter())
        .collect();

    let before = assign_slots(&before_roster, league);
    let after = assign_slots(&after_roster, league);

    let mut notes = Vec::new();
    let mut warnings = Vec::new();

    // Per-position transitions between fully-unfilled and filled.
    let mut filled_positions = Vec::new();
    let mut lost_positions = Vec::new();
    for (&pos, &required) in &league.roster_slots {
        if required == 0 {
            continue;
        }
        let b = before.filled.get(&pos).copied().unwrap_or(0);
        let a = after.filled.get(&pos).copied().unwrap_or(0);
        if a > b && a == required {
            filled_positions.push(pos);
            notes.push(format!("trade fills {}", pos.display_str()));
        } else if a < b && b == required {
            lost_positions.push(pos);
            warnings.push(format!("trade leaves {} short", pos.display_str()));
        }
    }
    filled_positions.sort_by_key(|p| p.display_str());
    lost_positions.sort_by_key(|p| p.display_str());

    // Positional need: share of previously-open slots now covered. A team
    // with nothing open has no need left to satisfy and keeps full marks.
    let total_slots = league.total_slots();
    let unfilled_before = total_slots.saturating_sub(before.total_filled());
    let newly_filled = after.total_filled().saturating_sub(before.total_filled());
    let need_score = if unfilled_before == 0 {
        NEED_WEIGHT
    } else {
        NEED_WEIGHT * (newly_filled.min(unfilled_before) as f64 / unfilled_before as f64)
    };

    // Multi-eligibility bonus for incoming flexibility.
    let multi_eligibility_bonus = incoming
        .iter()
        .map(eligibility_bonus)
        .sum::<f64>()
        .min(MULTI_ELIGIBILITY_CAP);

    // Coverage: share of all required slots filled after the trade.
    let coverage_score = if total_slots == 0 {
        COVERAGE_WEIGHT
    } else {
        COVERAGE_WEIGHT * after.total_filled() as f64 / total_slots as f64
    };

    // Bench depth against the configured target.
    let bench_score = if league.bench_slots == 0 {
        BENCH_WEIGHT
    } else {
        BENCH_WEIGHT * (after.bench.min(league.bench_slots) as f64 / league.bench_slots as f64)
    };
    if after.bench == 0 {
        warnings.push("no bench depth after trade".into());
    }

    let score = (need_score + multi_eligibility_bonus + coverage_score + bench_score)
        .clamp(0.0, 100.0);

    RosterFit {
        score,
        need_score,
        multi_eligibility_bonus,
        coverage_score,
        bench_score,
        filled_positions,
        lost_positions,
        notes,
        warnings,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
