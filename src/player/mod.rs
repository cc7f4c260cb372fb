// Player and team data model.

pub mod contract;
pub mod position;
pub mod stats;

use serde::{Deserialize, Serialize};

use contract::Contract;
use position::{primary_position, Position};
use stats::PlayerStats;

/// One player in the league universe.
///
/// Valuation outputs (SGP, VORP, dollar values) live on the pipeline's
/// `ValuedPlayer` records rather than here: the core never mutates its
/// inputs, so a `Player` carries only identity, eligibility, contract, and
/// projection data handed in by the calling layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    /// Eligible positions. Order-insensitive for eligibility checks; the
    /// primary position is resolved through the fixed priority list.
    pub positions: Vec<Position>,
    #[serde(default)]
    pub contract: Option<Contract>,
    /// Rest-of-season projected totals. Players without a projection are
    /// skipped by the valuation pipeline.
    #[serde(default)]
    pub projection: Option<PlayerStats>,
    /// Owning fantasy team, if rostered. A player belongs to at most one
    /// team at a time.
    #[serde(default)]
    pub team_id: Option<String>,
}

impl Player {
    /// The player's primary position, first-match-wins over the priority
    /// order C, SS, 2B, 3B, 1B, OF, SP, RP, DH, UTIL.
    pub fn primary_position(&self) -> Position {
        primary_position(&self.positions)
    }

    /// A player is a pitcher iff their primary position is SP or RP.
    pub fn is_pitcher(&self) -> bool {
        self.primary_position().is_pitcher()
    }

    /// Contract salary, or zero when unsigned.
    pub fn salary(&self) -> f64 {
        self.contract.as_ref().map_or(0.0, |c| c.salary)
    }

    /// Whether the player carries an explicit keeper designation.
    pub fn is_flagged_keeper(&self) -> bool {
        self.contract.as_ref().is_some_and(|c| c.keeper)
    }
}

/// A fantasy team: roster, budget, and spend.
///
/// Standings rank and roto points are derived values recomputed by the
/// standings simulator; they are intentionally not fields here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FantasyTeam {
    pub id: String,
    pub name: String,
    /// Roster composition, not ownership: players can be reassigned
    /// between teams by the calling layer (e.g. when a trade commits).
    pub roster: Vec<Player>,
    pub budget: f64,
    #[serde(default)]
    pub spent: f64,
}

impl FantasyTeam {
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == player_id)
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.player(player_id).is_some()
    }
}
