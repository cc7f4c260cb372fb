// Trade analysis orchestration.
//
// Composes the valuation pipeline, the standings simulator, and the roster
// fit evaluator into one complete trade evaluation: who gains value, how
// the categories move, whether the rosters still make sense, and a final
// fairness verdict. The analysis is an immutable record; committing or
// rejecting the trade is the caller's business.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{Category, LeagueSettings};
use crate::error::EngineError;
use crate::player::{FantasyTeam, Player};
use crate::standings::{simulate_trade_standings, StandingsSnapshot, TradeSimulation};
use crate::trade::roster_fit::{evaluate_roster_fit, RosterFit};
use crate::valuation::auction::{value_player_pool, valued_player, ValuedPlayer};
use crate::valuation::inflation::is_keeper;

const VALUE_GAP_WARNING: f64 = 20.0;
const SALARY_GAP_WARNING: f64 = 30.0;

// ---------------------------------------------------------------------------
// Proposal
// ---------------------------------------------------------------------------

/// A proposed trade between two teams. Ephemeral: built per request and
/// never mutates any roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeProposal {
    pub team_a: String,
    pub team_b: String,
    /// Player IDs team A sends to team B.
    pub sends_a: Vec<String>,
    /// Player IDs team B sends to team A.
    pub sends_b: Vec<String>,
}

// ---------------------------------------------------------------------------
// Analysis output
// ---------------------------------------------------------------------------

/// How one scoring category moves for a team if the trade goes through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryImpact {
    pub category: Category,
    pub before_value: Option<f64>,
    pub after_value: Option<f64>,
    pub before_rank: usize,
    pub after_rank: usize,
    /// Positive means the team climbs in this category.
    pub rank_delta: i32,
}

/// One team's half of the analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeSide {
    pub team_id: String,
    pub team_name: String,
    pub players_in: Vec<String>,
    pub players_out: Vec<String>,
    pub value_in: f64,
    pub value_out: f64,
    pub salary_in: f64,
    pub salary_out: f64,
    pub category_impacts: Vec<CategoryImpact>,
    pub roster_fit: RosterFit,
    pub rank_before: usize,
    pub rank_after: usize,
}

/// The complete, immutable result of analyzing one trade proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeAnalysis {
    pub side_a: TradeSide,
    pub side_b: TradeSide,
    /// 0 to 100; 50 is perfectly fair, above 50 favors side A.
    pub fairness_score: f64,
    pub warnings: Vec<String>,
    pub recommendation: String,
    pub standings: TradeSimulation,
    pub generated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Dollar value of a traded player, falling back to the floor for players
/// the valuation pipeline skipped (no projection).
fn traded_value(pool: &[ValuedPlayer], player_id: &str, league: &LeagueSettings) -> f64 {
    valued_player(pool, player_id).map_or(league.min_value, |p| p.dollar_value)
}

fn category_impacts(
    before: &StandingsSnapshot,
    after: &StandingsSnapshot,
    team_id: &str,
) -> Vec<CategoryImpact> {
    let Some(before_team) = before.team(team_id) else {
        return Vec::new();
    };
    let Some(after_team) = after.team(team_id) else {
        return Vec::new();
    };
    before_team
        .categories
        .iter()
        .filter_map(|b| {
            let a = after_team.category(b.category)?;
            Some(CategoryImpact {
                category: b.category,
                before_value: b.value,
                after_value: a.value,
                before_rank: b.rank,
                after_rank: a.rank,
                rank_delta: b.rank as i32 - a.rank as i32,
            })
        })
        .collect()
}

fn fairness(value_in_a: f64, value_out_a: f64) -> f64 {
    let total = value_in_a + value_out_a;
    if total <= 0.0 {
        return 50.0;
    }
    (50.0 + (value_in_a - value_out_a) / total * 50.0).clamp(0.0, 100.0)
}

fn recommendation(score: f64, side_a: &TradeSide, side_b: &TradeSide) -> String {
    let verdict = if score > 60.0 {
        format!("favors {}", side_a.team_name)
    } else if score < 40.0 {
        format!("favors {}", side_b.team_name)
    } else {
        "roughly balanced in value".to_string()
    };
    let fit = if side_a.roster_fit.score >= 70.0 && side_b.roster_fit.score >= 70.0 {
        "both rosters stay well constructed"
    } else if side_a.roster_fit.score < 50.0 {
        "it weakens the receiving roster's construction for side A"
    } else if side_b.roster_fit.score < 50.0 {
        "it weakens the receiving roster's construction for side B"
    } else {
        "roster construction is acceptable on both sides"
    };
    format!("This trade is {verdict}; {fit}.")
}

/// Analyze a trade proposal against the full league.
///
/// Values every rostered player, reruns the standings with and without the
/// trade, scores roster fit for both sides, and synthesizes fairness,
/// warnings, and a recommendation. Valuation must precede the simulation
/// and fit passes; both must finish before the verdict is assembled.
pub fn analyze_trade(
    teams: &[FantasyTeam],
    proposal: &TradeProposal,
    league: &LeagueSettings,
) -> Result<TradeAnalysis, EngineError> {
    let find_team = |id: &str| {
        teams
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineError::UnknownTeam { id: id.into() })
    };
    let team_a = find_team(&proposal.team_a)?;
    let team_b = find_team(&proposal.team_b)?;
    info!(
        team_a = %team_a.id,
        team_b = %team_b.id,
        sends_a = proposal.sends_a.len(),
        sends_b = proposal.sends_b.len(),
        "analyzing trade"
    );

    // Valuation over every rostered player in the league.
    let all_players: Vec<Player> = teams.iter().flat_map(|t| t.roster.iter().cloned()).collect();
    let pool = value_player_pool(&all_players, league)?;

    // Standings with and without the trade; also validates the proposal.
    let standings = simulate_trade_standings(
        teams,
        league,
        &proposal.team_a,
        &proposal.team_b,
        &proposal.sends_a,
        &proposal.sends_b,
    )?;

    let collect_players = |team: &FantasyTeam, ids: &[String]| -> Vec<Player> {
        ids.iter()
            .filter_map(|id| team.player(id).cloned())
            .collect()
    };
    let a_sends = collect_players(team_a, &proposal.sends_a);
    let b_sends = collect_players(team_b, &proposal.sends_b);

    let side_value = |ids: &[String]| -> f64 {
        ids.iter().map(|id| traded_value(&pool, id, league)).sum()
    };
    let side_salary = |players: &[Player]| -> f64 { players.iter().map(|p| p.salary()).sum() };

    let build_side = |team: &FantasyTeam, incoming: &[Player], outgoing: &[Player], out_ids: &[String], in_ids: &[String]| {
        TradeSide {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            players_in: in_ids.to_vec(),
            players_out: out_ids.to_vec(),
            value_in: side_value(in_ids),
            value_out: side_value(out_ids),
            salary_in: side_salary(incoming),
            salary_out: side_salary(outgoing),
            category_impacts: category_impacts(&standings.before, &standings.after, &team.id),
            roster_fit: evaluate_roster_fit(&team.roster, incoming, out_ids, league),
            rank_before: standings.before.team(&team.id).map_or(0, |t| t.rank),
            rank_after: standings.after.team(&team.id).map_or(0, |t| t.rank),
        }
    };
    let side_a = build_side(team_a, &b_sends, &a_sends, &proposal.sends_a, &proposal.sends_b);
    let side_b = build_side(team_b, &a_sends, &b_sends, &proposal.sends_b, &proposal.sends_a);

    let fairness_score = fairness(side_a.value_in, side_a.value_out);

    // Warnings.
    let mut warnings = Vec::new();
    let value_gap = (side_a.value_in - side_a.value_out).abs();
    if value_gap > VALUE_GAP_WARNING {
        warnings.push(format!("trade value gap of ${value_gap:.1} exceeds ${VALUE_GAP_WARNING:.0}"));
    }
    for id in proposal.sends_a.iter().chain(proposal.sends_b.iter()) {
        if let Some(vp) = valued_player(&pool, id) {
            if is_keeper(vp) {
                warnings.push(format!("keeper {} is being traded away", vp.name));
            }
        }
    }
    let salary_gap = (side_a.salary_in - side_a.salary_out).abs();
    if salary_gap > SALARY_GAP_WARNING {
        warnings.push(format!("salary gap of ${salary_gap:.1} exceeds ${SALARY_GAP_WARNING:.0}"));
    }

    let recommendation = recommendation(fairness_score, &side_a, &side_b);

    Ok(TradeAnalysis {
        side_a,
        side_b,
        fairness_score,
        warnings,
        recommendation,
        standings,
        generated_at: Utc::now(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
