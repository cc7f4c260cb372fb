// Keeper inflation and multi-year keeper projection.
//
// Keepers priced below their auction value shrink the pool of value
// available at the draft without shrinking the money chasing it, so every
// non-keeper dollar value gets scaled up by the inflation rate. The
// multi-year projection then asks, for each keeper, how long the surplus
// survives a 5% annual value decay and rising extension salaries.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LeagueSettings;
use crate::valuation::auction::{round_dollars, ValuedPlayer};

/// Annual compounding value decay applied to forward-year projections.
const VALUE_DECAY: f64 = 0.05;

/// How many forward years to project for an extendable contract.
const EXTENDABLE_HORIZON: u8 = 5;

// ---------------------------------------------------------------------------
// Inflation
// ---------------------------------------------------------------------------

/// League-wide inflation picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InflationSummary {
    pub keeper_count: usize,
    pub total_keeper_salary: f64,
    pub total_keeper_value: f64,
    /// League-wide auction dollars left after keeper salaries.
    pub remaining_budget: f64,
    /// League-wide player value left after keepers are off the board.
    pub remaining_value: f64,
    /// remaining_budget / remaining_value; 1.0 when no meaningful value
    /// remains to spread the money over.
    pub rate: f64,
}

/// Whether a valued player counts as a keeper for inflation purposes.
///
/// A positive salary plus either an explicit keeper flag or a value above
/// the salary. The value test treats an underpriced contract as an
/// implicit signal of retention even when the platform flag is unset.
pub fn is_keeper(vp: &ValuedPlayer) -> bool {
    let Some(contract) = &vp.contract else {
        return false;
    };
    contract.salary > 0.0 && (contract.keeper || vp.dollar_value > contract.salary)
}

/// Compute the league's inflation rate from a valued pool.
pub fn compute_inflation(pool: &[ValuedPlayer], league: &LeagueSettings) -> InflationSummary {
    let keepers: Vec<&ValuedPlayer> = pool.iter().filter(|p| is_keeper(p)).collect();
    let total_keeper_salary: f64 = keepers.iter().map(|p| p.salary()).sum();
    let total_keeper_value: f64 = keepers.iter().map(|p| p.dollar_value).sum();

    let total_budget = league.budget * league.num_teams as f64;
    let remaining_budget = total_budget - total_keeper_salary;
    let remaining_value = total_budget - total_keeper_value;
    let rate = if remaining_value > 0.0 {
        remaining_budget / remaining_value
    } else {
        1.0
    };
    debug!(
        keepers = keepers.len(),
        total_keeper_salary, total_keeper_value, rate, "computed inflation"
    );

    InflationSummary {
        keeper_count: keepers.len(),
        total_keeper_salary,
        total_keeper_value,
        remaining_budget,
        remaining_value,
        rate,
    }
}

/// Scale a base dollar value by the inflation rate.
pub fn apply_inflation(value: f64, rate: f64) -> f64 {
    round_dollars(value * rate)
}

// ---------------------------------------------------------------------------
// Multi-year projection
// ---------------------------------------------------------------------------

/// One forward season of a keeper projection. Year 1 is the upcoming
/// season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearProjection {
    pub year: u8,
    /// Calendar season this projection year lands in.
    pub season: i32,
    pub projected_value: f64,
    pub projected_salary: f64,
    pub surplus: f64,
    /// Whether this year requires extending past the base contract term.
    pub extension_year: bool,
    /// Keep recommendation: projected surplus still positive.
    pub keep: bool,
}

/// A keeper's value trajectory over the projection horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeeperProjection {
    pub player_id: String,
    pub name: String,
    pub years: Vec<YearProjection>,
}

/// Project a keeper's value and salary forward year by year.
///
/// Value decays 5% compounding each forward year. Salary holds at the
/// contract figure through the base term, then rises linearly at the
/// configured extension cost per year. Non-extendable contracts (3rd-year
/// or explicit guaranteed deals) stop exactly at the end of the base term;
/// extendable ones run out to a fixed horizon. Returns `None` for a player
/// with no contract.
pub fn project_keeper_years(
    vp: &ValuedPlayer,
    league: &LeagueSettings,
) -> Option<KeeperProjection> {
    let contract = vp.contract.as_ref()?;
    let horizon = if contract.extendable() {
        contract.years_remaining.max(EXTENDABLE_HORIZON)
    } else {
        contract.years_remaining
    };
    let start_season = Utc::now().year();

    let mut years = Vec::with_capacity(horizon as usize);
    for year in 1..=horizon {
        let projected_value =
            round_dollars(vp.dollar_value * (1.0 - VALUE_DECAY).powi(year as i32 - 1));
        let extension_year = year > contract.years_remaining;
        let projected_salary = if extension_year {
            contract.salary
                + league.extension_cost_per_year * (year - contract.years_remaining) as f64
        } else {
            contract.salary
        };
        let surplus = projected_value - projected_salary;
        years.push(YearProjection {
            year,
            season: start_season + (year as i32 - 1),
            projected_value,
            projected_salary,
            surplus,
            extension_year,
            keep: surplus > 0.0,
        });
    }

    Some(KeeperProjection {
        player_id: vp.player_id.clone(),
        name: vp.name.clone(),
        years,
    })
}

// ---------------------------------------------------------------------------
// Keeper candidates
// ---------------------------------------------------------------------------

/// A keeper ranked by how much inflated value the contract returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeeperCandidate {
    pub player_id: String,
    pub name: String,
    pub salary: f64,
    pub base_value: f64,
    pub inflated_value: f64,
    /// Inflated value minus salary.
    pub surplus: f64,
    pub projection: KeeperProjection,
}

/// Rank the pool's keepers by inflated surplus, best first.
pub fn rank_keeper_candidates(
    pool: &[ValuedPlayer],
    rate: f64,
    league: &LeagueSettings,
) -> Vec<KeeperCandidate> {
    let mut candidates: Vec<KeeperCandidate> = pool
        .iter()
        .filter(|p| is_keeper(p))
        .filter_map(|vp| {
            let projection = project_keeper_years(vp, league)?;
            let inflated_value = apply_inflation(vp.dollar_value, rate);
            Some(KeeperCandidate {
                player_id: vp.player_id.clone(),
                name: vp.name.clone(),
                salary: vp.salary(),
                base_value: vp.dollar_value,
                inflated_value,
                surplus: inflated_value - vp.salary(),
                projection,
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.surplus
            .partial_cmp(&a.surplus)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
