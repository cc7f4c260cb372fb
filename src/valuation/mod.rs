// The valuation pipeline: projections -> SGP -> dollar values, plus the
// scarcity and inflation analyses layered on the valued pool.

pub mod auction;
pub mod inflation;
pub mod scarcity;
pub mod sgp;

pub use auction::{value_player_pool, valued_player, ValuedPlayer};
pub use inflation::{
    apply_inflation, compute_inflation, rank_keeper_candidates, InflationSummary, KeeperCandidate,
};
pub use scarcity::{analyze_scarcity, PositionScarcity, ScarcityTier};
pub use sgp::{compute_sgp, SgpBreakdown};
