// Trade evaluation: roster fit scoring and the analysis orchestrator.

pub mod analyzer;
pub mod roster_fit;

pub use analyzer::{analyze_trade, CategoryImpact, TradeAnalysis, TradeProposal, TradeSide};
pub use roster_fit::{evaluate_roster_fit, RosterFit};
