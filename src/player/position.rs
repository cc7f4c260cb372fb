// Position tags and primary-position resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Baseball positions used for eligibility and roster slot assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Catcher,
    FirstBase,
    SecondBase,
    ThirdBase,
    ShortStop,
    Outfield,
    StartingPitcher,
    ReliefPitcher,
    DesignatedHitter,
    Utility,
    Bench,
}

/// Priority order used to resolve a player's primary position from their
/// eligibility set. First matching eligibility wins, so a C/1B player is
/// primarily a catcher and a SS/OF player is primarily a shortstop.
pub const PRIMARY_PRIORITY: &[Position] = &[
    Position::Catcher,
    Position::ShortStop,
    Position::SecondBase,
    Position::ThirdBase,
    Position::FirstBase,
    Position::Outfield,
    Position::StartingPitcher,
    Position::ReliefPitcher,
    Position::DesignatedHitter,
    Position::Utility,
];

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Handles the common abbreviations:
    /// - "1B" -> FirstBase, "2B" -> SecondBase, "3B" -> ThirdBase
    /// - "LF"/"CF"/"RF" collapse to the generic Outfield slot
    /// - "UTIL"/"UT" -> Utility, "BE"/"BN" -> Bench
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "C" => Some(Position::Catcher),
            "1B" => Some(Position::FirstBase),
            "2B" => Some(Position::SecondBase),
            "3B" => Some(Position::ThirdBase),
            "SS" => Some(Position::ShortStop),
            "OF" | "LF" | "CF" | "RF" => Some(Position::Outfield),
            "SP" => Some(Position::StartingPitcher),
            "RP" => Some(Position::ReliefPitcher),
            "DH" => Some(Position::DesignatedHitter),
            "UTIL" | "UT" => Some(Position::Utility),
            "BE" | "BN" => Some(Position::Bench),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::ShortStop => "SS",
            Position::Outfield => "OF",
            Position::StartingPitcher => "SP",
            Position::ReliefPitcher => "RP",
            Position::DesignatedHitter => "DH",
            Position::Utility => "UTIL",
            Position::Bench => "BE",
        }
    }

    /// Whether this position is a hitting position (not a pitcher slot).
    pub fn is_hitter(&self) -> bool {
        !matches!(
            self,
            Position::StartingPitcher | Position::ReliefPitcher | Position::Bench
        )
    }

    /// Whether this is a pitching position.
    pub fn is_pitcher(&self) -> bool {
        matches!(self, Position::StartingPitcher | Position::ReliefPitcher)
    }

    /// Whether this is a meta-slot rather than a concrete playing position.
    pub fn is_meta_slot(&self) -> bool {
        matches!(self, Position::Utility | Position::Bench)
    }

    /// Index into the primary priority order; positions outside the list
    /// (the bench meta-slot) sort last.
    pub fn priority_index(&self) -> usize {
        PRIMARY_PRIORITY
            .iter()
            .position(|p| p == self)
            .unwrap_or(PRIMARY_PRIORITY.len())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Resolve a player's primary position from their eligibility set.
///
/// Eligibility is order-insensitive; the priority list decides. Returns
/// `Utility` for an empty eligibility set so the player still buckets
/// somewhere downstream.
pub fn primary_position(eligible: &[Position]) -> Position {
    for &pos in PRIMARY_PRIORITY {
        if eligible.contains(&pos) {
            return pos;
        }
    }
    Position::Utility
}
