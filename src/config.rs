// League settings: scoring categories, budget, roster slots, and the
// valuation knobs (SGP multipliers, replacement depths, dilution
// constants). Loadable from a league.toml file; every knob has a
// documented default so a missing file or a sparse file still yields a
// usable configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::player::position::Position;
use crate::player::stats::PlayerStats;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read settings file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Scoring categories
// ---------------------------------------------------------------------------

/// A roto scoring category.
///
/// Counting categories score their season total directly; rate categories
/// (AVG, OPS, ERA, WHIP) are recomputed from counting components and
/// scored against a league baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    R,
    HR,
    RBI,
    SB,
    AVG,
    OPS,
    W,
    SV,
    QS,
    K,
    ERA,
    WHIP,
}

impl Category {
    pub fn parse(s: &str) -> Option<Category> {
        match s.to_uppercase().as_str() {
            "R" => Some(Category::R),
            "HR" => Some(Category::HR),
            "RBI" => Some(Category::RBI),
            "SB" => Some(Category::SB),
            "AVG" => Some(Category::AVG),
            "OPS" => Some(Category::OPS),
            "W" => Some(Category::W),
            "SV" => Some(Category::SV),
            "QS" => Some(Category::QS),
            "K" | "SO" => Some(Category::K),
            "ERA" => Some(Category::ERA),
            "WHIP" => Some(Category::WHIP),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::R => "R",
            Category::HR => "HR",
            Category::RBI => "RBI",
            Category::SB => "SB",
            Category::AVG => "AVG",
            Category::OPS => "OPS",
            Category::W => "W",
            Category::SV => "SV",
            Category::QS => "QS",
            Category::K => "K",
            Category::ERA => "ERA",
            Category::WHIP => "WHIP",
        }
    }

    /// Whether this category is a rate stat (derived, never summed).
    pub fn is_rate(&self) -> bool {
        matches!(
            self,
            Category::AVG | Category::OPS | Category::ERA | Category::WHIP
        )
    }

    /// Whether this category belongs to the pitching side of the ledger.
    pub fn is_pitching(&self) -> bool {
        matches!(
            self,
            Category::W | Category::SV | Category::QS | Category::K | Category::ERA | Category::WHIP
        )
    }

    /// Whether lower values win this category by default.
    pub fn default_inverse(&self) -> bool {
        matches!(self, Category::ERA | Category::WHIP)
    }

    /// Extract this category's counting total from a stat line.
    /// Rate categories return 0 here; use `rate_value` for them.
    pub fn counting_value(&self, stats: &PlayerStats) -> f64 {
        match self {
            Category::R => stats.r as f64,
            Category::HR => stats.hr as f64,
            Category::RBI => stats.rbi as f64,
            Category::SB => stats.sb as f64,
            Category::W => stats.w as f64,
            Category::SV => stats.sv as f64,
            Category::QS => stats.qs as f64,
            Category::K => stats.k as f64,
            Category::AVG | Category::OPS | Category::ERA | Category::WHIP => 0.0,
        }
    }

    /// Recompute this rate category from a stat line's components.
    /// `None` when the denominator is missing, and for counting categories.
    pub fn rate_value(&self, stats: &PlayerStats) -> Option<f64> {
        match self {
            Category::AVG => stats.avg(),
            Category::OPS => stats.ops(),
            Category::ERA => stats.era(),
            Category::WHIP => stats.whip(),
            _ => None,
        }
    }

    /// Default SGP multiplier: roughly how much of the stat moves a team
    /// one spot in the standings of a 12-team league.
    fn default_multiplier(&self) -> f64 {
        match self {
            Category::R => 20.0,
            Category::HR => 8.0,
            Category::RBI => 20.0,
            Category::SB => 7.0,
            Category::AVG => 0.0025,
            Category::OPS => 0.004,
            Category::W => 3.0,
            Category::SV => 7.0,
            Category::QS => 4.0,
            Category::K => 30.0,
            Category::ERA => 0.08,
            Category::WHIP => 0.015,
        }
    }

    /// Default baseline for rate categories; 0 for counting categories.
    fn default_baseline(&self) -> f64 {
        match self {
            Category::AVG => 0.260,
            Category::OPS => 0.730,
            Category::ERA => 4.20,
            Category::WHIP => 1.30,
            _ => 0.0,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Fully resolved per-category configuration.
///
/// Resolution is layered: an explicit file setting wins, then the
/// category's built-in default, then the hard-coded fallback (weight 1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySettings {
    pub category: Category,
    pub weight: f64,
    pub inverse: bool,
    /// SGP multiplier (the per-standings-point denominator).
    pub multiplier: f64,
    /// League baseline for rate categories; unused for counting ones.
    pub baseline: f64,
}

impl CategorySettings {
    /// Category defaults: weight 1.0, built-in multiplier and baseline,
    /// inverse iff the category is lower-is-better.
    pub fn default_for(category: Category) -> CategorySettings {
        CategorySettings {
            category,
            weight: 1.0,
            inverse: category.default_inverse(),
            multiplier: category.default_multiplier(),
            baseline: category.default_baseline(),
        }
    }
}

// ---------------------------------------------------------------------------
// League settings
// ---------------------------------------------------------------------------

/// Everything the valuation and simulation pipeline needs to know about
/// the league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSettings {
    pub num_teams: usize,
    /// Per-team auction budget.
    pub budget: f64,
    /// Dollar floor for any rostered player.
    pub min_value: f64,
    pub hitting_categories: Vec<CategorySettings>,
    pub pitching_categories: Vec<CategorySettings>,
    /// Required starting slots per position (UTIL included, bench not).
    pub roster_slots: HashMap<Position, usize>,
    pub bench_slots: usize,
    /// Replacement-level depth per position, scaled by `num_teams / 12`
    /// when applied.
    pub replacement_depth: HashMap<Position, usize>,
    /// Assumed team plate appearances for rate-stat dilution. A fixed
    /// estimate, not derived from roster composition.
    pub team_pa: f64,
    /// Assumed team innings pitched for rate-stat dilution.
    pub team_ip: f64,
    /// Salary added per extension year past the base contract term.
    pub extension_cost_per_year: f64,
}

impl LeagueSettings {
    /// Look up the resolved settings for a category, falling back to the
    /// category defaults when the league does not configure it.
    pub fn category_settings(&self, category: Category) -> CategorySettings {
        self.hitting_categories
            .iter()
            .chain(self.pitching_categories.iter())
            .find(|c| c.category == category)
            .cloned()
            .unwrap_or_else(|| CategorySettings::default_for(category))
    }

    /// All scoring categories, hitting first.
    pub fn all_categories(&self) -> impl Iterator<Item = &CategorySettings> {
        self.hitting_categories
            .iter()
            .chain(self.pitching_categories.iter())
    }

    /// Replacement depth for a position, with a generic fallback.
    pub fn depth_for(&self, position: Position) -> usize {
        self.replacement_depth
            .get(&position)
            .copied()
            .unwrap_or(DEFAULT_GENERIC_DEPTH)
    }

    /// Total required starting slots.
    pub fn total_slots(&self) -> usize {
        self.roster_slots.values().sum()
    }
}

const DEFAULT_GENERIC_DEPTH: usize = 14;

impl Default for LeagueSettings {
    /// A standard 12-team, $260, 5x5 rotisserie league.
    fn default() -> Self {
        let hitting = [Category::R, Category::HR, Category::RBI, Category::SB, Category::AVG]
            .into_iter()
            .map(CategorySettings::default_for)
            .collect();
        let pitching = [Category::W, Category::SV, Category::K, Category::ERA, Category::WHIP]
            .into_iter()
            .map(CategorySettings::default_for)
            .collect();

        let mut roster_slots = HashMap::new();
        roster_slots.insert(Position::Catcher, 1);
        roster_slots.insert(Position::FirstBase, 1);
        roster_slots.insert(Position::SecondBase, 1);
        roster_slots.insert(Position::ThirdBase, 1);
        roster_slots.insert(Position::ShortStop, 1);
        roster_slots.insert(Position::Outfield, 3);
        roster_slots.insert(Position::Utility, 1);
        roster_slots.insert(Position::StartingPitcher, 4);
        roster_slots.insert(Position::ReliefPitcher, 2);

        let mut replacement_depth = HashMap::new();
        replacement_depth.insert(Position::Catcher, 12);
        replacement_depth.insert(Position::ShortStop, 14);
        replacement_depth.insert(Position::SecondBase, 14);
        replacement_depth.insert(Position::ThirdBase, 14);
        replacement_depth.insert(Position::FirstBase, 14);
        replacement_depth.insert(Position::Outfield, 45);
        replacement_depth.insert(Position::StartingPitcher, 55);
        replacement_depth.insert(Position::ReliefPitcher, 25);
        replacement_depth.insert(Position::DesignatedHitter, 14);
        replacement_depth.insert(Position::Utility, 14);

        LeagueSettings {
            num_teams: 12,
            budget: 260.0,
            min_value: 1.0,
            hitting_categories: hitting,
            pitching_categories: pitching,
            roster_slots,
            bench_slots: 5,
            replacement_depth,
            team_pa: 7800.0,
            team_ip: 1400.0,
            extension_cost_per_year: 5.0,
        }
    }
}

// ---------------------------------------------------------------------------
// league.toml deserialization
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Deserialize)]
struct LeagueFile {
    league: LeagueFileSection,
}

/// Raw deserialization target. Position keys and category names arrive as
/// strings; conversion to the typed settings happens in `resolve()`.
#[derive(Debug, Deserialize)]
struct LeagueFileSection {
    num_teams: Option<usize>,
    budget: Option<f64>,
    min_value: Option<f64>,
    bench_slots: Option<usize>,
    team_pa: Option<f64>,
    team_ip: Option<f64>,
    extension_cost_per_year: Option<f64>,
    #[serde(default)]
    hitting_categories: Vec<CategoryFileEntry>,
    #[serde(default)]
    pitching_categories: Vec<CategoryFileEntry>,
    #[serde(default)]
    roster: HashMap<String, usize>,
    #[serde(default)]
    replacement_depth: HashMap<String, usize>,
}

#[derive(Debug, Deserialize)]
struct CategoryFileEntry {
    name: String,
    weight: Option<f64>,
    inverse: Option<bool>,
    multiplier: Option<f64>,
    baseline: Option<f64>,
}

impl CategoryFileEntry {
    /// Resolve against the category defaults (the layered fallback chain).
    fn resolve(&self) -> Result<CategorySettings, ConfigError> {
        let category = Category::parse(&self.name).ok_or_else(|| ConfigError::ValidationError {
            field: "categories".into(),
            message: format!("unknown category `{}`", self.name),
        })?;
        let defaults = CategorySettings::default_for(category);
        Ok(CategorySettings {
            category,
            weight: self.weight.unwrap_or(defaults.weight),
            inverse: self.inverse.unwrap_or(defaults.inverse),
            multiplier: self.multiplier.unwrap_or(defaults.multiplier),
            baseline: self.baseline.unwrap_or(defaults.baseline),
        })
    }
}

fn resolve_position_map(
    raw: &HashMap<String, usize>,
    field: &str,
) -> Result<HashMap<Position, usize>, ConfigError> {
    let mut map = HashMap::new();
    for (key, &count) in raw {
        let pos = Position::from_str_pos(key).ok_or_else(|| ConfigError::ValidationError {
            field: field.into(),
            message: format!("unknown position `{key}`"),
        })?;
        *map.entry(pos).or_insert(0) += count;
    }
    Ok(map)
}

/// Parse league settings from TOML text. Missing sections fall back to the
/// documented defaults; present sections are validated.
pub fn settings_from_toml(text: &str, origin: &Path) -> Result<LeagueSettings, ConfigError> {
    let file: LeagueFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: origin.to_path_buf(),
        source: e,
    })?;
    let section = file.league;
    let defaults = LeagueSettings::default();

    let hitting_categories = if section.hitting_categories.is_empty() {
        defaults.hitting_categories.clone()
    } else {
        section
            .hitting_categories
            .iter()
            .map(CategoryFileEntry::resolve)
            .collect::<Result<Vec<_>, _>>()?
    };
    let pitching_categories = if section.pitching_categories.is_empty() {
        defaults.pitching_categories.clone()
    } else {
        section
            .pitching_categories
            .iter()
            .map(CategoryFileEntry::resolve)
            .collect::<Result<Vec<_>, _>>()?
    };

    let roster_slots = if section.roster.is_empty() {
        defaults.roster_slots.clone()
    } else {
        resolve_position_map(&section.roster, "roster")?
    };
    let replacement_depth = if section.replacement_depth.is_empty() {
        defaults.replacement_depth.clone()
    } else {
        resolve_position_map(&section.replacement_depth, "replacement_depth")?
    };

    let settings = LeagueSettings {
        num_teams: section.num_teams.unwrap_or(defaults.num_teams),
        budget: section.budget.unwrap_or(defaults.budget),
        min_value: section.min_value.unwrap_or(defaults.min_value),
        hitting_categories,
        pitching_categories,
        roster_slots,
        bench_slots: section.bench_slots.unwrap_or(defaults.bench_slots),
        replacement_depth,
        team_pa: section.team_pa.unwrap_or(defaults.team_pa),
        team_ip: section.team_ip.unwrap_or(defaults.team_ip),
        extension_cost_per_year: section
            .extension_cost_per_year
            .unwrap_or(defaults.extension_cost_per_year),
    };

    validate(&settings)?;
    Ok(settings)
}

/// Load league settings from a TOML file on disk.
pub fn load_settings(path: &Path) -> Result<LeagueSettings, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    settings_from_toml(&text, path)
}

fn validate(settings: &LeagueSettings) -> Result<(), ConfigError> {
    if settings.num_teams == 0 {
        return Err(ConfigError::ValidationError {
            field: "num_teams".into(),
            message: "league must have at least one team".into(),
        });
    }
    if settings.budget <= 0.0 {
        return Err(ConfigError::ValidationError {
            field: "budget".into(),
            message: "budget must be positive".into(),
        });
    }
    if settings.team_pa <= 0.0 || settings.team_ip <= 0.0 {
        return Err(ConfigError::ValidationError {
            field: "team_pa/team_ip".into(),
            message: "dilution constants must be positive".into(),
        });
    }
    for cat in settings.all_categories() {
        if cat.multiplier <= 0.0 {
            return Err(ConfigError::ValidationError {
                field: format!("categories.{}", cat.category),
                message: "multiplier must be positive".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
