// Roto valuation and trade analysis entry point.
//
// The engine itself is pure and file-format agnostic; this binary is the
// thin shell around it:
// 1. Initialize tracing (stderr, env-filtered)
// 2. Load league settings (league.toml if present, defaults otherwise)
// 3. Read the league file (teams, rosters, free agents) as JSON
// 4. Run the requested analysis
// 5. Print the result as JSON on stdout

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::info;

use rotoval::config::{self, LeagueSettings};
use rotoval::player::{FantasyTeam, Player};
use rotoval::standings::simulate_standings;
use rotoval::trade::{analyze_trade, TradeProposal};
use rotoval::valuation::{
    analyze_scarcity, compute_inflation, rank_keeper_candidates, value_player_pool,
};

/// Teams plus the unrostered pool, as produced by the league importers.
#[derive(Debug, Deserialize)]
struct LeagueInput {
    teams: Vec<FantasyTeam>,
    #[serde(default)]
    free_agents: Vec<Player>,
}

impl LeagueInput {
    /// Every player in the league universe, rostered or not.
    fn all_players(&self) -> Vec<Player> {
        self.teams
            .iter()
            .flat_map(|t| t.roster.iter().cloned())
            .chain(self.free_agents.iter().cloned())
            .collect()
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!("usage: rotoval <values|scarcity|inflation|keepers|standings|trade> <league.json> [--settings league.toml] [--proposal trade.json]");
    };

    let mut league_path: Option<PathBuf> = None;
    let mut settings_path: Option<PathBuf> = None;
    let mut proposal_path: Option<PathBuf> = None;
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--settings" => {
                settings_path = Some(
                    iter.next()
                        .context("--settings requires a file path")?
                        .into(),
                );
            }
            "--proposal" => {
                proposal_path = Some(
                    iter.next()
                        .context("--proposal requires a file path")?
                        .into(),
                );
            }
            other if league_path.is_none() => league_path = Some(other.into()),
            other => bail!("unexpected argument `{other}`"),
        }
    }
    let league_path = league_path.context("missing league file argument")?;

    let settings = load_settings(settings_path.as_deref())?;
    info!(
        num_teams = settings.num_teams,
        budget = settings.budget,
        "league settings loaded"
    );

    let input = load_league(&league_path)?;
    info!(
        teams = input.teams.len(),
        free_agents = input.free_agents.len(),
        "league file loaded"
    );

    let output = run_command(command, &input, &settings, proposal_path.as_deref())?;
    println!("{output}");
    Ok(())
}

fn run_command(
    command: &str,
    input: &LeagueInput,
    settings: &LeagueSettings,
    proposal_path: Option<&Path>,
) -> anyhow::Result<String> {
    let json = match command {
        "values" => {
            let pool = value_player_pool(&input.all_players(), settings)?;
            serde_json::to_string_pretty(&pool)?
        }
        "scarcity" => {
            let pool = value_player_pool(&input.all_players(), settings)?;
            let table = analyze_scarcity(&pool, settings.min_value);
            serde_json::to_string_pretty(&table)?
        }
        "inflation" => {
            let pool = value_player_pool(&input.all_players(), settings)?;
            let summary = compute_inflation(&pool, settings);
            serde_json::to_string_pretty(&summary)?
        }
        "keepers" => {
            let pool = value_player_pool(&input.all_players(), settings)?;
            let summary = compute_inflation(&pool, settings);
            let candidates = rank_keeper_candidates(&pool, summary.rate, settings);
            serde_json::to_string_pretty(&candidates)?
        }
        "standings" => {
            let snapshot = simulate_standings(&input.teams, settings)?;
            serde_json::to_string_pretty(&snapshot)?
        }
        "trade" => {
            let path = proposal_path.context("trade command requires --proposal <file>")?;
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read proposal file {}", path.display()))?;
            let proposal: TradeProposal = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse proposal file {}", path.display()))?;
            let analysis = analyze_trade(&input.teams, &proposal, settings)?;
            serde_json::to_string_pretty(&analysis)?
        }
        other => bail!("unknown command `{other}`"),
    };
    Ok(json)
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<LeagueSettings> {
    match path {
        Some(path) => {
            config::load_settings(path).with_context(|| format!("loading {}", path.display()))
        }
        None => {
            let default_path = Path::new("league.toml");
            if default_path.exists() {
                config::load_settings(default_path).context("loading league.toml")
            } else {
                Ok(LeagueSettings::default())
            }
        }
    }
}

fn load_league(path: &Path) -> anyhow::Result<LeagueInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read league file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse league file {}", path.display()))
}

fn init_tracing() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rotoval=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
