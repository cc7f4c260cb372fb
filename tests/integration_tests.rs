// Integration tests for the roto valuation engine.
//
// These tests exercise the full pipeline end-to-end using the library
// crate's public API: projections through SGP and auction values, the
// scarcity and inflation analyses layered on the valued pool, standings
// simulation, and complete trade analysis.

use std::collections::HashSet;

use rotoval::config::{Category, LeagueSettings};
use rotoval::player::contract::{Contract, ContractStage};
use rotoval::player::position::Position;
use rotoval::player::stats::PlayerStats;
use rotoval::player::{FantasyTeam, Player};
use rotoval::standings::{simulate_standings, simulate_trade_standings, swap_rosters};
use rotoval::trade::{analyze_trade, evaluate_roster_fit, TradeProposal};
use rotoval::valuation::{
    analyze_scarcity, apply_inflation, compute_inflation, rank_keeper_candidates,
    value_player_pool, valued_player,
};

// ===========================================================================
// Test helpers
// ===========================================================================

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn make_hitter(id: &str, positions: Vec<Position>, hr: u32, r: u32, rbi: u32, sb: u32, h: u32) -> Player {
    Player {
        id: id.into(),
        name: format!("Hitter {id}"),
        positions,
        contract: None,
        projection: Some(PlayerStats {
            pa: 620,
            ab: 560,
            h,
            xbh: hr + 20,
            hr,
            r,
            rbi,
            sb,
            bb: 50,
            ..Default::default()
        }),
        team_id: None,
    }
}

fn make_pitcher(id: &str, position: Position, ip: f64, er: u32, k: u32, w: u32, sv: u32) -> Player {
    Player {
        id: id.into(),
        name: format!("Pitcher {id}"),
        positions: vec![position],
        contract: None,
        projection: Some(PlayerStats {
            ip,
            er,
            k,
            w,
            sv,
            ha: (ip * 0.88) as u32,
            bba: (ip * 0.31) as u32,
            ..Default::default()
        }),
        team_id: None,
    }
}

fn with_contract(mut player: Player, salary: f64, years: u8, stage: ContractStage, keeper: bool) -> Player {
    player.contract = Some(Contract {
        salary,
        years_remaining: years,
        stage,
        keeper,
    });
    player
}

/// A four-team league with graded talent: team 0 strongest, team 3
/// weakest, every roster carrying hitters at several positions plus a
/// rotation and a closer.
fn sample_teams() -> Vec<FantasyTeam> {
    (0..4)
        .map(|t| {
            let d = t as u32 * 3;
            let roster = vec![
                make_hitter(&format!("t{t}_c"), vec![Position::Catcher], 18 - d.min(10), 70 - d, 65 - d, 3, 130),
                make_hitter(&format!("t{t}_ss"), vec![Position::ShortStop], 26 - d, 95 - d * 2, 85 - d * 2, 22 - d.min(15), 155),
                make_hitter(&format!("t{t}_1b"), vec![Position::FirstBase], 34 - d, 90 - d * 2, 105 - d * 2, 2, 150),
                make_hitter(&format!("t{t}_of1"), vec![Position::Outfield], 38 - d, 108 - d * 2, 102 - d * 2, 18 - d.min(12), 165),
                make_hitter(&format!("t{t}_of2"), vec![Position::Outfield], 22 - d, 84 - d * 2, 78 - d * 2, 12 - d.min(8), 148),
                make_hitter(&format!("t{t}_util"), vec![Position::SecondBase, Position::ThirdBase], 20 - d, 80 - d * 2, 74 - d * 2, 9 - d.min(6), 145),
                make_pitcher(&format!("t{t}_sp1"), Position::StartingPitcher, 195.0, 62 + d * 4, 225 - d * 10, 16 - t as u32, 0),
                make_pitcher(&format!("t{t}_sp2"), Position::StartingPitcher, 170.0, 68 + d * 4, 175 - d * 10, 12 - t as u32, 0),
                make_pitcher(&format!("t{t}_rp"), Position::ReliefPitcher, 65.0, 20 + d, 80 - d * 2, 4, 34 - d),
            ];
            FantasyTeam {
                id: format!("team{t}"),
                name: format!("Team {t}"),
                roster,
                budget: 260.0,
                spent: 0.0,
            }
        })
        .collect()
}

fn all_players(teams: &[FantasyTeam]) -> Vec<Player> {
    teams.iter().flat_map(|t| t.roster.iter().cloned()).collect()
}

fn small_league() -> LeagueSettings {
    LeagueSettings {
        num_teams: 4,
        ..LeagueSettings::default()
    }
}

// ===========================================================================
// Valuation pipeline
// ===========================================================================

#[test]
fn pipeline_values_every_projected_player() {
    let teams = sample_teams();
    let pool = value_player_pool(&all_players(&teams), &small_league()).unwrap();
    assert_eq!(pool.len(), 36);
    // Sorted descending by dollar value.
    for w in pool.windows(2) {
        assert!(w[0].dollar_value >= w[1].dollar_value);
    }
    // The strongest team's stud outfielder outearns the weakest team's.
    let best = valued_player(&pool, "t0_of1").unwrap();
    let worst = valued_player(&pool, "t3_of1").unwrap();
    assert!(best.dollar_value > worst.dollar_value);
}

#[test]
fn positive_vorp_dollars_conserve_the_league_budget() {
    let league = small_league();
    let teams = sample_teams();
    let pool = value_player_pool(&all_players(&teams), &league).unwrap();
    let sum: f64 = pool
        .iter()
        .filter(|p| p.above_replacement)
        .map(|p| p.dollar_value)
        .sum();
    let total_budget = league.budget * league.num_teams as f64;
    let positive = pool.iter().filter(|p| p.above_replacement).count();
    // One decimal of rounding per player, plus possible $1 floors.
    assert!(
        (sum - total_budget).abs() <= 0.05 * positive as f64 + 1.0,
        "sum {sum} vs budget {total_budget}"
    );
}

#[test]
fn elite_hitter_outvalues_mediocre_twin() {
    // 40 HR / 100 R / 100 RBI / 20 SB / .300 vs 20 / 70 / 70 / 5 / .260
    // on identical playing time.
    let elite = Player {
        projection: Some(PlayerStats {
            pa: 660,
            ab: 600,
            h: 180,
            hr: 40,
            r: 100,
            rbi: 100,
            sb: 20,
            ..Default::default()
        }),
        ..make_hitter("elite", vec![Position::Outfield], 0, 0, 0, 0, 0)
    };
    let mediocre = Player {
        projection: Some(PlayerStats {
            pa: 660,
            ab: 600,
            h: 156,
            hr: 20,
            r: 70,
            rbi: 70,
            sb: 5,
            ..Default::default()
        }),
        ..make_hitter("mediocre", vec![Position::Outfield], 0, 0, 0, 0, 0)
    };

    let mut players = all_players(&sample_teams());
    players.push(elite);
    players.push(mediocre);
    let pool = value_player_pool(&players, &small_league()).unwrap();

    let elite_vp = valued_player(&pool, "elite").unwrap();
    let mediocre_vp = valued_player(&pool, "mediocre").unwrap();
    assert!(elite_vp.sgp.total > mediocre_vp.sgp.total);
    assert!(elite_vp.dollar_value >= mediocre_vp.dollar_value);
}

#[test]
fn scarcity_table_covers_only_rosterable_positions() {
    let league = small_league();
    let teams = sample_teams();
    let pool = value_player_pool(&all_players(&teams), &league).unwrap();
    let table = analyze_scarcity(&pool, league.min_value);

    assert!(!table.is_empty());
    // Sorted scarcest-first and restricted to positions that actually
    // have above-floor players.
    for w in table.windows(2) {
        assert!(w[0].scarcity_multiplier >= w[1].scarcity_multiplier);
    }
    let positions: HashSet<Position> = table.iter().map(|e| e.position).collect();
    let rosterable: HashSet<Position> = pool
        .iter()
        .filter(|p| p.dollar_value > league.min_value)
        .map(|p| p.primary_position)
        .collect();
    assert_eq!(positions, rosterable);
}

// ===========================================================================
// Inflation and keepers
// ===========================================================================

#[test]
fn keeper_discounts_inflate_the_market() {
    let league = small_league();
    let mut teams = sample_teams();
    // Put the best players on cheap keeper deals.
    for t in &mut teams {
        let stud = t.roster.remove(3); // of1
        t.roster.insert(3, with_contract(stud, 10.0, 2, ContractStage::First, true));
    }
    let pool = value_player_pool(&all_players(&teams), &league).unwrap();
    let summary = compute_inflation(&pool, &league);

    assert_eq!(summary.keeper_count, 4);
    assert!(summary.total_keeper_value > summary.total_keeper_salary);
    assert!(summary.rate > 1.0, "underpriced keepers must inflate, got {}", summary.rate);

    // Applying the rate scales a non-keeper's price up; rate 1 is the
    // identity.
    let base = 20.0;
    assert!(apply_inflation(base, summary.rate) > base);
    assert!(approx_eq(apply_inflation(base, 1.0), base, 1e-10));
}

#[test]
fn keeper_candidates_ranked_with_projections() {
    let league = small_league();
    let mut teams = sample_teams();
    let stud = teams[0].roster.remove(3);
    teams[0].roster.insert(3, with_contract(stud, 12.0, 1, ContractStage::Second, true));
    let fading = teams[1].roster.remove(8); // closer
    teams[1].roster.insert(8, with_contract(fading, 18.0, 1, ContractStage::Third, true));

    let pool = value_player_pool(&all_players(&teams), &league).unwrap();
    let summary = compute_inflation(&pool, &league);
    let candidates = rank_keeper_candidates(&pool, summary.rate, &league);

    assert!(!candidates.is_empty());
    for w in candidates.windows(2) {
        assert!(w[0].surplus >= w[1].surplus);
    }
    // The extendable 2nd-year deal projects past its base term; the
    // 3rd-year deal stops at its final season.
    let stud_cand = candidates.iter().find(|c| c.player_id == "t0_of1").unwrap();
    assert!(stud_cand.projection.years.len() > 1);
    if let Some(fading_cand) = candidates.iter().find(|c| c.player_id == "t1_rp") {
        assert_eq!(fading_cand.projection.years.len(), 1);
    }
}

#[test]
fn guaranteed_deal_projection_stops_at_contract_end() {
    let league = small_league();
    let mut teams = sample_teams();
    let stud = teams[0].roster.remove(3);
    teams[0]
        .roster
        .insert(3, with_contract(stud, 5.0, 3, ContractStage::Guaranteed(2028), true));

    let pool = value_player_pool(&all_players(&teams), &league).unwrap();
    let summary = compute_inflation(&pool, &league);
    let candidates = rank_keeper_candidates(&pool, summary.rate, &league);
    let cand = candidates.iter().find(|c| c.player_id == "t0_of1").unwrap();
    assert_eq!(cand.projection.years.len(), 3);
    assert!(cand.projection.years.iter().all(|y| !y.extension_year));
}

// ===========================================================================
// Standings simulation
// ===========================================================================

#[test]
fn standings_ranks_are_permutations_everywhere() {
    let league = small_league();
    let teams = sample_teams();
    let snapshot = simulate_standings(&teams, &league).unwrap();
    let n = teams.len();
    let expected: HashSet<usize> = (1..=n).collect();

    for cat in league.all_categories() {
        let ranks: HashSet<usize> = snapshot
            .teams
            .iter()
            .map(|t| t.category(cat.category).unwrap().rank)
            .collect();
        assert_eq!(ranks, expected, "category {}", cat.category);
    }
    let overall: HashSet<usize> = snapshot.teams.iter().map(|t| t.rank).collect();
    assert_eq!(overall, expected);
    // Graded talent: team0 wins the league.
    assert_eq!(snapshot.teams[0].team_id, "team0");
}

#[test]
fn trade_simulation_round_trips_to_the_original_standings() {
    let league = small_league();
    let teams = sample_teams();
    let sends_a: Vec<String> = vec!["t0_of1".into()];
    let sends_b: Vec<String> = vec!["t3_of2".into()];

    let sim =
        simulate_trade_standings(&teams, &league, "team0", "team3", &sends_a, &sends_b).unwrap();

    // Feed the after-state back in and run the identical trade in
    // reverse; the standings must come back to the before snapshot.
    let swapped = swap_rosters(&teams, "team0", "team3", &sends_a, &sends_b).unwrap();
    let reversed = swap_rosters(&swapped, "team0", "team3", &sends_b, &sends_a).unwrap();
    let restored = simulate_standings(&reversed, &league).unwrap();

    for (orig, back) in sim.before.teams.iter().zip(restored.teams.iter()) {
        assert_eq!(orig.team_id, back.team_id);
        assert_eq!(orig.rank, back.rank);
        assert!(approx_eq(orig.total_points, back.total_points, 1e-9));
        for (a, b) in orig.categories.iter().zip(back.categories.iter()) {
            assert_eq!(a.rank, b.rank);
            match (a.value, b.value) {
                (Some(x), Some(y)) => assert!(approx_eq(x, y, 1e-9)),
                (None, None) => {}
                other => panic!("value mismatch: {other:?}"),
            }
        }
    }
}

// ===========================================================================
// Roster fit
// ===========================================================================

#[test]
fn full_roster_hits_100_only_with_flexibility_bonus() {
    let league = LeagueSettings::default();
    let mut roster = vec![
        make_hitter("c", vec![Position::Catcher], 15, 60, 60, 2, 120),
        make_hitter("1b", vec![Position::FirstBase], 30, 85, 100, 2, 150),
        make_hitter("2b", vec![Position::SecondBase], 18, 80, 70, 12, 150),
        make_hitter("3b", vec![Position::ThirdBase], 28, 85, 95, 4, 155),
        make_hitter("ss", vec![Position::ShortStop], 24, 95, 80, 20, 160),
        make_hitter("of1", vec![Position::Outfield], 35, 100, 100, 15, 160),
        make_hitter("of2", vec![Position::Outfield], 25, 90, 85, 10, 150),
        make_hitter("of3", vec![Position::Outfield], 20, 80, 75, 8, 145),
        make_hitter("dh", vec![Position::DesignatedHitter], 32, 85, 100, 1, 150),
        make_pitcher("sp1", Position::StartingPitcher, 200.0, 60, 230, 17, 0),
        make_pitcher("sp2", Position::StartingPitcher, 185.0, 68, 200, 14, 0),
        make_pitcher("sp3", Position::StartingPitcher, 175.0, 70, 180, 12, 0),
        make_pitcher("sp4", Position::StartingPitcher, 160.0, 72, 160, 10, 0),
        make_pitcher("rp1", Position::ReliefPitcher, 68.0, 20, 85, 4, 38),
        make_pitcher("rp2", Position::ReliefPitcher, 64.0, 22, 78, 3, 30),
    ];
    for i in 0..5 {
        roster.push(make_hitter(&format!("bench{i}"), vec![Position::Outfield], 10, 50, 45, 5, 120));
    }

    // A rigid one-position bat in: everything else maxes out, the bonus
    // stays at zero, and the score lands at exactly 80.
    let rigid = make_hitter("rigid", vec![Position::Outfield], 25, 90, 85, 10, 150);
    let fit = evaluate_roster_fit(&roster, &[rigid], &["bench0".into()], &league);
    assert!(approx_eq(fit.score, 80.0, 1e-9));

    // Enough incoming flexibility to max the bonus pushes it to 100.
    let flexible: Vec<Player> = (0..3)
        .map(|i| {
            make_hitter(
                &format!("flex{i}"),
                vec![
                    Position::Outfield,
                    Position::FirstBase,
                    Position::SecondBase,
                    Position::ShortStop,
                ],
                25,
                90,
                85,
                10,
                150,
            )
        })
        .collect();
    let fit = evaluate_roster_fit(
        &roster,
        &flexible,
        &["bench0".into(), "bench1".into(), "bench2".into()],
        &league,
    );
    assert!(approx_eq(fit.multi_eligibility_bonus, 20.0, 1e-9));
    assert!(approx_eq(fit.score, 100.0, 1e-9));
}

// ===========================================================================
// Trade analysis
// ===========================================================================

#[test]
fn even_trade_scores_exactly_50() {
    let mut teams = sample_teams();
    teams[0]
        .roster
        .push(make_hitter("mirror_a", vec![Position::Outfield], 28, 92, 88, 11, 152));
    teams[1]
        .roster
        .push(make_hitter("mirror_b", vec![Position::Outfield], 28, 92, 88, 11, 152));

    let proposal = TradeProposal {
        team_a: "team0".into(),
        team_b: "team1".into(),
        sends_a: vec!["mirror_a".into()],
        sends_b: vec!["mirror_b".into()],
    };
    let analysis = analyze_trade(&teams, &proposal, &small_league()).unwrap();
    assert!(approx_eq(analysis.fairness_score, 50.0, 1e-9));
}

#[test]
fn keeper_dump_raises_value_and_keeper_warnings() {
    let league = small_league();
    let mut teams = sample_teams();
    // Team 0's stud becomes a $8 flagged keeper and gets shipped for the
    // weakest team's worst bat.
    let stud = teams[0].roster.remove(3);
    teams[0].roster.insert(3, with_contract(stud, 8.0, 1, ContractStage::First, true));

    let proposal = TradeProposal {
        team_a: "team0".into(),
        team_b: "team3".into(),
        sends_a: vec!["t0_of1".into()],
        sends_b: vec!["t3_c".into()],
    };
    let analysis = analyze_trade(&teams, &proposal, &league).unwrap();

    assert!(analysis.warnings.iter().any(|w| w.contains("value gap")));
    assert!(analysis.warnings.iter().any(|w| w.contains("keeper")));
    assert!(analysis.fairness_score < 50.0);
    assert!(!analysis.recommendation.is_empty());
}

#[test]
fn analysis_reports_both_sides_consistently() {
    let league = small_league();
    let teams = sample_teams();
    let proposal = TradeProposal {
        team_a: "team0".into(),
        team_b: "team2".into(),
        sends_a: vec!["t0_of1".into(), "t0_rp".into()],
        sends_b: vec!["t2_1b".into()],
    };
    let analysis = analyze_trade(&teams, &proposal, &league).unwrap();

    // What leaves one side arrives at the other.
    assert_eq!(analysis.side_a.players_out, analysis.side_b.players_in);
    assert_eq!(analysis.side_b.players_out, analysis.side_a.players_in);
    assert!(approx_eq(analysis.side_a.value_in, analysis.side_b.value_out, 1e-9));
    assert!(approx_eq(analysis.side_a.value_out, analysis.side_b.value_in, 1e-9));
    assert!(approx_eq(analysis.side_a.salary_in, analysis.side_b.salary_out, 1e-9));

    // Category impacts cover every scoring category for both sides.
    let expected = league.all_categories().count();
    assert_eq!(analysis.side_a.category_impacts.len(), expected);
    assert_eq!(analysis.side_b.category_impacts.len(), expected);

    // Rank deltas agree with the before/after snapshots.
    for side in [&analysis.side_a, &analysis.side_b] {
        for impact in &side.category_impacts {
            assert_eq!(
                impact.rank_delta,
                impact.before_rank as i32 - impact.after_rank as i32
            );
        }
        assert_eq!(
            side.rank_before,
            analysis.standings.before.team(&side.team_id).unwrap().rank
        );
        assert_eq!(
            side.rank_after,
            analysis.standings.after.team(&side.team_id).unwrap().rank
        );
    }

    // The inputs were never mutated.
    assert_eq!(teams, sample_teams());
}

#[test]
fn hr_standings_move_toward_the_acquiring_team() {
    let league = small_league();
    let teams = sample_teams();
    // Weakest team lands the best power bat in the league.
    let proposal = TradeProposal {
        team_a: "team3".into(),
        team_b: "team0".into(),
        sends_a: vec!["t3_c".into()],
        sends_b: vec!["t0_of1".into()],
    };
    let analysis = analyze_trade(&teams, &proposal, &league).unwrap();
    let hr = analysis
        .side_a
        .category_impacts
        .iter()
        .find(|c| c.category == Category::HR)
        .unwrap();
    assert!(hr.after_value.unwrap() > hr.before_value.unwrap());
    assert!(hr.rank_delta >= 0);
}
