//! BoxQuest Headless Harness
//!
//! Validates the box rules and replays a scenario without any front end.
//!
//! Usage:
//!   cargo run -p boxquest-simtest
//!   cargo run -p boxquest-simtest -- --verbose
//!   cargo run -p boxquest-simtest -- --scenario my_map.json
//!   cargo run -p boxquest-simtest -- --random --seed 11

use std::collections::BTreeSet;
use std::path::PathBuf;

use boxquest_core::prelude::*;
use boxquest_logic::{
    CombatAction, Direction, DirectionSet, Effect, EffectId, EffectKind, Item, Npc, NpcId,
    OccupantLookup, OccupantTable, Player, Stat,
};
use clap::Parser;
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

// ── Bundled scenario (same file the core tests replay) ──────────────────
const SCENARIO_JSON: &str = include_str!("../../../data/scenario.json");

const HERO: PlayerId = PlayerId(1);

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Print every check and log at debug level
    #[arg(long)]
    verbose: bool,
    /// Scenario JSON to replay instead of the bundled one
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Seed for generated sessions
    #[arg(long)]
    seed: Option<u64>,
    /// Play a generated session instead of the scenario
    #[arg(long)]
    random: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    println!("=== BoxQuest Harness ===\n");
    let verbose = cli.verbose;
    let mut results = Vec::new();

    // 1. Boundary classifier sweep
    results.extend(validate_boundaries(verbose));

    // 2. Glyph precedence
    results.extend(validate_glyphs());

    // 3. Action legality
    results.extend(validate_actions());

    // 4. Generated sessions
    results.extend(validate_generation(cli.seed.unwrap_or(1)));

    // 5. Scenario replay or random play
    if cli.random {
        results.extend(validate_random_play(cli.seed.unwrap_or(1), verbose));
    } else {
        let json = match &cli.scenario {
            Some(path) => match std::fs::read_to_string(path) {
                Ok(json) => json,
                Err(e) => {
                    results.push(check(
                        "scenario_read",
                        false,
                        format!("{}: {}", path.display(), e),
                    ));
                    String::new()
                }
            },
            None => SCENARIO_JSON.to_string(),
        };
        if !json.is_empty() {
            results.extend(validate_scenario(&json, verbose));
        }
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Boundaries ───────────────────────────────────────────────────────

fn expected_paths(grid: &Grid, x: u32, y: u32) -> DirectionSet {
    let mut set = DirectionSet::EMPTY;
    if y < grid.width() {
        set.insert(Direction::North);
    }
    if y > 1 {
        set.insert(Direction::South);
    }
    if x < grid.length() {
        set.insert(Direction::East);
    }
    if x > 1 {
        set.insert(Direction::West);
    }
    set
}

fn validate_boundaries(verbose: bool) -> Vec<TestResult> {
    println!("--- Grid Boundaries ---");
    let mut results = Vec::new();

    for (length, width) in [(1, 1), (1, 4), (4, 1), (2, 2), (3, 3), (5, 3), (7, 7)] {
        let Ok(grid) = Grid::new(length, width) else {
            results.push(check("grid_new", false, format!("{length}×{width} rejected")));
            continue;
        };
        let mut mismatches = Vec::new();
        let mut four_way = 0;
        for (x, y) in grid.coords() {
            match GridBox::new(&grid, x, y) {
                Ok(b) => {
                    let got = b.paths_from_grid_boundaries();
                    if got.len() == 4 {
                        four_way += 1;
                    }
                    if got != expected_paths(&grid, x, y) {
                        mismatches.push(format!("({x}, {y}) -> {got}"));
                    }
                }
                Err(e) => mismatches.push(format!("({x}, {y}): {e}")),
            }
        }
        let interior = length.saturating_sub(2) * width.saturating_sub(2);
        if verbose {
            println!("  {length}×{width}: {four_way} interior boxes");
        }
        results.push(check(
            &format!("boundaries_{length}x{width}"),
            mismatches.is_empty() && four_way == interior,
            if mismatches.is_empty() {
                format!("{} boxes, {} with all four exits", grid.box_count(), four_way)
            } else {
                mismatches.join(", ")
            },
        ));
    }

    let grid = Grid::new(3, 3).ok();
    let centre = grid.and_then(|g| GridBox::new(&g, 2, 2).ok());
    results.push(check(
        "boundaries_centre_renders_nsew",
        centre.map(|b| b.paths_from_grid_boundaries().to_string()) == Some("nsew".into()),
        "centre of 3×3 is nsew",
    ));

    let out = Grid::new(3, 3).map(|g| GridBox::new(&g, 4, 1).is_err());
    results.push(check(
        "boundaries_out_of_bounds_rejected",
        out == Ok(true),
        "(4, 1) on 3×3 is an error",
    ));

    results
}

// ── 2. Glyphs ───────────────────────────────────────────────────────────

fn explored_box(grid: &Grid, x: u32, y: u32) -> Option<GridBox> {
    GridBox::new(grid, x, y).ok().map(|b| b.with_explored(true))
}

fn goblin(at: BoxId, health: u32) -> Npc {
    Npc {
        id: NpcId(1),
        name: "goblin".into(),
        box_id: Some(at),
        stat: Stat::new(health),
    }
}

fn floor_item(at: BoxId) -> Item {
    Item {
        id: ItemId(1),
        name: "dagger".into(),
        box_id: Some(at),
        player: None,
        equipped: false,
    }
}

fn validate_glyphs() -> Vec<TestResult> {
    println!("--- Glyph Precedence ---");
    let mut results = Vec::new();
    let Ok(grid) = Grid::new(3, 3) else {
        return vec![check("glyph_grid", false, "3×3 grid rejected")];
    };
    let Some(b) = explored_box(&grid, 2, 2) else {
        return vec![check("glyph_box", false, "(2, 2) rejected")];
    };
    let at = b.id();

    let mut cases: Vec<(&str, OccupantTable, GridBox, Glyph)> = Vec::new();

    let mut t = OccupantTable::new();
    t.put_player(Player {
        id: HERO,
        box_id: Some(at),
    });
    t.put_npc(goblin(at, 5));
    cases.push(("player_beats_hostile", t, b, Glyph::Player));

    let mut t = OccupantTable::new();
    t.put_npc(goblin(at, 5));
    cases.push(("unexplored_hides_hostile", t, b.with_explored(false), Glyph::Unexplored));

    let mut t = OccupantTable::new();
    t.put_npc(goblin(at, 5));
    t.put_item(floor_item(at));
    cases.push(("locked_beats_hostile", t, b.with_locked(true), Glyph::Locked));

    let mut t = OccupantTable::new();
    t.put_npc(goblin(at, 5));
    t.put_effect(Effect {
        id: EffectId(1),
        kind: EffectKind::Teleport,
        box_id: Some(at),
    });
    cases.push((
        "effect_beats_hostile",
        t,
        b,
        Glyph::Effect(EffectKind::Teleport),
    ));

    let mut t = OccupantTable::new();
    t.put_npc(goblin(at, 5));
    t.put_item(floor_item(at));
    cases.push(("hostile_beats_item", t, b, Glyph::Enemy));

    let mut t = OccupantTable::new();
    t.put_npc(goblin(at, 0));
    t.put_item(floor_item(at));
    cases.push(("dead_hostile_shows_item", t, b, Glyph::Item));

    cases.push(("empty_box", OccupantTable::new(), b, Glyph::Empty));

    for (name, table, grid_box, expected) in cases {
        let got = grid_box.display_character(&table, HERO);
        results.push(check(
            &format!("glyph_{name}"),
            got == expected,
            format!("expected {expected}, got {got}"),
        ));
    }

    results
}

// ── 3. Actions ──────────────────────────────────────────────────────────

fn codes(actions: &BTreeSet<ActionCode>) -> String {
    actions
        .iter()
        .map(|a| a.code())
        .collect::<Vec<_>>()
        .join(",")
}

fn validate_actions() -> Vec<TestResult> {
    println!("--- Action Legality ---");
    let mut results = Vec::new();
    let Ok(grid) = Grid::new(3, 3) else {
        return vec![check("action_grid", false, "3×3 grid rejected")];
    };
    let (Some(corner), Some(centre)) = (explored_box(&grid, 1, 1), explored_box(&grid, 2, 2))
    else {
        return vec![check("action_boxes", false, "box construction failed")];
    };

    let mut t = OccupantTable::new();
    t.put_player(Player {
        id: HERO,
        box_id: Some(corner.id()),
    });
    let got = corner.possible_actions(&t, HERO, None);
    let expected: BTreeSet<ActionCode> = [
        ActionCode::Run,
        ActionCode::Move(Direction::North),
        ActionCode::Move(Direction::East),
    ]
    .into_iter()
    .collect();
    results.push(check(
        "actions_corner_moves",
        got == expected,
        format!("got {}", codes(&got)),
    ));

    t.put_npc(goblin(centre.id(), 5));
    let got = centre.possible_actions(&t, HERO, None);
    let blocked = got.iter().all(|a| !matches!(a, ActionCode::Move(_)))
        && got.contains(&ActionCode::Combat(CombatAction::Attack))
        && got.contains(&ActionCode::Combat(CombatAction::Block));
    results.push(check(
        "actions_hostile_blocks_moves",
        blocked,
        format!("got {}", codes(&got)),
    ));

    let mut t = OccupantTable::new();
    t.put_item(floor_item(centre.id()));
    let take = centre.possible_actions(&t, HERO, Some(ItemId(1)));
    let absent = centre.possible_actions(&t, HERO, Some(ItemId(9)));
    results.push(check(
        "actions_take_only_known_floor_item",
        take.contains(&ActionCode::Take) && !absent.contains(&ActionCode::Take),
        format!("known: {}; unknown: {}", codes(&take), codes(&absent)),
    ));

    if let Some(item) = t.item_mut(ItemId(1)) {
        item.box_id = None;
        item.player = Some(HERO);
    }
    let carried = centre.possible_actions(&t, HERO, Some(ItemId(1)));
    if let Some(item) = t.item_mut(ItemId(1)) {
        item.equipped = true;
    }
    let equipped = centre.possible_actions(&t, HERO, Some(ItemId(1)));
    results.push(check(
        "actions_drop_and_use",
        carried.contains(&ActionCode::Drop)
            && !carried.contains(&ActionCode::Use)
            && equipped.contains(&ActionCode::Use),
        format!("carried: {}; equipped: {}", codes(&carried), codes(&equipped)),
    ));

    results
}

// ── 4. Generation ───────────────────────────────────────────────────────

fn validate_generation(seed: u64) -> Vec<TestResult> {
    println!("--- Generation ---");
    let mut results = Vec::new();

    for offset in 0..5 {
        let config = SessionConfig {
            seed: Some(seed + offset),
            ..SessionConfig::default()
        };
        let name = format!("generate_seed_{}", seed + offset);
        match generate_session(&config) {
            Ok(engine) => {
                let start_ok = engine
                    .current_box()
                    .map(|b| b.is_explored() && b.npc(&engine).is_none())
                    .unwrap_or(false);
                let hostiles = engine
                    .layout()
                    .box_ids()
                    .filter(|&id| engine.npc_at(id).is_some())
                    .count();
                results.push(check(
                    &name,
                    start_ok && hostiles == config.npc_count as usize,
                    format!("{hostiles} hostiles, start clear: {start_ok}"),
                ));
            }
            Err(e) => results.push(check(&name, false, e.to_string())),
        }
    }

    let crowded = SessionConfig {
        length: 2,
        width: 2,
        npc_count: 4,
        item_count: 0,
        effect_count: 0,
        ..SessionConfig::default()
    };
    let refused = generate_session(&crowded);
    results.push(check(
        "generate_refuses_overcrowding",
        refused.is_err(),
        match refused {
            Err(e) => e.to_string(),
            Ok(_) => "accepted".into(),
        },
    ));

    results
}

// ── 5a. Scenario replay ─────────────────────────────────────────────────

fn validate_scenario(json: &str, verbose: bool) -> Vec<TestResult> {
    println!("--- Scenario ---");
    let mut results = Vec::new();

    let scenario = match Scenario::from_json(json) {
        Ok(s) => s,
        Err(e) => {
            results.push(check("scenario_parse", false, e.to_string()));
            return results;
        }
    };
    results.push(check(
        "scenario_parse",
        true,
        format!("{:?}: {} steps", scenario.name, scenario.script.len()),
    ));

    let mut engine = match scenario.build() {
        Ok(engine) => engine,
        Err(e) => {
            results.push(check("scenario_build", false, e.to_string()));
            return results;
        }
    };
    if verbose {
        print_map(&engine);
    }

    match scenario.play(&mut engine) {
        Ok(reports) => {
            for report in &reports {
                info!("turn {} [{}]: {:?}", report.turn, report.action, report.events);
            }
            results.push(check(
                "scenario_play",
                true,
                format!("{} turns applied", reports.len()),
            ));
        }
        Err(e) => results.push(check("scenario_play", false, e.to_string())),
    }

    let health = engine
        .player_vitals()
        .map(|v| v.stat.current_health)
        .unwrap_or(0);
    results.push(check(
        "scenario_player_state",
        engine.current_box().is_ok(),
        format!("health {health}, over: {}", engine.is_over()),
    ));

    if verbose {
        print_map(&engine);
    }
    results
}

// ── 5b. Random play ─────────────────────────────────────────────────────

fn validate_random_play(seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Random Play ---");
    let config = SessionConfig {
        seed: Some(seed),
        ..SessionConfig::default()
    };
    let mut engine = match generate_session(&config) {
        Ok(engine) => engine,
        Err(e) => return vec![check("random_generate", false, e.to_string())],
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut turns = 0;
    let mut refusals = Vec::new();

    while turns < 200 && !engine.is_over() {
        let Ok(here) = engine.current_box() else {
            refusals.push("player vanished".to_string());
            break;
        };
        let Ok(actions) = engine.possible_actions(here.id(), None) else {
            break;
        };
        let Some(action) = actions.into_iter().choose(&mut rng) else {
            refusals.push(format!("no actions at {}", here.id()));
            break;
        };
        match engine.apply(action, None) {
            Ok(report) => {
                turns += 1;
                if verbose {
                    println!("  turn {}: {} -> {:?}", report.turn, action, report.events);
                }
            }
            Err(e) => refusals.push(e.to_string()),
        }
    }

    if verbose {
        print_map(&engine);
    }
    vec![check(
        "random_play_every_legal_action_applies",
        refusals.is_empty() && turns > 0,
        if refusals.is_empty() {
            format!("{turns} turns, over: {}", engine.is_over())
        } else {
            refusals.join("; ")
        },
    )]
}

fn print_map(engine: &SessionEngine) {
    for row in engine.render_map() {
        println!("    {row}");
    }
}
