//! Replays the bundled cellar scenario and checks every turn.

use boxquest_core::prelude::*;
use boxquest_logic::{CombatAction, Direction, EffectKind, OccupantLookup};

const CELLAR: &str = include_str!("../../../data/scenario.json");

fn cellar() -> (Scenario, SessionEngine) {
    let scenario = Scenario::from_json(CELLAR).unwrap();
    let engine = scenario.build().unwrap();
    (scenario, engine)
}

fn health(engine: &SessionEngine) -> u32 {
    engine.player_vitals().unwrap().stat.current_health
}

#[test]
fn test_initial_map() {
    let (_, engine) = cellar();
    // North row first; (4, 1) was pre-explored and is empty.
    assert_eq!(
        engine.render_map(),
        vec!["????".to_string(), "????".to_string(), "@??X".to_string()]
    );
}

#[test]
fn test_full_playthrough() {
    let (scenario, mut engine) = cellar();
    let reports = scenario.play(&mut engine).unwrap();
    assert_eq!(reports.len(), 10);
    assert_eq!(engine.turn(), 10);

    let grid = *engine.grid();
    let at = |x, y| grid.locate(x, y).unwrap();

    assert_eq!(reports[0].events, vec![TurnEvent::Took(ItemId(1))]);
    assert_eq!(
        reports[1].events[1],
        TurnEvent::EffectTriggered {
            kind: EffectKind::Heal,
            at: at(2, 1),
            amount: 0
        }
    );
    assert_eq!(reports[3].action, ActionCode::Combat(CombatAction::Attack));
    assert!(reports[5]
        .events
        .iter()
        .any(|e| matches!(e, TurnEvent::Defeated { .. })));
    assert_eq!(
        reports[6].events[1],
        TurnEvent::EffectTriggered {
            kind: EffectKind::Hurt,
            at: at(3, 2),
            amount: 5
        }
    );
    assert_eq!(reports[7].events, vec![TurnEvent::Bumped { into: at(4, 2) }]);
    assert_eq!(reports[8].events, vec![TurnEvent::Dropped(ItemId(1))]);
    assert!(!engine.is_over());
    // 20 - 3 (retaliation) - 1 (blocked) - 5 (hurt)
    assert_eq!(health(&engine), 11);
}

#[test]
fn test_teleport_ends_somewhere_explored() {
    let (scenario, mut engine) = cellar();
    let reports = scenario.play(&mut engine).unwrap();
    let last = reports.last().unwrap();
    assert_eq!(last.action, ActionCode::Move(Direction::North));
    let Some(TurnEvent::Teleported { to }) = last.events.last().cloned() else {
        panic!("expected a teleport, got {:?}", last.events);
    };
    let here = engine.current_box().unwrap();
    assert_eq!(here.id(), to);
    assert!(here.is_explored());
    assert_eq!(engine.display_character(to).unwrap(), Glyph::Player);
}

#[test]
fn test_dropped_sword_lies_in_hurt_box() {
    let (scenario, mut engine) = cellar();
    scenario.play(&mut engine).unwrap();
    let box_id = engine.grid().locate(3, 2).unwrap();
    let sword = engine.item(ItemId(1)).unwrap();
    assert!(sword.is_on_floor_of(box_id));
    assert!(!sword.equipped);
    assert!(engine.effect_at(box_id).is_none());
}
