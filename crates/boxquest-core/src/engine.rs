//! Session engine - main entry point for running one game session

use std::collections::BTreeSet;

use hecs::World;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use boxquest_logic::{
    ActionCode, BoxId, CombatAction, Effect, EffectId, EffectKind, Glyph, Grid, GridBox, Item,
    ItemId, Npc, NpcId, OccupantLookup, Player, PlayerId, Stat,
};

use crate::components::{Power, Strike, Vitals};
use crate::config::Tuning;
use crate::error::SessionError;
use crate::generation::{generate_grid, GridLayout};
use crate::lookup::{self, OccupantView};
use crate::systems::{combat, inventory, movement};
use crate::turn::{TurnEvent, TurnReport};

/// One game session: a grid, its occupants, and the single player.
pub struct SessionEngine {
    /// ECS world containing boxes and occupants
    pub world: World,
    layout: GridLayout,
    tuning: Tuning,
    player: PlayerId,
    rng: StdRng,
    turn: u64,
    next_npc: u32,
    next_item: u32,
    next_effect: u32,
    defeated: bool,
}

impl SessionEngine {
    /// Create a session with every box in place and no occupants.
    pub fn new(grid: Grid, tuning: Tuning, seed: Option<u64>) -> Result<Self, SessionError> {
        let mut world = World::new();
        let layout = generate_grid(&mut world, grid)?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            world,
            layout,
            tuning,
            player: PlayerId(1),
            rng,
            turn: 0,
            next_npc: 1,
            next_item: 1,
            next_effect: 1,
            defeated: false,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.layout.grid
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player_id(&self) -> PlayerId {
        self.player
    }

    /// Turns applied so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.defeated
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Live occupant view for the rule engine.
    pub fn view(&self) -> OccupantView<'_> {
        OccupantView(&self.world)
    }

    // ── Placement ──────────────────────────────────────────────────────

    /// Place the player at `(x, y)`, spawning them on first call. The box is revealed.
    pub fn spawn_player(&mut self, x: u32, y: u32) -> Result<PlayerId, SessionError> {
        let at = self.grid().locate(x, y)?;
        match lookup::player_entity(&self.world, self.player) {
            Some(entity) => {
                if let Ok(mut p) = self.world.get::<&mut Player>(entity) {
                    p.box_id = Some(at);
                }
            }
            None => {
                self.world.spawn((
                    Player {
                        id: self.player,
                        box_id: Some(at),
                    },
                    Vitals::new(self.tuning.player_health, self.tuning.player_attack),
                ));
            }
        }
        self.layout.reveal(&self.world, at);
        info!("Player placed at {} ({}, {})", at, x, y);
        Ok(self.player)
    }

    pub fn spawn_npc(
        &mut self,
        name: &str,
        x: u32,
        y: u32,
        health: u32,
    ) -> Result<NpcId, SessionError> {
        let at = self.grid().locate(x, y)?;
        if self.view().npc_at(at).is_some() {
            return Err(SessionError::Occupied { at, kind: "hostile" });
        }
        let id = NpcId(self.next_npc);
        self.next_npc += 1;
        self.world.spawn((
            Npc {
                id,
                name: name.to_string(),
                box_id: Some(at),
                stat: Stat::new(health),
            },
            Strike(self.tuning.npc_attack),
        ));
        debug!("Spawned {} ({:?}) at {}", name, id, at);
        Ok(id)
    }

    pub fn spawn_item(&mut self, name: &str, x: u32, y: u32) -> Result<ItemId, SessionError> {
        let at = self.grid().locate(x, y)?;
        let id = ItemId(self.next_item);
        self.next_item += 1;
        self.world.spawn((
            Item {
                id,
                name: name.to_string(),
                box_id: Some(at),
                player: None,
                equipped: false,
            },
            Power(self.tuning.item_power),
        ));
        debug!("Spawned {} ({:?}) at {}", name, id, at);
        Ok(id)
    }

    pub fn spawn_effect(
        &mut self,
        kind: EffectKind,
        x: u32,
        y: u32,
    ) -> Result<EffectId, SessionError> {
        let at = self.grid().locate(x, y)?;
        if self.view().effect_at(at).is_some() {
            return Err(SessionError::Occupied { at, kind: "effect" });
        }
        let id = EffectId(self.next_effect);
        self.next_effect += 1;
        self.world.spawn((Effect {
            id,
            kind,
            box_id: Some(at),
        },));
        debug!("Spawned {} effect at {}", kind.name(), at);
        Ok(id)
    }

    // ── Boxes ──────────────────────────────────────────────────────────

    pub fn grid_box(&self, id: BoxId) -> Result<GridBox, SessionError> {
        self.layout
            .grid_box(&self.world, id)
            .ok_or(SessionError::UnknownBox(id))
    }

    pub fn box_at(&self, x: u32, y: u32) -> Result<GridBox, SessionError> {
        let id = self.grid().locate(x, y)?;
        self.grid_box(id)
    }

    pub fn reveal(&mut self, id: BoxId) -> Result<(), SessionError> {
        if self.layout.reveal(&self.world, id) {
            Ok(())
        } else {
            Err(SessionError::UnknownBox(id))
        }
    }

    pub fn set_locked(&mut self, id: BoxId, locked: bool) -> Result<(), SessionError> {
        if self.layout.set_locked(&self.world, id, locked) {
            debug!("{} {}", id, if locked { "locked" } else { "unlocked" });
            Ok(())
        } else {
            Err(SessionError::UnknownBox(id))
        }
    }

    // ── Player ─────────────────────────────────────────────────────────

    pub fn player(&self) -> Option<Player> {
        self.view().player(self.player)
    }

    pub fn player_vitals(&self) -> Option<Vitals> {
        let entity = lookup::player_entity(&self.world, self.player)?;
        self.world.get::<&Vitals>(entity).ok().map(|v| *v)
    }

    /// The box the player stands in.
    pub fn current_box(&self) -> Result<GridBox, SessionError> {
        let at = self
            .view()
            .player_box(self.player)
            .ok_or(SessionError::PlayerNotPlaced)?;
        self.grid_box(at)
    }

    /// Equip a carried item, unequipping the player's others.
    pub fn equip(&mut self, item: ItemId) -> Result<(), SessionError> {
        inventory::equip(&mut self.world, self.player, item)
    }

    // ── Rules ──────────────────────────────────────────────────────────

    pub fn display_character(&self, id: BoxId) -> Result<Glyph, SessionError> {
        Ok(self.grid_box(id)?.display_character(&self.view(), self.player))
    }

    pub fn possible_actions(
        &self,
        id: BoxId,
        item: Option<ItemId>,
    ) -> Result<BTreeSet<ActionCode>, SessionError> {
        Ok(self
            .grid_box(id)?
            .possible_actions(&self.view(), self.player, item))
    }

    /// Glyph rows from north (`y == width`) to south, west to east.
    pub fn render_map(&self) -> Vec<String> {
        let grid = *self.grid();
        let view = self.view();
        (1..=grid.width())
            .rev()
            .map(|y| {
                (1..=grid.length())
                    .filter_map(|x| self.layout.grid_box_at(&self.world, x, y))
                    .map(|b| b.display_character(&view, self.player).as_char())
                    .collect::<String>()
            })
            .collect()
    }

    // ── Turns ──────────────────────────────────────────────────────────

    /// Resolve one player action. The action must be legal in the player's
    /// current box for the given item.
    pub fn apply(
        &mut self,
        action: ActionCode,
        item: Option<ItemId>,
    ) -> Result<TurnReport, SessionError> {
        if self.defeated {
            return Err(SessionError::PlayerDefeated);
        }
        let here = self.current_box()?;
        let legal = here.possible_actions(&self.view(), self.player, item);
        if !legal.contains(&action) {
            warn!("Refused {} at {} (legal: {:?})", action, here.id(), legal);
            return Err(SessionError::IllegalAction {
                action,
                at: here.id(),
            });
        }

        self.turn += 1;
        let tuning = self.tuning;
        let item_id = || {
            item.ok_or(SessionError::IllegalAction {
                action,
                at: here.id(),
            })
        };
        let mut events = match action {
            ActionCode::Move(dir) => movement::step(
                &mut self.world,
                &self.layout,
                self.player,
                &here,
                dir,
                &tuning,
                &mut self.rng,
            )?,
            ActionCode::Run => movement::flee(
                &mut self.world,
                &self.layout,
                self.player,
                &here,
                &tuning,
                &mut self.rng,
            )?,
            ActionCode::Combat(CombatAction::Attack) => {
                combat::attack(&mut self.world, self.player, here.id())?
            }
            ActionCode::Combat(CombatAction::Block) => {
                combat::block(&mut self.world, self.player, here.id())?
            }
            ActionCode::Take => inventory::take(&mut self.world, self.player, item_id()?)?,
            ActionCode::Drop => inventory::drop_item(&mut self.world, item_id()?, here.id())?,
            ActionCode::Use => inventory::use_item(&mut self.world, item_id()?, here.id())?,
        };

        if self.player_vitals().is_some_and(|v| !v.stat.is_alive()) {
            info!("Player defeated on turn {}", self.turn);
            self.defeated = true;
            events.push(TurnEvent::PlayerDefeated);
        }

        debug!("Turn {}: {} at {} -> {:?}", self.turn, action, here.id(), events);
        Ok(TurnReport {
            turn: self.turn,
            action,
            events,
        })
    }
}

impl OccupantLookup for SessionEngine {
    fn player(&self, id: PlayerId) -> Option<Player> {
        self.view().player(id)
    }

    fn npc_at(&self, box_id: BoxId) -> Option<Npc> {
        self.view().npc_at(box_id)
    }

    fn effect_at(&self, box_id: BoxId) -> Option<Effect> {
        self.view().effect_at(box_id)
    }

    fn items_at(&self, box_id: BoxId) -> Vec<Item> {
        self.view().items_at(box_id)
    }

    fn item(&self, id: ItemId) -> Option<Item> {
        self.view().item(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxquest_logic::Direction;

    fn engine(length: u32, width: u32) -> SessionEngine {
        let grid = Grid::new(length, width).unwrap();
        let mut engine = SessionEngine::new(grid, Tuning::default(), Some(1)).unwrap();
        engine.spawn_player(1, 1).unwrap();
        engine
    }

    #[test]
    fn test_render_map_rows_north_first() {
        let mut engine = engine(3, 2);
        engine.spawn_npc("goblin", 3, 2, 5).unwrap();
        let far = engine.grid().locate(3, 2).unwrap();
        engine.reveal(far).unwrap();
        assert_eq!(engine.render_map(), vec!["??E".to_string(), "@??".to_string()]);
    }

    #[test]
    fn test_walk_and_leave_box_explored() {
        let mut engine = engine(3, 3);
        let start = engine.current_box().unwrap().id();
        let report = engine.apply(ActionCode::Move(Direction::East), None).unwrap();
        assert_eq!(report.turn, 1);
        assert_eq!(engine.display_character(start).unwrap(), Glyph::Empty);
        assert_eq!(engine.current_box().unwrap().x(), 2);
    }

    #[test]
    fn test_illegal_action_leaves_turn_count() {
        let mut engine = engine(2, 2);
        let result = engine.apply(ActionCode::Move(Direction::South), None);
        assert!(matches!(result, Err(SessionError::IllegalAction { .. })));
        assert_eq!(engine.turn(), 0);
    }

    #[test]
    fn test_hostile_blocks_movement() {
        let mut engine = engine(2, 2);
        engine.spawn_npc("orc", 1, 1, 5).unwrap();
        let here = engine.current_box().unwrap().id();
        let actions = engine.possible_actions(here, None).unwrap();
        assert!(!actions.contains(&ActionCode::Move(Direction::North)));
        assert!(actions.contains(&CombatAction::Attack.into()));
    }

    #[test]
    fn test_take_equip_use_kills_hostile() {
        let mut engine = engine(2, 1);
        let sword = engine.spawn_item("sword", 1, 1).unwrap();
        engine.apply(ActionCode::Take, Some(sword)).unwrap();
        engine.equip(sword).unwrap();
        engine.spawn_npc("slime", 1, 1, 6).unwrap();

        let report = engine.apply(ActionCode::Use, Some(sword)).unwrap();
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, TurnEvent::Defeated { .. })));
        let here = engine.current_box().unwrap().id();
        assert!(engine
            .possible_actions(here, None)
            .unwrap()
            .contains(&ActionCode::Move(Direction::East)));
    }

    #[test]
    fn test_player_defeat_ends_session() {
        let grid = Grid::new(2, 1).unwrap();
        let tuning = Tuning {
            player_health: 3,
            effect_strength: 5,
            ..Tuning::default()
        };
        let mut engine = SessionEngine::new(grid, tuning, Some(1)).unwrap();
        engine.spawn_player(1, 1).unwrap();
        engine.spawn_effect(EffectKind::Hurt, 2, 1).unwrap();

        let report = engine.apply(ActionCode::Move(Direction::East), None).unwrap();
        assert!(report.player_defeated());
        assert!(engine.is_over());
        assert!(matches!(
            engine.apply(ActionCode::Run, None),
            Err(SessionError::PlayerDefeated)
        ));
    }

    #[test]
    fn test_second_hostile_in_box_rejected() {
        let mut engine = engine(2, 2);
        engine.spawn_npc("orc", 2, 2, 5).unwrap();
        assert!(matches!(
            engine.spawn_npc("troll", 2, 2, 5),
            Err(SessionError::Occupied { .. })
        ));
        assert!(matches!(
            engine.spawn_item("axe", 3, 1),
            Err(SessionError::Grid(_))
        ));
    }
}
