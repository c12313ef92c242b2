//! A single box on the grid.
//!
//! A [`GridBox`] knows its coordinates, its grid, and its own `explored` /
//! `locked` flags. Everything about its occupants is read through an
//! [`OccupantLookup`] at query time, never cached on the box.
//!
//! ```
//! use boxquest_logic::{Grid, GridBox, OccupantTable, PlayerId};
//!
//! let grid = Grid::new(3, 3).unwrap();
//! let corner = GridBox::new(&grid, 1, 1).unwrap();
//! assert_eq!(corner.paths_from_grid_boundaries().to_string(), "ne");
//!
//! let table = OccupantTable::new();
//! assert_eq!(corner.display_character(&table, PlayerId(1)).as_str(), "?");
//! ```

use std::collections::BTreeSet;

use crate::direction::{Direction, DirectionSet};
use crate::error::GridError;
use crate::grid::{BoxId, Grid};
use crate::occupants::{Effect, Item, ItemId, Npc, OccupantLookup, PlayerId};
use crate::policy::{self, ActionCode, ActionFacts, BoxFacts, Glyph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBox {
    id: BoxId,
    x: u32,
    y: u32,
    grid: Grid,
    explored: bool,
    locked: bool,
}

impl GridBox {
    /// A fresh, unexplored and unlocked box at `(x, y)`.
    pub fn new(grid: &Grid, x: u32, y: u32) -> Result<Self, GridError> {
        let id = grid.locate(x, y)?;
        Ok(Self {
            id,
            x,
            y,
            grid: *grid,
            explored: false,
            locked: false,
        })
    }

    pub fn with_explored(mut self, explored: bool) -> Self {
        self.explored = explored;
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn id(&self) -> BoxId {
        self.id
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_explored(&self) -> bool {
        self.explored
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Mark the box as seen. Entering a box reveals it.
    pub fn reveal(&mut self) {
        self.explored = true;
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Directions that stay inside the grid. Pure geometry.
    pub fn paths_from_grid_boundaries(&self) -> DirectionSet {
        let mut paths = DirectionSet::ALL;
        if self.y == self.grid.width() {
            paths.remove(Direction::North);
        }
        if self.y == 1 {
            paths.remove(Direction::South);
        }
        if self.x == self.grid.length() {
            paths.remove(Direction::East);
        }
        if self.x == 1 {
            paths.remove(Direction::West);
        }
        paths
    }

    // ── Occupancy ──────────────────────────────────────────────────────

    pub fn npc(&self, lookup: &impl OccupantLookup) -> Option<Npc> {
        lookup.npc_at(self.id)
    }

    /// First item in the box. Only meaningful when at most one is expected.
    pub fn item(&self, lookup: &impl OccupantLookup) -> Option<Item> {
        lookup.items_at(self.id).into_iter().next()
    }

    pub fn items(&self, lookup: &impl OccupantLookup) -> Vec<Item> {
        lookup.items_at(self.id)
    }

    pub fn effect(&self, lookup: &impl OccupantLookup) -> Option<Effect> {
        lookup.effect_at(self.id)
    }

    fn has_live_hostile(&self, lookup: &impl OccupantLookup) -> bool {
        self.npc(lookup).is_some_and(|n| n.is_alive())
    }

    // ── Rendering / legality ───────────────────────────────────────────

    /// The single glyph this box shows to `player`.
    pub fn display_character(&self, lookup: &impl OccupantLookup, player: PlayerId) -> Glyph {
        let facts = BoxFacts {
            player_here: lookup.player_box(player) == Some(self.id),
            explored: self.is_explored(),
            locked: self.is_locked(),
            effect: self.effect(lookup).map(|e| e.kind),
            live_hostile: self.has_live_hostile(lookup),
            has_items: !self.items(lookup).is_empty(),
        };
        policy::resolve_glyph(&facts)
    }

    /// Legal actions for `player` in this box, optionally about one item.
    ///
    /// An unknown `item_id` just leaves out take/drop/use.
    pub fn possible_actions(
        &self,
        lookup: &impl OccupantLookup,
        player: PlayerId,
        item_id: Option<ItemId>,
    ) -> BTreeSet<ActionCode> {
        let item = item_id.and_then(|id| lookup.item(id));
        let facts = ActionFacts {
            boundary: self.paths_from_grid_boundaries(),
            live_hostile: self.has_live_hostile(lookup),
            item_on_floor: item.as_ref().is_some_and(|i| i.is_on_floor_of(self.id)),
            item_carried: item.as_ref().is_some_and(|i| i.is_carried_by(player)),
            item_equipped: item.as_ref().is_some_and(|i| i.is_equipped_by(player)),
        };
        policy::resolve_actions(&facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occupants::{EffectId, EffectKind, NpcId, OccupantTable, Player, Stat};
    use crate::policy::COMBAT_ACTIONS;

    const HERO: PlayerId = PlayerId(1);

    fn grid3() -> Grid {
        Grid::new(3, 3).unwrap()
    }

    fn table_with_player(at: Option<BoxId>) -> OccupantTable {
        let mut table = OccupantTable::new();
        table.put_player(Player {
            id: HERO,
            box_id: at,
        });
        table
    }

    fn npc_at(box_id: BoxId, health: u32) -> Npc {
        Npc {
            id: NpcId(1),
            name: "goblin".into(),
            box_id: Some(box_id),
            stat: Stat::new(health),
        }
    }

    fn item(id: u32, box_id: Option<BoxId>, player: Option<PlayerId>, equipped: bool) -> Item {
        Item {
            id: ItemId(id),
            name: "sword".into(),
            box_id,
            player,
            equipped,
        }
    }

    #[test]
    fn test_new_rejects_out_of_bounds() {
        let grid = grid3();
        assert!(GridBox::new(&grid, 0, 1).is_err());
        assert!(GridBox::new(&grid, 4, 1).is_err());
        assert!(GridBox::new(&grid, 1, 4).is_err());
        let b = GridBox::new(&grid, 3, 3).unwrap();
        assert!(!b.is_explored());
        assert!(!b.is_locked());
    }

    #[test]
    fn test_paths_corners_edges_interior() {
        let grid = grid3();
        let paths = |x, y| {
            GridBox::new(&grid, x, y)
                .unwrap()
                .paths_from_grid_boundaries()
                .to_string()
        };
        assert_eq!(paths(1, 1), "ne");
        assert_eq!(paths(3, 3), "sw");
        assert_eq!(paths(2, 2), "nsew");
        assert_eq!(paths(1, 3), "se");
        assert_eq!(paths(3, 1), "nw");
        assert_eq!(paths(2, 1), "new");
        assert_eq!(paths(1, 2), "nse");
    }

    #[test]
    fn test_paths_on_single_box_grid() {
        let grid = Grid::new(1, 1).unwrap();
        let b = GridBox::new(&grid, 1, 1).unwrap();
        assert!(b.paths_from_grid_boundaries().is_empty());
        assert_eq!(b.paths_from_grid_boundaries().to_string(), "");
    }

    #[test]
    fn test_flag_accessors() {
        let grid = grid3();
        let mut b = GridBox::new(&grid, 2, 2).unwrap();
        b.reveal();
        b.set_locked(true);
        assert!(b.is_explored());
        assert!(b.is_locked());
        let plain = GridBox::new(&grid, 2, 2).unwrap().with_explored(true);
        assert!(plain.is_explored() && !plain.is_locked());
    }

    #[test]
    fn test_occupancy_queries() {
        let grid = grid3();
        let b = GridBox::new(&grid, 1, 1).unwrap();
        let mut table = table_with_player(None);
        assert!(b.npc(&table).is_none());
        assert!(b.item(&table).is_none());
        assert!(b.items(&table).is_empty());

        table.put_npc(npc_at(b.id(), 5));
        for id in 1..=3 {
            table.put_item(item(id, Some(b.id()), None, false));
        }
        assert_eq!(b.npc(&table).map(|n| n.name), Some("goblin".to_string()));
        assert_eq!(b.items(&table).len(), 3);
        assert!(b.item(&table).is_some());
    }

    #[test]
    fn test_player_glyph_overrides() {
        let grid = grid3();
        let b = GridBox::new(&grid, 1, 1).unwrap().with_locked(true);
        let mut table = table_with_player(Some(b.id()));
        table.put_npc(npc_at(b.id(), 10));
        assert_eq!(b.display_character(&table, HERO), Glyph::Player);
        // Someone else's view of the same box is not '@'.
        assert_eq!(b.display_character(&table, PlayerId(2)), Glyph::Unexplored);
    }

    #[test]
    fn test_glyphs_for_explored_contents() {
        let grid = grid3();
        let b = GridBox::new(&grid, 2, 2).unwrap().with_explored(true);
        let mut table = table_with_player(None);
        assert_eq!(b.display_character(&table, HERO).as_str(), "X");

        table.put_item(item(1, Some(b.id()), None, false));
        assert_eq!(b.display_character(&table, HERO).as_str(), "I");

        table.put_npc(npc_at(b.id(), 3));
        assert_eq!(b.display_character(&table, HERO).as_str(), "E");

        table.put_effect(Effect {
            id: EffectId(1),
            kind: EffectKind::Heal,
            box_id: Some(b.id()),
        });
        assert_eq!(b.display_character(&table, HERO).as_str(), "+");

        let locked = b.with_locked(true);
        assert_eq!(locked.display_character(&table, HERO).as_str(), "L");
        let hidden = b.with_explored(false);
        assert_eq!(hidden.display_character(&table, HERO).as_str(), "?");
    }

    #[test]
    fn test_dead_hostile_is_not_shown() {
        let grid = grid3();
        let b = GridBox::new(&grid, 2, 2).unwrap().with_explored(true);
        let mut table = table_with_player(None);
        table.put_npc(npc_at(b.id(), 0));
        assert_eq!(b.display_character(&table, HERO).as_str(), "X");
    }

    #[test]
    fn test_actions_live_and_dead_hostile() {
        let grid = grid3();
        let b = GridBox::new(&grid, 1, 1).unwrap();
        let mut table = table_with_player(Some(b.id()));

        table.put_npc(npc_at(b.id(), 10));
        let actions = b.possible_actions(&table, HERO, None);
        for combat in COMBAT_ACTIONS {
            assert!(actions.contains(&ActionCode::Combat(combat)));
        }
        assert!(!actions.contains(&ActionCode::Move(Direction::North)));
        assert!(!actions.contains(&ActionCode::Move(Direction::East)));
        assert!(actions.contains(&ActionCode::Run));

        table.npc_mut(NpcId(1)).unwrap().stat.current_health = 0;
        let actions = b.possible_actions(&table, HERO, None);
        for combat in COMBAT_ACTIONS {
            assert!(!actions.contains(&ActionCode::Combat(combat)));
        }
        assert!(actions.contains(&ActionCode::Move(Direction::North)));
        assert!(actions.contains(&ActionCode::Move(Direction::East)));
    }

    #[test]
    fn test_movement_limited_to_boundaries() {
        let grid = grid3();
        let b = GridBox::new(&grid, 1, 1).unwrap();
        let table = table_with_player(Some(b.id()));
        let actions = b.possible_actions(&table, HERO, None);
        let expected: BTreeSet<ActionCode> = [
            ActionCode::Run,
            ActionCode::Move(Direction::North),
            ActionCode::Move(Direction::East),
        ]
        .into_iter()
        .collect();
        assert_eq!(actions, expected);
    }

    #[test]
    fn test_item_actions() {
        let grid = grid3();
        let here = GridBox::new(&grid, 1, 1).unwrap();
        let there = GridBox::new(&grid, 2, 1).unwrap();
        let mut table = table_with_player(Some(here.id()));

        table.put_item(item(1, Some(here.id()), None, false));
        assert!(here.possible_actions(&table, HERO, Some(ItemId(1))).contains(&ActionCode::Take));
        assert!(!there.possible_actions(&table, HERO, Some(ItemId(1))).contains(&ActionCode::Take));

        table.put_item(item(2, None, Some(HERO), false));
        let actions = here.possible_actions(&table, HERO, Some(ItemId(2)));
        assert!(actions.contains(&ActionCode::Drop));
        assert!(!actions.contains(&ActionCode::Use));
        assert!(!actions.contains(&ActionCode::Take));

        table.put_item(item(3, None, Some(HERO), true));
        let actions = here.possible_actions(&table, HERO, Some(ItemId(3)));
        assert!(actions.contains(&ActionCode::Drop));
        assert!(actions.contains(&ActionCode::Use));

        table.put_item(item(4, None, None, true));
        let actions = here.possible_actions(&table, HERO, Some(ItemId(4)));
        assert!(!actions.contains(&ActionCode::Drop));
        assert!(!actions.contains(&ActionCode::Use));

        // Unknown id: no item actions, not an error.
        let actions = here.possible_actions(&table, HERO, Some(ItemId(99)));
        assert!(!actions
            .iter()
            .any(|a| matches!(a, ActionCode::Take | ActionCode::Drop | ActionCode::Use)));
    }
}
