//! Grid layout - one entity per box, indexed by box id

use std::collections::HashMap;

use boxquest_logic::{BoxId, Grid, GridBox, GridError};
use hecs::{Entity, World};

/// The boxes of one grid and the entities that hold them.
#[derive(Debug, Clone)]
pub struct GridLayout {
    pub grid: Grid,
    boxes: HashMap<BoxId, Entity>,
}

impl GridLayout {
    pub fn entity(&self, id: BoxId) -> Option<Entity> {
        self.boxes.get(&id).copied()
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Box ids in id order.
    pub fn box_ids(&self) -> impl Iterator<Item = BoxId> + '_ {
        let grid = self.grid;
        grid.coords().filter_map(move |(x, y)| grid.box_id(x, y))
    }

    /// Copy of the box's current state.
    pub fn grid_box(&self, world: &World, id: BoxId) -> Option<GridBox> {
        let entity = self.entity(id)?;
        world.get::<&GridBox>(entity).ok().map(|b| *b)
    }

    pub fn grid_box_at(&self, world: &World, x: u32, y: u32) -> Option<GridBox> {
        self.grid_box(world, self.grid.box_id(x, y)?)
    }

    /// Mark a box explored. Returns false for an unknown box.
    pub fn reveal(&self, world: &World, id: BoxId) -> bool {
        self.update(world, id, |b| b.reveal())
    }

    pub fn set_locked(&self, world: &World, id: BoxId, locked: bool) -> bool {
        self.update(world, id, |b| b.set_locked(locked))
    }

    fn update(&self, world: &World, id: BoxId, f: impl FnOnce(&mut GridBox)) -> bool {
        let Some(entity) = self.entity(id) else {
            return false;
        };
        match world.get::<&mut GridBox>(entity) {
            Ok(mut b) => {
                f(&mut *b);
                true
            }
            Err(_) => false,
        }
    }
}

/// Spawn one entity per box of `grid`.
pub fn generate_grid(world: &mut World, grid: Grid) -> Result<GridLayout, GridError> {
    let mut boxes = HashMap::with_capacity(grid.box_count());
    for (x, y) in grid.coords() {
        let grid_box = GridBox::new(&grid, x, y)?;
        let entity = world.spawn((grid_box,));
        boxes.insert(grid_box.id(), entity);
    }
    Ok(GridLayout { grid, boxes })
}
