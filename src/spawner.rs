use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entity::Entity;
use crate::grid::{Grid, Occupant};

pub const MAX_SPAWN_TRIES: usize = 1000;

pub struct ItemSpawner {
    rng: StdRng,
}

impl ItemSpawner {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        ItemSpawner { rng }
    }

    /// Draws up to `MAX_SPAWN_TRIES` random cells and keeps the ones that are
    /// empty on `grid` and not already taken by this batch. May return fewer
    /// than `count` items.
    pub fn spawn(&mut self, count: usize, grid: &Grid) -> Vec<Entity> {
        let (rows, cols) = (grid.row_count() as i32, grid.col_count() as i32);
        let mut items: Vec<Entity> = Vec::with_capacity(count);

        if rows == 0 || cols == 0 {
            return items;
        }

        let mut tries = 0;
        while items.len() < count && tries < MAX_SPAWN_TRIES {
            let x = self.rng.gen_range(0..cols);
            let y = self.rng.gen_range(0..rows);

            let free = grid.occupant_at(x, y) == Some(Occupant::Empty);
            if free && !items.iter().any(|item| item.is_at(x, y)) {
                items.push(Entity::item(x, y));
            }

            tries += 1;
        }

        items
    }

    /// Swaps the item at (x, y) for a freshly spawned one. When no free cell
    /// turns up the old item is dropped and the collection shrinks by one.
    pub fn replace(&mut self, items: &mut Vec<Entity>, x: i32, y: i32, grid: &Grid) -> Option<Entity> {
        let fresh = self.spawn(1, grid).pop();

        match fresh {
            Some(item) => {
                for slot in items.iter_mut().filter(|slot| slot.is_at(x, y)) {
                    *slot = item;
                }
                debug!("Item at ({}, {}) replaced by ({}, {})", x, y, item.x, item.y);
            }
            None => {
                items.retain(|slot| !slot.is_at(x, y));
                debug!("No free cell for a replacement item, {} left", items.len());
            }
        }

        fresh
    }
}
