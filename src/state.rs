use log::{error, info};

use crate::config::Settings;
use crate::entity::Entity;
use crate::grid::{Grid, Occupant};
use crate::snake::{Direction, Snake};
use crate::spawner::ItemSpawner;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBody,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or already crashed, nothing changed.
    Idle,
    Moved,
    Picked { x: i32, y: i32 },
    Crashed(Collision),
}

/// Everything one round of the game needs: board, snake, ammo, the direction
/// of travel and the single-slot input buffer. Owned by the driver loop.
pub struct GameState {
    settings: Settings,
    spawner: ItemSpawner,
    grid: Grid,
    snake: Snake,
    items: Vec<Entity>,
    direction: Direction,
    pending_direction: Option<Direction>,
    stopped: bool,
    collision: Option<Collision>,
}

impl GameState {
    pub fn new(settings: Settings, spawner: ItemSpawner) -> Self {
        let grid = Grid::new(settings.board_size);
        let snake = initial_snake(&settings);

        let mut state = GameState {
            settings,
            spawner,
            grid,
            snake,
            items: vec![],
            direction: Direction::Right,
            pending_direction: None,
            stopped: true,
            collision: None,
        };
        state.reset();
        state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_game_over(&self) -> bool {
        self.collision.is_some()
    }

    pub fn collision(&self) -> Option<Collision> {
        self.collision
    }

    /// Start/stop toggle. A crashed round stays stopped until `reset`.
    pub fn set_stopped(&mut self, stopped: bool) {
        if !stopped && self.collision.is_some() {
            info!("Refusing to resume a finished round, reset first");
            return;
        }
        if self.stopped != stopped {
            info!("Game {}", if stopped { "stopped" } else { "started" });
        }
        self.stopped = stopped;
    }

    pub fn toggle_stopped(&mut self) {
        self.set_stopped(!self.stopped);
    }

    /// Overwrites the pending direction. The opposite of the current
    /// direction of travel is dropped.
    pub fn on_direction_input(&mut self, dir: Direction) {
        if dir.is_opposite(self.direction) {
            return;
        }
        self.pending_direction = Some(dir);
    }

    pub fn on_tick(&mut self) -> TickOutcome {
        if self.stopped || self.collision.is_some() {
            return TickOutcome::Idle;
        }

        let move_dir = match self.pending_direction.take() {
            Some(next) if !next.is_opposite(self.direction) => {
                self.direction = next;
                next
            }
            _ => self.direction,
        };

        let mut next = self.snake.clone();
        next.shift_body();

        let (hx, hy) = self.snake.head();
        let (dx, dy) = move_dir.delta();
        let (x, y) = (hx + dx, hy + dy);

        // Occupancy is the grid painted last tick, so the tail cell that is
        // about to be vacated still counts as body.
        let occupant = match self.grid.occupant_at(x, y) {
            None => return self.crash(Collision::Wall, x, y),
            Some(Occupant::SnakeBody) => return self.crash(Collision::SelfBody, x, y),
            Some(occupant) => occupant,
        };

        next.move_head(x, y);

        let outcome = if occupant == Occupant::Item {
            self.spawner.replace(&mut self.items, x, y, &self.grid);
            next.grow(self.direction);
            info!("Picked up ammo at ({}, {}), snake length {}", x, y, next.segment_count());
            TickOutcome::Picked { x, y }
        } else {
            TickOutcome::Moved
        };

        self.snake = next;
        self.repaint();
        outcome
    }

    /// Fresh board, snake, ammo and direction. The pause flag is left alone.
    pub fn reset(&mut self) {
        self.grid = Grid::new(self.settings.board_size);
        self.snake = initial_snake(&self.settings);
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.collision = None;

        // Items must not land on the new snake, so spawn against a board that
        // already shows it.
        self.items = vec![];
        self.repaint();
        self.items = self.spawner.spawn(self.settings.initial_items, &self.grid);
        self.repaint();

        info!(
            "Reset: {}x{} board, snake length {}, {} ammo",
            self.grid.row_count(),
            self.grid.col_count(),
            self.snake.segment_count(),
            self.items.len()
        );
    }

    pub fn resize_to_fight_mode(&mut self) {
        match self.grid.expand(self.settings.fight_rows, self.settings.fight_cols) {
            Ok(grid) => {
                self.grid = grid;
                info!("Board expanded to {}x{}", self.grid.row_count(), self.grid.col_count());
            }
            Err(e) => error!("{}", e),
        }
    }

    pub fn resize_to_default(&mut self) {
        match self.grid.shrink(self.settings.board_size, self.settings.board_size) {
            Ok(grid) => {
                self.grid = grid;
                info!("Board shrunk to {}x{}", self.grid.row_count(), self.grid.col_count());
            }
            Err(e) => error!("{}", e),
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn crash(&mut self, collision: Collision, x: i32, y: i32) -> TickOutcome {
        info!("Collision {:?} at ({}, {}), snake length {}", collision, x, y, self.snake.segment_count());
        self.collision = Some(collision);
        self.stopped = true;
        TickOutcome::Crashed(collision)
    }

    fn repaint(&mut self) {
        self.grid = self.grid.repaint(&[self.snake.segments(), &self.items]);
    }
}

fn initial_snake(settings: &Settings) -> Snake {
    let head = settings.snake_head;
    Snake::new((head.x, head.y), settings.snake_length, Direction::Down)
}
