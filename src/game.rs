use std::io;
use std::time::{Duration, Instant};

use crate::Coords;
use crate::grid::{Cell, Occupant, Terrain};
use crate::term::TermManager;
use crate::snake::Direction::{*, self};
use crate::state::{Collision, GameState, TickOutcome};

use crossterm::event::{KeyEvent, KeyModifiers, KeyCode};
use log::info;

// Every cell is two terminal columns wide so the board looks square.
const CELL_WIDTH: u16 = 2;

const SNAKE_BODY_GLYPH: &str = "██";
const ITEM_GLYPH: &str = "()";
const EXPANDED_GLYPH: &str = "··";
const EMPTY_GLYPH: &str = "  ";
const DEAD_SNAKE_GLYPH: &str = "XX";

#[derive(Debug, PartialEq, Eq)]
enum Frame {
    TooSmall { need: Coords },
    Board { width: u16, height: u16 },
}

enum Control {
    Continue,
    Redraw,
    Quit,
}

pub struct SnakeGame {
    term: TermManager,
    state: GameState,
    tick_interval: Duration,
    drawn_size: Option<(usize, usize)>,
}

impl SnakeGame {
    pub fn new(state: GameState, tick_interval: Duration) -> Self {
        SnakeGame { term: TermManager::new(), state, tick_interval, drawn_size: None }
    }

    /// Takes over the terminal until the player quits, restoring it even when
    /// the loop fails.
    pub fn run(&mut self) -> io::Result<()> {
        self.term.setup()?;
        let res = self.play();
        let restored = self.term.restore();
        res.and(restored)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn play(&mut self) -> io::Result<()> {
        info!("Starting game, tick interval {:?}", self.tick_interval);
        self.draw()?;

        let mut last_tick = Instant::now();

        loop {
            let timeout = self.tick_interval.saturating_sub(last_tick.elapsed());
            let mut redraw = false;

            for key_ev in self.term.read_key_events(timeout)? {
                match self.handle_key(&key_ev) {
                    Control::Quit => return Ok(()),
                    Control::Redraw => redraw = true,
                    Control::Continue => {}
                }
            }

            if last_tick.elapsed() >= self.tick_interval {
                last_tick = Instant::now();
                if self.state.on_tick() != TickOutcome::Idle {
                    redraw = true;
                }
            }

            if redraw {
                self.draw()?;
            }
        }
    }

    fn handle_key(&mut self, ev: &KeyEvent) -> Control {
        if is_ctrl_c(ev) {
            return Control::Quit;
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Up => self.steer(Up),
            KeyCode::Char('a') | KeyCode::Left => self.steer(Left),
            KeyCode::Char('s') | KeyCode::Down => self.steer(Down),
            KeyCode::Char('d') | KeyCode::Right => self.steer(Right),
            KeyCode::Char(' ') => {
                self.state.toggle_stopped();
                Control::Redraw
            }
            KeyCode::Char('r') => {
                self.state.reset();
                Control::Redraw
            }
            KeyCode::Char('e') => {
                self.state.resize_to_fight_mode();
                Control::Redraw
            }
            KeyCode::Char('x') => {
                self.state.resize_to_default();
                Control::Redraw
            }
            KeyCode::Char('q') => Control::Quit,
            _ => Control::Continue,
        }
    }

    fn steer(&mut self, dir: Direction) -> Control {
        self.state.on_direction_input(dir);
        Control::Continue
    }

    /// Works out whether the board fits in a terminal of `term_size` and
    /// whether the screen has to be wiped first.
    fn frame_layout(&mut self, term_size: Coords) -> (bool, Frame) {
        let grid = self.state.grid();
        let size = (grid.row_count(), grid.col_count());

        // Shrinking leaves stale columns behind, so start from a blank screen
        // whenever the board changes shape.
        let clear = self.drawn_size != Some(size);

        let (rows, cols) = (size.0 as u16, size.1 as u16);
        let (width, height) = (cols * CELL_WIDTH + 2, rows + 2);
        let (term_w, term_h) = term_size;

        if term_w < width || term_h < height + 2 {
            // The warning is wider than the board, wipe it once we fit again.
            self.drawn_size = None;
            return (clear, Frame::TooSmall { need: (width, height + 2) });
        }

        self.drawn_size = Some(size);
        (clear, Frame::Board { width, height })
    }

    fn draw(&mut self) -> io::Result<()> {
        let term_size = self.term.get_terminal_size()?;
        let (clear, frame) = self.frame_layout(term_size);

        if clear {
            self.term.clear()?;
        }

        let (width, height) = match frame {
            Frame::Board { width, height } => (width, height),
            Frame::TooSmall { need } => {
                self.term.print_line(0, &format!(
                    "Terminal too small: need {}x{}, have {}x{}", need.0, need.1, term_size.0, term_size.1
                ))?;
                return self.term.flush();
            }
        };

        self.term.draw_borders((0, 0), width, height)?;

        let grid = self.state.grid();
        let (rows, cols) = (grid.row_count(), grid.col_count());
        let dead = self.state.is_game_over();
        let head = self.state.direction().head_char();
        for (y, row) in grid.rows().iter().enumerate() {
            let line: String = row.iter().map(|cell| cell_glyph(cell, head, dead)).collect();
            self.term.print_str_at((1, y as u16 + 1), &line)?;
        }

        let status = if dead {
            "GAME OVER!"
        } else if self.state.is_stopped() {
            "STOPPED"
        } else {
            "PLAY"
        };
        self.term.print_line(height, &format!(
            "{}  length: {}  ammo: {}  board: {}x{}",
            status,
            self.state.snake().segment_count(),
            self.state.items().len(),
            rows,
            cols
        ))?;
        self.term.print_line(height + 1, "arrows/WASD move  space start/stop  r reset  e expand  x shrink  q quit")?;

        if let Some(collision) = self.state.collision() {
            let reason = match collision {
                Collision::Wall => "You hit the wall",
                Collision::SelfBody => "You ran into yourself",
            };
            let center: Coords = (width / 2, height / 2);
            self.term.show_message(center, &["Game over!", reason, "", "Press R to reset,", "or Q to quit."])?;
        }

        self.term.flush()
    }
}

fn cell_glyph(cell: &Cell, head: char, dead: bool) -> String {
    match cell.occupant {
        Occupant::SnakeHead | Occupant::SnakeBody if dead => DEAD_SNAKE_GLYPH.to_string(),
        Occupant::SnakeHead => format!("{}{}", head, head),
        Occupant::SnakeBody => SNAKE_BODY_GLYPH.to_string(),
        Occupant::Item => ITEM_GLYPH.to_string(),
        Occupant::Empty => match cell.terrain {
            Terrain::Normal => EMPTY_GLYPH.to_string(),
            Terrain::Expanded => EXPANDED_GLYPH.to_string(),
        },
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::grid::Grid;
    use crate::spawner::ItemSpawner;

    fn create_game() -> SnakeGame {
        let state = GameState::new(Settings::default(), ItemSpawner::new(Some(5)));
        SnakeGame::new(state, Duration::from_millis(100))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keys_map_to_state_calls() {
        let mut game = create_game();

        assert!(matches!(game.handle_key(&key(KeyCode::Up)), Control::Continue));
        assert_eq!(game.state.pending_direction(), Some(Up));

        assert!(matches!(game.handle_key(&key(KeyCode::Char(' '))), Control::Redraw));
        assert!(!game.state.is_stopped());

        game.handle_key(&key(KeyCode::Char('e')));
        assert_eq!(game.state.grid().col_count(), 30);
        game.handle_key(&key(KeyCode::Char('x')));
        assert_eq!(game.state.grid().col_count(), 20);
    }

    #[test]
    fn test_small_terminal_forces_redraw_once_it_fits() {
        let mut game = create_game();

        assert_eq!(game.frame_layout((80, 30)), (true, Frame::Board { width: 42, height: 22 }));
        assert_eq!(game.frame_layout((80, 30)), (false, Frame::Board { width: 42, height: 22 }));

        assert_eq!(game.frame_layout((30, 10)).1, Frame::TooSmall { need: (42, 24) });
        assert_eq!(game.frame_layout((80, 30)), (true, Frame::Board { width: 42, height: 22 }));
    }

    #[test]
    fn test_quit_keys() {
        let mut game = create_game();
        assert!(matches!(game.handle_key(&key(KeyCode::Char('q'))), Control::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(game.handle_key(&ctrl_c), Control::Quit));
    }

    #[test]
    fn test_cell_glyphs() {
        let grid = Grid::new(1).expand(1, 2).unwrap();
        let cells = &grid.rows()[0];
        assert_eq!(cell_glyph(&cells[0], '>', false), EMPTY_GLYPH);
        assert_eq!(cell_glyph(&cells[1], '>', false), EXPANDED_GLYPH);

        let head = Cell { occupant: Occupant::SnakeHead, ..cells[0] };
        assert_eq!(cell_glyph(&head, '>', false), ">>");
        assert_eq!(cell_glyph(&head, '>', true), DEAD_SNAKE_GLYPH);
    }
}
