use thiserror::Error;

use crate::entity::Entity;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Terrain {
    Normal = 0,
    /// Cells added by an expand call.
    Expanded = 1,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Occupant {
    Empty = 0,
    SnakeBody = 1,
    SnakeHead = 2,
    Item = 3,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub terrain: Terrain,
    pub occupant: Occupant,
}

impl Cell {
    fn new(row: usize, col: usize, terrain: Terrain) -> Self {
        Cell { row, col, terrain, occupant: Occupant::Empty }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeError {
    #[error("expand can only grow the board (requested {rows}x{cols}, board is {current_rows}x{current_cols}), use shrink instead")]
    Expand { rows: usize, cols: usize, current_rows: usize, current_cols: usize },
    #[error("shrink can only reduce the board (requested {rows}x{cols}, board is {current_rows}x{current_cols}), use expand instead")]
    Shrink { rows: usize, cols: usize, current_rows: usize, current_cols: usize },
}

/// Rectangular board. `cells[row][col]`, where row is the entity `y` and col
/// is the entity `x`.
///
/// Occupancy is never patched in place: [`Grid::repaint`] rebuilds it from
/// the entity lists every tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        let cells: Vec<Vec<Cell>> = (0..size)
            .map(|row| (0..size).map(|col| Cell::new(row, col, Terrain::Normal)).collect())
            .collect();
        Grid { cells }
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn col_count(&self) -> usize {
        self.cells.first().map_or(0, |row| row.len())
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (y as usize) < self.row_count() && (x as usize) < self.col_count()
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Option<&Cell> {
        if !self.contains(x, y) {
            return None;
        }
        Some(&self.cells[y as usize][x as usize])
    }

    /// `None` when (x, y) is off the board.
    pub fn occupant_at(&self, x: i32, y: i32) -> Option<Occupant> {
        self.cell_at(x, y).map(|cell| cell.occupant)
    }

    pub fn expand(&self, rows: usize, cols: usize) -> Result<Grid, SizeError> {
        let (current_rows, current_cols) = (self.row_count(), self.col_count());

        if rows < current_rows || cols < current_cols {
            return Err(SizeError::Expand { rows, cols, current_rows, current_cols });
        }

        let mut cells = self.cells.clone();

        for (row, current) in cells.iter_mut().enumerate() {
            current.extend((current_cols..cols).map(|col| Cell::new(row, col, Terrain::Expanded)));
        }

        for row in current_rows..rows {
            cells.push((0..cols).map(|col| Cell::new(row, col, Terrain::Expanded)).collect());
        }

        Ok(Grid { cells })
    }

    pub fn shrink(&self, rows: usize, cols: usize) -> Result<Grid, SizeError> {
        let (current_rows, current_cols) = (self.row_count(), self.col_count());

        if rows > current_rows || cols > current_cols {
            return Err(SizeError::Shrink { rows, cols, current_rows, current_cols });
        }

        let cells: Vec<Vec<Cell>> = self.cells[..rows]
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                row[..cols]
                    .iter()
                    .enumerate()
                    .map(|(col_idx, cell)| Cell { row: row_idx, col: col_idx, ..*cell })
                    .collect()
            })
            .collect();

        Ok(Grid { cells })
    }

    /// Clears every occupant, then stamps the groups in order. Later entities
    /// overwrite earlier ones on the same cell; off-board entities are skipped.
    pub fn repaint(&self, groups: &[&[Entity]]) -> Grid {
        let mut painted = self.clone();

        for cell in painted.cells.iter_mut().flatten() {
            cell.occupant = Occupant::Empty;
        }

        for entity in groups.iter().flat_map(|group| group.iter()) {
            if painted.contains(entity.x, entity.y) {
                painted.cells[entity.y as usize][entity.x as usize].occupant = entity.kind.occupant();
            }
        }

        painted
    }
}
