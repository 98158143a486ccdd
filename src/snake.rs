use crate::entity::{Entity, EntityKind};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// One step in this direction as (dx, dy). Up is towards row 0.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// Segments in head-first order. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    segments: Vec<Entity>,
}

impl Snake {
    /// Builds a straight snake with its head at `head`, the body trailing
    /// away from it in `trailing` direction. Always at least the head.
    pub fn new(head: (i32, i32), size: usize, trailing: Direction) -> Self {
        let diff = trailing.delta();
        let size = i32::try_from(size).unwrap_or(i32::MAX).max(1);

        let segments = (0..size)
            .map(|i| {
                let kind = if i == 0 { EntityKind::SnakeHead } else { EntityKind::SnakeBody };
                Entity::segment(head.0 + diff.0 * i, head.1 + diff.1 * i, kind)
            })
            .collect();

        Snake { segments }
    }

    #[cfg(test)]
    pub fn from_positions(positions: &[(i32, i32)]) -> Self {
        let segments = positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                let kind = if i == 0 { EntityKind::SnakeHead } else { EntityKind::SnakeBody };
                Entity::segment(x, y, kind)
            })
            .collect();
        Snake { segments }
    }

    pub fn segments(&self) -> &[Entity] {
        &self.segments
    }

    pub fn head(&self) -> (i32, i32) {
        self.segments[0].pos()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Follow-the-leader: each non-head segment takes the position its
    /// predecessor held before this call. Walks tail to head so every read
    /// sees a not-yet-updated predecessor.
    pub fn shift_body(&mut self) {
        for i in (1..self.segments.len()).rev() {
            let (x, y) = self.segments[i - 1].pos();
            self.segments[i].x = x;
            self.segments[i].y = y;
        }
    }

    pub fn move_head(&mut self, x: i32, y: i32) {
        self.segments[0].x = x;
        self.segments[0].y = y;
    }

    /// Appends one body segment past the tail, repeating the tail's last
    /// step. A lone head grows backwards against `direction`.
    pub fn grow(&mut self, direction: Direction) {
        let n = self.segments.len();

        let (x, y) = if n < 2 {
            let (hx, hy) = self.head();
            let (dx, dy) = direction.opposite().delta();
            (hx + dx, hy + dy)
        } else {
            let (tx, ty) = self.segments[n - 1].pos();
            let (bx, by) = self.segments[n - 2].pos();
            (tx + (tx - bx), ty + (ty - by))
        };

        self.segments.push(Entity::segment(x, y, EntityKind::SnakeBody));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(snake: &Snake) -> Vec<(i32, i32)> {
        snake.segments().iter().map(|s| s.pos()).collect()
    }

    #[test]
    fn test_opposites() {
        assert!(Up.is_opposite(Down));
        assert!(Left.is_opposite(Right));
        assert!(!Up.is_opposite(Left));
        assert!(!Right.is_opposite(Right));
    }

    #[test]
    fn test_new_trails_behind_head() {
        let snake = Snake::new((5, 5), 14, Down);
        assert_eq!(snake.segment_count(), 14);
        assert_eq!(snake.head(), (5, 5));
        assert_eq!(snake.segments()[13].pos(), (5, 18));
        assert_eq!(snake.segments()[0].kind, EntityKind::SnakeHead);
        assert!(snake.segments()[1..].iter().all(|s| s.kind == EntityKind::SnakeBody && s.health == 2));
    }

    #[test]
    fn test_new_keeps_the_head_for_zero_size() {
        let snake = Snake::new((3, 3), 0, Down);
        assert_eq!(snake.segment_count(), 1);
        assert_eq!(snake.head(), (3, 3));
        assert_eq!(snake.segments()[0].kind, EntityKind::SnakeHead);
    }

    #[test]
    fn test_shift_body_follows_leader() {
        let mut snake = Snake::from_positions(&[(2, 2), (2, 3), (3, 3)]);
        snake.shift_body();
        snake.move_head(1, 2);
        assert_eq!(positions(&snake), vec![(1, 2), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_grow_extrapolates_tail() {
        let mut snake = Snake::from_positions(&[(6, 5), (5, 5), (5, 6)]);
        snake.grow(Right);
        assert_eq!(snake.segment_count(), 4);
        assert_eq!(snake.segments()[3].pos(), (5, 7));
        assert_eq!(snake.segments()[3].kind, EntityKind::SnakeBody);
    }

    #[test]
    fn test_grow_single_segment_goes_backwards() {
        let mut snake = Snake::from_positions(&[(4, 4)]);
        snake.grow(Up);
        assert_eq!(positions(&snake), vec![(4, 4), (4, 5)]);

        let mut snake = Snake::from_positions(&[(4, 4)]);
        snake.grow(Right);
        assert_eq!(positions(&snake), vec![(4, 4), (3, 4)]);
    }
}
