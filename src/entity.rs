use crate::grid::Occupant;

pub const SEGMENT_HEALTH: u8 = 2;
pub const ITEM_HEALTH: u8 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityKind {
    SnakeBody,
    SnakeHead,
    Item,
}

impl EntityKind {
    pub fn occupant(self) -> Occupant {
        match self {
            EntityKind::SnakeBody => Occupant::SnakeBody,
            EntityKind::SnakeHead => Occupant::SnakeHead,
            EntityKind::Item => Occupant::Item,
        }
    }
}

/// Anything that sits on a board cell: snake segments and ammo items.
///
/// Coordinates are signed so that a step off the board can be represented
/// and rejected by the bounds check instead of wrapping around.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub x: i32,
    pub y: i32,
    pub health: u8,
    pub kind: EntityKind,
}

impl Entity {
    pub fn segment(x: i32, y: i32, kind: EntityKind) -> Self {
        Entity { x, y, health: SEGMENT_HEALTH, kind }
    }

    pub fn item(x: i32, y: i32) -> Self {
        Entity { x, y, health: ITEM_HEALTH, kind: EntityKind::Item }
    }

    pub fn pos(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}
