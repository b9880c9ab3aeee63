//! Position component of the entity.

use crate::{Component, ComponentType, Owner};

/// Integer position which moves diagonally by one unit every frame.
///
/// Coordinates are not clamped: stepping past `i32::MAX` wraps around to `i32::MIN`.
///
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, ComponentType)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    pub fn set_pos(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}

impl Component for Position {
    fn update(&mut self, _owner: &Owner) {
        self.x = self.x.wrapping_add(1);
        self.y = self.y.wrapping_add(1);
    }
}
