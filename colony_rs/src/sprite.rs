//! Sprite component which draws its entity at the entity's position.

use std::cell::RefCell;
use std::rc::Rc;

use colony_ecs::{Component, ComponentType, Owner, Position};

/// Size of the square region of the texture being drawn.
pub const SOURCE_SIZE: u32 = 360;

/// One textured rectangle to be drawn on the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub texture: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Queue of draw calls collected during one frame.
pub type DrawQueue = Rc<RefCell<Vec<DrawCall>>>;

/// Draws the texture at the [`Position`] of its entity, scaled down by half.
#[derive(ComponentType)]
pub struct Sprite {
    texture: String,
    queue: DrawQueue,
}

impl Sprite {
    pub fn new(texture: impl Into<String>, queue: DrawQueue) -> Self {
        Self {
            texture: texture.into(),
            queue,
        }
    }

    /// Path of the texture being drawn.
    pub fn texture(&self) -> &str {
        &self.texture
    }

    pub fn set_texture(&mut self, texture: impl Into<String>) {
        self.texture = texture.into();
        log::debug!("sprite texture set to {}", self.texture);
    }
}

impl Component for Sprite {
    fn init(&mut self, owner: &Owner) {
        if !owner.has_component::<Position>() {
            log::warn!("sprite attached to entity {:?} without position", owner.id());
        }
    }

    fn draw(&mut self, owner: &Owner) {
        let position = match owner.get_component::<Position>() {
            Ok(position) => position,
            Err(error) => {
                log::warn!("cannot draw sprite of entity {:?}: {}", owner.id(), error);
                return;
            }
        };
        self.queue.borrow_mut().push(DrawCall {
            texture: self.texture.clone(),
            x: position.x(),
            y: position.y(),
            width: SOURCE_SIZE / 2,
            height: SOURCE_SIZE / 2,
        });
    }
}
