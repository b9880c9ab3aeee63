//! Frame driver which owns all state of the simulation.

use colony_ecs::{EntityId, Manager, Position};

use crate::config::Config;
use crate::sprite::{DrawQueue, Sprite};

/// Texture of the player at the start of the simulation.
pub const PLAYER_TEXTURE: &str = "textures/sawblade.png";

/// Texture of the player after it crossed the swap threshold.
pub const SWAPPED_TEXTURE: &str = "textures/ant.png";

/// State of the simulation driven once per frame.
pub struct Game {
    config: Config,
    manager: Manager,
    player: EntityId,
    frame: u64,
}

impl Game {
    /// Creates the simulation with a single player entity.
    pub fn new(config: Config, queue: DrawQueue) -> Self {
        let mut manager = Manager::new();
        let player = manager.add_entity();
        player.add_component(Position::default());
        player.add_component(Sprite::new(PLAYER_TEXTURE, queue));
        let player = player.id();
        log::info!("player {:?} spawned", player);

        Self {
            config,
            manager,
            player,
            frame: 0,
        }
    }

    /// Returns `false` once the frame limit is reached.
    pub fn running(&self) -> bool {
        self.frame < self.config.frame_limit()
    }

    /// Simulates one frame.
    ///
    /// # Errors
    ///
    /// An error is returned if the player entity or its components were removed.
    ///
    pub fn update(&mut self) -> colony_ecs::Result<()> {
        self.manager.refresh();
        self.manager.update();

        let player = self.manager.try_entity_mut(self.player)?;
        if player.get_component::<Position>()?.x() > self.config.texture_swap_x() {
            let sprite = player.get_component_mut::<Sprite>()?;
            if sprite.texture() != SWAPPED_TEXTURE {
                sprite.set_texture(SWAPPED_TEXTURE);
            }
        }

        self.frame += 1;
        Ok(())
    }

    /// Draws current state of the simulation.
    pub fn render(&mut self) {
        self.manager.draw();
    }

    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut Manager {
        &mut self.manager
    }

    /// Identifier of the player entity.
    pub fn player(&self) -> EntityId {
        self.player
    }

    /// Count of simulated frames.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use colony_ecs::EcsError;

    use super::*;

    fn game(frame_limit: u64) -> (Game, DrawQueue) {
        let queue = DrawQueue::default();
        let config = Config::default().with_frame_limit(frame_limit);
        (Game::new(config, Rc::clone(&queue)), queue)
    }

    fn texture(game: &Game) -> String {
        let player = game.manager().entity(game.player()).unwrap();
        player.get_component::<Sprite>().unwrap().texture().to_string()
    }

    #[test]
    fn test_spawn() {
        let (game, _) = game(1);
        let player = game.manager().entity(game.player()).unwrap();

        assert_eq!(player.get_component::<Position>(), Ok(&Position::new(0, 0)));
        assert_eq!(texture(&game), PLAYER_TEXTURE);
        assert_eq!(game.manager().len(), 1);
    }

    #[test]
    fn test_texture_swap() {
        let (mut game, _) = game(200);
        for _ in 0..100 {
            game.update().unwrap();
        }
        assert_eq!(texture(&game), PLAYER_TEXTURE);

        game.update().unwrap();
        assert_eq!(texture(&game), SWAPPED_TEXTURE);
    }

    #[test]
    fn test_render() {
        let (mut game, queue) = game(10);
        game.update().unwrap();
        game.render();

        let calls = queue.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!((calls[0].x, calls[0].y), (1, 1));
        assert_eq!(calls[0].texture, PLAYER_TEXTURE);
    }

    #[test]
    fn test_frame_limit() {
        let (mut game, _) = game(3);
        let mut frames = 0;
        while game.running() {
            game.update().unwrap();
            frames += 1;
        }
        assert_eq!(frames, 3);
        assert_eq!(game.frame(), 3);
    }

    #[test]
    fn test_player_removed() {
        let (mut game, _) = game(10);
        let player = game.player();
        game.manager_mut().entity_mut(player).unwrap().destroy();

        assert_eq!(game.update(), Err(EcsError::EntityNotFound(player)));
    }
}
