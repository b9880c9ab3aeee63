//! Colony simulation driven by a simple ECS

use std::error::Error;
use std::rc::Rc;

use config::{Config, ENGINE_NAME, ENGINE_VERSION};
use game::Game;
use sprite::DrawQueue;

mod config;
mod game;
mod logger;
mod sprite;

/// Entry point of the colony simulation
fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let mut config = Config::default();
    if let Some(frames) = std::env::args().nth(1) {
        config = config.with_frame_limit(frames.parse()?);
    }
    let _handle = logger::init(config.log_level())?;
    log::info!("logger initialized successfully");
    log::info!(
        "{} version {} using {} version {}",
        config.name(),
        config.version(),
        ENGINE_NAME,
        *ENGINE_VERSION,
    );

    let queue = DrawQueue::default();
    let mut game = Game::new(config, Rc::clone(&queue));
    while game.running() {
        game.update()?;
        game.render();

        for call in queue.borrow_mut().drain(..) {
            log::trace!("frame {}: {:?}", game.frame(), call);
        }
    }

    log::info!("simulation finished after {} frames", game.frame());
    Ok(())
}
