//! Entity Component System (ECS) core for the colony simulation.
//!
//! A [`Manager`] owns every [`Entity`], and each entity owns its [`Component`]s.
//! Components are looked up by type in constant time through a compact
//! [`ComponentTypeId`] assigned once per component type.
//!

pub use component::{
    Component, ComponentBitSet, ComponentRegistry, ComponentType, ComponentTypeId, Owner,
    MAX_COMPONENTS,
};
pub use entity::{Entity, EntityId};
pub use error::{EcsError, Result};
pub use manager::Manager;
pub use position::Position;

// Lets `#[derive(ComponentType)]` name this crate from inside of it.
extern crate self as colony_ecs;

pub mod component;
pub mod error;
pub mod position;

mod entity;
mod manager;

/// Name of this crate.
pub const NAME: &str = env!("CARGO_CRATE_NAME", "library must be compiled by Cargo");

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION", "library must be compiled by Cargo");
