//! Utilities for ECS error handling.

use std::any::type_name;

use thiserror::Error;

use crate::EntityId;

/// Result of any ECS operation which can fail.
pub type Result<T> = std::result::Result<T, EcsError>;

/// General error type of the ECS core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcsError {
    #[error("cannot assign an id to component `{type_name}`: all {capacity} component type slots are taken")]
    CapacityExceeded {
        type_name: &'static str,
        capacity: usize,
    },

    #[error("there is no component `{type_name}` attached to the entity")]
    ComponentNotFound { type_name: &'static str },

    #[error("component `{type_name}` cannot access itself through its owner")]
    ComponentBusy { type_name: &'static str },

    #[error("entity {0:?} does not exist")]
    EntityNotFound(EntityId),
}

impl EcsError {
    pub(crate) fn component_not_found<T>() -> Self {
        Self::ComponentNotFound {
            type_name: type_name::<T>(),
        }
    }
}
