//! Utilities for storage of ECS.

use slotmap::SlotMap;

use crate::error::{EcsError, Result};
use crate::{Entity, EntityId};

/// Storage for all entities of ECS.
///
/// Drives per-frame update and draw of entities in order of their creation.
///
#[derive(Debug, Default)]
pub struct Manager {
    /// Entities are actually stored here.
    entities: SlotMap<EntityId, Entity>,
    /// Creation order of entities.
    order: Vec<EntityId>,
}

impl Manager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Creates new active entity without components.
    ///
    /// Identifier of the returned entity stays valid until the entity is removed.
    ///
    pub fn add_entity(&mut self) -> &mut Entity {
        let id = self.entities.insert_with_key(Entity::new);
        self.order.push(id);
        log::debug!("entity {:?} created", id);
        &mut self.entities[id]
    }

    /// Returns `true` if the entity is owned by this manager.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Retrieves an immutable reference to the entity.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Retrieves a mutable reference to the entity.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Retrieves an immutable reference to the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if there is no such entity.
    ///
    pub fn try_entity(&self, id: EntityId) -> Result<&Entity> {
        self.entity(id).ok_or(EcsError::EntityNotFound(id))
    }

    /// Retrieves a mutable reference to the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if there is no such entity.
    ///
    pub fn try_entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.entity_mut(id).ok_or(EcsError::EntityNotFound(id))
    }

    /// Count of owned entities, inactive ones included.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns iterator over identifiers of all entities in creation order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order.iter().copied()
    }

    /// Returns iterator over all entities in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        let entities = &self.entities;
        self.order.iter().filter_map(move |&id| entities.get(id))
    }

    /// Updates all entities, inactive ones included.
    pub fn update(&mut self) {
        for &id in &self.order {
            if let Some(entity) = self.entities.get_mut(id) {
                entity.update();
            }
        }
    }

    /// Draws all entities, inactive ones included.
    pub fn draw(&mut self) {
        for &id in &self.order {
            if let Some(entity) = self.entities.get_mut(id) {
                entity.draw();
            }
        }
    }

    /// Removes all inactive entities, keeping relative order of the rest.
    ///
    /// Returns count of removed entities.
    ///
    pub fn refresh(&mut self) -> usize {
        let entities = &mut self.entities;
        let count = self.order.len();
        self.order.retain(|&id| {
            let active = entities.get(id).map_or(false, Entity::is_active);
            if !active {
                entities.remove(id);
            }
            active
        });

        let removed = count - self.order.len();
        if removed > 0 {
            log::debug!("{} inactive entities removed", removed);
        }
        removed
    }
}
