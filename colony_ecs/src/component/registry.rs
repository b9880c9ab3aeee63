//! Utilities for assigning compact identifiers to component types.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::OnceLock;

use lazy_static::lazy_static;
use parking_lot::RwLock;

use super::{Component, ComponentType};
use crate::error::{EcsError, Result};

/// Maximum count of distinct component types in the whole process.
#[cfg(not(feature = "components-64"))]
pub const MAX_COMPONENTS: usize = 32;

/// Maximum count of distinct component types in the whole process.
#[cfg(feature = "components-64")]
pub const MAX_COMPONENTS: usize = 64;

lazy_static! {
    static ref REGISTRY: RwLock<ComponentRegistry> = RwLock::new(ComponentRegistry::default());
}

/// Unique identifier of the *component type* of ECS.
///
/// Identifiers are assigned sequentially starting from 0 in order of the first request
/// and stay the same for the whole lifetime of the process.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ComponentTypeId(usize);

impl ComponentTypeId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Index of this identifier in type-indexed tables.
    pub const fn index(self) -> usize {
        self.0
    }

    /// Returns identifier of the component type `T`, assigning a new one on the first call.
    ///
    /// # Panics
    ///
    /// Panics if all [`MAX_COMPONENTS`] identifiers are already taken by other types.
    ///
    pub fn of<T>() -> Self
    where
        T: Component,
    {
        match Self::try_of::<T>() {
            Ok(id) => id,
            Err(error) => panic!("{}", error),
        }
    }

    /// Returns identifier of the component type `T`, assigning a new one on the first call.
    ///
    /// # Errors
    ///
    /// An error is returned if all [`MAX_COMPONENTS`] identifiers are already taken by other types.
    ///
    pub fn try_of<T>() -> Result<Self>
    where
        T: Component,
    {
        let slot = T::type_slot();
        if let Some(id) = slot.get() {
            return Ok(id);
        }

        let mut registry = REGISTRY.write();
        if let Some(id) = slot.get() {
            return Ok(id);
        }
        let id = registry.register::<T>()?;
        slot.set(id);
        Ok(id)
    }

    /// Returns identifier of the component type `T` if it was assigned earlier.
    ///
    /// Reads the static slot of `T` only, so it never locks the registry.
    ///
    pub fn lookup<T>() -> Option<Self>
    where
        T: Component,
    {
        T::type_slot().get()
    }
}

/// Static storage of the identifier of one component type.
///
/// Every type deriving [`ComponentType`] owns one slot,
/// filled by the process-wide registry on the first request.
///
#[derive(Debug)]
pub struct TypeSlot(OnceLock<ComponentTypeId>);

impl TypeSlot {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Identifier stored in this slot, if any.
    pub fn get(&self) -> Option<ComponentTypeId> {
        self.0.get().copied()
    }

    fn set(&self, id: ComponentTypeId) {
        // Filled only under the registry write lock, so the slot is empty here.
        let _ = self.0.set(id);
    }
}

impl Default for TypeSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Allocator of [`ComponentTypeId`]s with a hard capacity.
///
/// The process-wide instance behind [`ComponentTypeId::of`] has capacity of [`MAX_COMPONENTS`]
/// and is consulted only when a type gets its identifier for the first time.
///
#[derive(Debug)]
pub struct ComponentRegistry {
    by_type: HashMap<TypeId, ComponentTypeId>,
    capacity: usize,
}

impl ComponentRegistry {
    /// Creates an empty registry which can hold up to `capacity` component types.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or greater than [`MAX_COMPONENTS`].
    ///
    pub fn new(capacity: usize) -> Self {
        assert!(
            (1..=MAX_COMPONENTS).contains(&capacity),
            "registry capacity must be in range 1..={}, got {}",
            MAX_COMPONENTS,
            capacity,
        );
        Self {
            by_type: HashMap::with_capacity(capacity),
            capacity,
        }
    }

    /// Registers component type `T` and returns its identifier.
    /// Registering the same type again returns the same identifier.
    ///
    /// # Errors
    ///
    /// An error is returned if the registry is full.
    ///
    pub fn register<T>(&mut self) -> Result<ComponentTypeId>
    where
        T: Component,
    {
        let type_id = TypeId::of::<T>();
        if let Some(&id) = self.by_type.get(&type_id) {
            return Ok(id);
        }

        let index = self.by_type.len();
        if index >= self.capacity {
            return Err(EcsError::CapacityExceeded {
                type_name: type_name::<T>(),
                capacity: self.capacity,
            });
        }
        let id = ComponentTypeId::new(index);
        self.by_type.insert(type_id, id);
        log::trace!("component `{}` got type id {}", type_name::<T>(), index);
        Ok(id)
    }

    /// Returns identifier of component type `T`, if it was registered.
    pub fn lookup<T>(&self) -> Option<ComponentTypeId>
    where
        T: Component,
    {
        self.by_type.get(&TypeId::of::<T>()).copied()
    }

    /// Count of registered component types.
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Maximum count of component types this registry can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new(MAX_COMPONENTS)
    }
}
