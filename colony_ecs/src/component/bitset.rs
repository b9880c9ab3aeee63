//! Presence flags of component types attached to an entity.

use super::{ComponentTypeId, MAX_COMPONENTS};

/// Fixed-size bitset with one flag per [`ComponentTypeId`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ComponentBitSet(u64);

impl ComponentBitSet {
    /// Creates a bitset with no flags set.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Sets the flag of given component type.
    ///
    /// Returns `true` if the flag was not set before.
    ///
    pub fn insert(&mut self, id: ComponentTypeId) -> bool {
        let mask = Self::mask(id);
        let absent = self.0 & mask == 0;
        self.0 |= mask;
        absent
    }

    /// Returns `true` if the flag of given component type is set.
    pub fn contains(&self, id: ComponentTypeId) -> bool {
        self.0 & Self::mask(id) != 0
    }

    /// Count of flags set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns iterator over all component types which flags are set, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ComponentTypeId> + '_ {
        (0..MAX_COMPONENTS)
            .map(ComponentTypeId::new)
            .filter(move |&id| self.contains(id))
    }

    fn mask(id: ComponentTypeId) -> u64 {
        debug_assert!(id.index() < MAX_COMPONENTS);
        1 << id.index()
    }
}
