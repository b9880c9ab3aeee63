//! Utilities for *entities* in ECS.

use std::any::type_name;
use std::fmt;

use slotmap::new_key_type;

use crate::component::{downcast_mut, downcast_ref};
use crate::error::{EcsError, Result};
use crate::{Component, ComponentBitSet, ComponentTypeId, Owner, MAX_COMPONENTS};

new_key_type! {
    /// Unique identifier of the *entity* of ECS.
    pub struct EntityId;
}

/// Game object which owns a set of heterogeneous components.
///
/// Entities are created by [`Manager::add_entity`](crate::Manager::add_entity)
/// and removed by [`Manager::refresh`](crate::Manager::refresh) after they were destroyed.
///
/// # Shadowing
///
/// Attaching a second component of an already attached type does not replace the first one:
/// the new instance becomes the one returned by type lookups, while the old one stays owned
/// by the entity and still receives `update` and `draw` calls until the entity is removed.
///
pub struct Entity {
    id: EntityId,
    active: bool,
    /// Components in attachment order. Boxed so that attached components never move.
    components: Vec<Box<dyn Component>>,
    /// Index into `components` for each component type.
    lookup: [Option<usize>; MAX_COMPONENTS],
    signature: ComponentBitSet,
}

impl Entity {
    pub(crate) fn new(id: EntityId) -> Self {
        Self {
            id,
            active: true,
            components: Vec::new(),
            lookup: [None; MAX_COMPONENTS],
            signature: ComponentBitSet::new(),
        }
    }

    /// Unique identifier of this entity.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns `false` once the entity was destroyed.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Marks this entity as inactive.
    ///
    /// Entity stays in its manager until the next refresh.
    ///
    pub fn destroy(&mut self) {
        self.active = false;
    }

    /// Count of owned components, shadowed ones included.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Set of component types attached to this entity.
    pub fn signature(&self) -> ComponentBitSet {
        self.signature
    }

    /// Attaches component to this entity, initializes it and returns a reference to it.
    ///
    /// # Panics
    ///
    /// Panics if type `T` cannot get a [`ComponentTypeId`] because all of them are taken.
    ///
    pub fn add_component<T>(&mut self, component: T) -> &mut T
    where
        T: Component,
    {
        match self.try_add_component(component) {
            Ok(component) => component,
            Err(error) => panic!("{}", error),
        }
    }

    /// Attaches component to this entity, initializes it and returns a reference to it.
    ///
    /// # Errors
    ///
    /// An error is returned if type `T` cannot get a [`ComponentTypeId`]
    /// because all of them are taken.
    ///
    pub fn try_add_component<T>(&mut self, component: T) -> Result<&mut T>
    where
        T: Component,
    {
        let type_id = ComponentTypeId::try_of::<T>()?;
        let index = self.components.len();
        self.components.push(Box::new(component));

        if self.lookup[type_id.index()].replace(index).is_some() {
            log::warn!(
                "component `{}` was attached to entity {:?} twice, previous one is shadowed",
                type_name::<T>(),
                self.id,
            );
        }
        self.signature.insert(type_id);

        self.with_owner(index, |component, owner| component.init(owner));

        let component = &mut *self.components[index];
        downcast_mut(component).ok_or_else(EcsError::component_not_found::<T>)
    }

    /// Returns `true` if component of type `T` is attached to this entity.
    pub fn has_component<T>(&self) -> bool
    where
        T: Component,
    {
        ComponentTypeId::lookup::<T>().map_or(false, |id| self.signature.contains(id))
    }

    /// Retrieves an immutable reference to component of type `T`.
    ///
    /// # Errors
    ///
    /// An error is returned if there is no component of type `T` attached to this entity.
    ///
    pub fn get_component<T>(&self) -> Result<&T>
    where
        T: Component,
    {
        let index = self.index_of::<T>()?;
        downcast_ref(&*self.components[index]).ok_or_else(EcsError::component_not_found::<T>)
    }

    /// Retrieves a mutable reference to component of type `T`.
    ///
    /// # Errors
    ///
    /// An error is returned if there is no component of type `T` attached to this entity.
    ///
    pub fn get_component_mut<T>(&mut self) -> Result<&mut T>
    where
        T: Component,
    {
        let index = self.index_of::<T>()?;
        downcast_mut(&mut *self.components[index])
            .ok_or_else(EcsError::component_not_found::<T>)
    }

    /// Updates all components in attachment order.
    pub fn update(&mut self) {
        for index in 0..self.components.len() {
            self.with_owner(index, |component, owner| component.update(owner));
        }
    }

    /// Draws all components in attachment order.
    pub fn draw(&mut self) {
        for index in 0..self.components.len() {
            self.with_owner(index, |component, owner| component.draw(owner));
        }
    }

    fn index_of<T>(&self) -> Result<usize>
    where
        T: Component,
    {
        ComponentTypeId::lookup::<T>()
            .filter(|&id| self.signature.contains(id))
            .and_then(|id| self.lookup[id.index()])
            .ok_or_else(EcsError::component_not_found::<T>)
    }

    /// Calls `f` with component at `index` and view of its siblings.
    fn with_owner<F>(&mut self, index: usize, f: F)
    where
        F: FnOnce(&mut dyn Component, &Owner),
    {
        let (before, rest) = self.components.split_at_mut(index);
        let Some((current, after)) = rest.split_first_mut() else {
            return;
        };
        let owner = Owner::new(
            self.id,
            self.active,
            self.signature,
            &self.lookup,
            index,
            before,
            after,
        );
        f(&mut **current, &owner);
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("active", &self.active)
            .field("components", &self.components.len())
            .field("signature", &self.signature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::{ComponentType, EcsError, Manager, Position};

    use super::*;

    type Journal = Rc<RefCell<Vec<String>>>;

    /// Writes every hook call into the shared journal.
    #[derive(ComponentType)]
    struct Recorder {
        name: &'static str,
        journal: Journal,
    }

    impl Recorder {
        fn new(name: &'static str, journal: &Journal) -> Self {
            Self {
                name,
                journal: Rc::clone(journal),
            }
        }

        fn record(&self, hook: &str) {
            self.journal.borrow_mut().push(format!("{}:{}", self.name, hook));
        }
    }

    impl Component for Recorder {
        fn init(&mut self, _owner: &Owner) {
            self.record("init");
        }

        fn update(&mut self, _owner: &Owner) {
            self.record("update");
        }

        fn draw(&mut self, _owner: &Owner) {
            self.record("draw");
        }
    }

    /// Remembers the position of its entity seen during the last update.
    #[derive(Default, ComponentType)]
    struct Follower {
        seen: Option<(i32, i32)>,
        initialized_with: Option<EntityId>,
    }

    impl Component for Follower {
        fn init(&mut self, owner: &Owner) {
            self.initialized_with = Some(owner.id());
        }

        fn update(&mut self, owner: &Owner) {
            self.seen = owner
                .get_component::<Position>()
                .ok()
                .map(|position| (position.x(), position.y()));
        }
    }

    /// Tries to read itself through its owner.
    #[derive(Default, ComponentType)]
    struct Narcissus {
        error: Option<EcsError>,
    }

    impl Component for Narcissus {
        fn update(&mut self, owner: &Owner) {
            self.error = owner.get_component::<Narcissus>().err();
        }
    }

    #[derive(Debug, ComponentType)]
    struct Missing;

    impl Component for Missing {}

    #[test]
    fn test_add_component() {
        let mut manager = Manager::new();
        let entity = manager.add_entity();

        assert!(!entity.has_component::<Position>());
        let position = entity.add_component(Position::new(3, 4));
        assert_eq!(*position, Position::new(3, 4));

        assert!(entity.has_component::<Position>());
        assert_eq!(entity.get_component::<Position>(), Ok(&Position::new(3, 4)));
        assert_eq!(entity.component_count(), 1);
        assert!(entity
            .signature()
            .contains(ComponentTypeId::of::<Position>()));
    }

    #[test]
    fn test_missing_component() {
        let mut manager = Manager::new();
        let entity = manager.add_entity();
        entity.add_component(Position::default());

        assert!(!entity.has_component::<Missing>());
        let error = entity.get_component::<Missing>().unwrap_err();
        assert!(matches!(error, EcsError::ComponentNotFound { .. }));
        assert!(error.to_string().contains("Missing"));
        assert!(entity.get_component_mut::<Missing>().is_err());
    }

    #[test]
    fn test_hooks_order() {
        let journal = Journal::default();
        let mut manager = Manager::new();
        let entity = manager.add_entity();

        entity.add_component(Recorder::new("first", &journal));
        entity.add_component(Position::default());
        entity.add_component(Follower::default());
        assert_eq!(*journal.borrow(), ["first:init"]);

        entity.update();
        entity.draw();
        assert_eq!(
            *journal.borrow(),
            ["first:init", "first:update", "first:draw"],
        );
    }

    #[test]
    fn test_update_count() {
        let mut manager = Manager::new();
        let entity = manager.add_entity();
        entity.add_component(Position::new(-5, 10));

        for _ in 0..7 {
            entity.update();
        }
        assert_eq!(entity.get_component::<Position>(), Ok(&Position::new(2, 17)));
    }

    #[test]
    fn test_owner_access() {
        let mut manager = Manager::new();
        let entity = manager.add_entity();
        let id = entity.id();

        entity.add_component(Position::new(0, 0));
        let follower = entity.add_component(Follower::default());
        assert_eq!(follower.initialized_with, Some(id));

        // Position is updated before the follower, so the follower sees the new value.
        entity.update();
        let follower = entity.get_component::<Follower>().unwrap();
        assert_eq!(follower.seen, Some((1, 1)));
    }

    #[test]
    fn test_owner_before_sibling() {
        let mut manager = Manager::new();
        let entity = manager.add_entity();

        entity.add_component(Follower::default());
        entity.add_component(Position::new(0, 0));

        // Follower is updated first and sees the position of the previous frame.
        entity.update();
        let follower = entity.get_component::<Follower>().unwrap();
        assert_eq!(follower.seen, Some((0, 0)));
    }

    #[test]
    fn test_owner_self_access() {
        let mut manager = Manager::new();
        let entity = manager.add_entity();
        entity.add_component(Narcissus::default());

        entity.update();
        let narcissus = entity.get_component::<Narcissus>().unwrap();
        assert!(matches!(
            narcissus.error,
            Some(EcsError::ComponentBusy { .. }),
        ));
    }

    #[test]
    fn test_shadowing() {
        let journal = Journal::default();
        let mut manager = Manager::new();
        let entity = manager.add_entity();

        entity.add_component(Position::new(0, 0));
        entity.add_component(Position::new(10, 20));
        assert_eq!(entity.get_component::<Position>(), Ok(&Position::new(10, 20)));
        assert_eq!(entity.component_count(), 2);
        assert_eq!(entity.signature().len(), 1);

        entity.update();
        assert_eq!(entity.get_component::<Position>(), Ok(&Position::new(11, 21)));

        // Both instances still receive hooks.
        entity.add_component(Recorder::new("a", &journal));
        entity.add_component(Recorder::new("b", &journal));
        entity.update();
        assert_eq!(
            *journal.borrow(),
            ["a:init", "b:init", "a:update", "b:update"],
        );
    }

    #[test]
    fn test_destroy() {
        let mut manager = Manager::new();
        let entity = manager.add_entity();
        assert!(entity.is_active());

        entity.destroy();
        assert!(!entity.is_active());
        entity.destroy();
        assert!(!entity.is_active());
        assert!(!entity.is_active());
    }
}
