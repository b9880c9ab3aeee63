//! Utilities for *components* in ECS.

use std::any::{type_name, Any};
use std::cmp::Ordering;

pub use bitset::ComponentBitSet;
pub use colony_ecs_derive::ComponentType;
pub use registry::{ComponentRegistry, ComponentTypeId, TypeSlot, MAX_COMPONENTS};

use crate::error::{EcsError, Result};
use crate::EntityId;

mod bitset;
mod registry;

/// Objects of this trait represent *component* of ECS.
///
/// A component is a unit of behaviour attached to exactly one entity.
/// Every hook receives the [`Owner`] of the component, which can be used
/// to read sibling components of the same entity.
///
/// Hooks do nothing by default.
///
/// ```
/// use colony_ecs::{Component, ComponentType, Owner};
///
/// #[derive(ComponentType, Default)]
/// struct Age(u32);
///
/// impl Component for Age {
///     fn update(&mut self, _owner: &Owner) {
///         self.0 += 1;
///     }
/// }
/// ```
///
pub trait Component: ComponentType + AsAny + 'static {
    /// Called exactly once right after the component was attached to the entity.
    fn init(&mut self, _owner: &Owner) {}

    /// Advances state of the component by one frame.
    fn update(&mut self, _owner: &Owner) {}

    /// Emits render side effects for the current frame.
    ///
    /// Should not change simulation state of the component.
    ///
    fn draw(&mut self, _owner: &Owner) {}
}

/// Static identity of a component type.
///
/// Use `#[derive(ComponentType)]` to implement it.
///
pub trait ComponentType {
    /// Slot holding the [`ComponentTypeId`] of this type once it is assigned.
    fn type_slot() -> &'static TypeSlot
    where
        Self: Sized;
}

/// Conversion into [`Any`] used for downcasting of components.
///
/// Implemented for every `'static` type.
///
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> AsAny for T
where
    T: Any,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub(crate) fn downcast_ref<T>(component: &dyn Component) -> Option<&T>
where
    T: Component,
{
    component.as_any().downcast_ref()
}

pub(crate) fn downcast_mut<T>(component: &mut dyn Component) -> Option<&mut T>
where
    T: Component,
{
    component.as_any_mut().downcast_mut()
}

/// Non-owning view of the entity which owns the component being called.
///
/// Gives read access to all *other* components of the same entity.
///
pub struct Owner<'a> {
    id: EntityId,
    active: bool,
    signature: ComponentBitSet,
    lookup: &'a [Option<usize>; MAX_COMPONENTS],
    current: usize,
    before: &'a [Box<dyn Component>],
    after: &'a [Box<dyn Component>],
}

impl<'a> Owner<'a> {
    pub(crate) fn new(
        id: EntityId,
        active: bool,
        signature: ComponentBitSet,
        lookup: &'a [Option<usize>; MAX_COMPONENTS],
        current: usize,
        before: &'a [Box<dyn Component>],
        after: &'a [Box<dyn Component>],
    ) -> Self {
        Self {
            id,
            active,
            signature,
            lookup,
            current,
            before,
            after,
        }
    }

    /// Identifier of the owning entity.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns `true` if the owning entity was not destroyed yet.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` if component of type `T` is attached to the owning entity.
    pub fn has_component<T>(&self) -> bool
    where
        T: Component,
    {
        ComponentTypeId::lookup::<T>().map_or(false, |id| self.signature.contains(id))
    }

    /// Retrieves sibling component of type `T` attached to the owning entity.
    ///
    /// # Errors
    ///
    /// An error is returned if there is no such component,
    /// or if `T` is the type of the component being called.
    ///
    pub fn get_component<T>(&self) -> Result<&'a T>
    where
        T: Component,
    {
        let index = ComponentTypeId::lookup::<T>()
            .and_then(|id| self.lookup[id.index()])
            .ok_or_else(EcsError::component_not_found::<T>)?;

        let (before, after) = (self.before, self.after);
        let component = match index.cmp(&self.current) {
            Ordering::Less => &before[index],
            Ordering::Greater => &after[index - self.current - 1],
            Ordering::Equal => {
                return Err(EcsError::ComponentBusy {
                    type_name: type_name::<T>(),
                })
            }
        };
        downcast_ref(&**component).ok_or_else(EcsError::component_not_found::<T>)
    }
}
