//! Procedural macros for the colony ECS.

use proc_macro::TokenStream;

use syn::DeriveInput;

/// Implements `ComponentType` by giving the type its own static identifier slot.
///
/// Generic types are rejected: a static inside a generic function
/// would be shared by all instantiations of the type.
///
#[proc_macro_derive(ComponentType)]
pub fn component_type_macro_derive(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = syn::parse(input).unwrap();

    let name = &ast.ident;
    if !ast.generics.params.is_empty() {
        panic!("`ComponentType` cannot be derived for generic type `{}`", name);
    }

    let gen = quote::quote! {
        impl colony_ecs::component::ComponentType for #name {
            fn type_slot() -> &'static colony_ecs::component::TypeSlot {
                static SLOT: colony_ecs::component::TypeSlot =
                    colony_ecs::component::TypeSlot::new();
                &SLOT
            }
        }
    };
    TokenStream::from(gen)
}
