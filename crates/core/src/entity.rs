//! Records identified by a backend-assigned id.

/// A record whose identity survives changes to its other fields.
pub trait Entity {
    type Id: Eq + core::fmt::Display;

    fn id(&self) -> &Self::Id;
}

/// First entity in `items` with the given id.
pub fn find_by_id<'a, E: Entity>(items: &'a [E], id: &E::Id) -> Option<&'a E> {
    items.iter().find(|item| item.id() == id)
}
