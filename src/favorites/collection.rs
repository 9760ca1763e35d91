// Generic collection deduplicated by item id, kept in insertion order

/// Items with a stable identity
pub trait Identified {
    type Id: PartialEq;

    fn id(&self) -> &Self::Id;
}

/// Ordered collection in which no two items share an id
///
/// Lookups are linear; favorites lists are small and insertion order is
/// what the list screens render.
#[derive(Debug, Clone)]
pub struct FavoriteCollection<T: Identified> {
    items: Vec<T>,
}

impl<T: Identified> Default for FavoriteCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> FavoriteCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless an item with the same id is already present
    ///
    /// Returns true if the item was inserted.
    pub fn add(&mut self, item: T) -> bool {
        if self.contains(item.id()) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the item with this id, returning it if it was present
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let position = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(position))
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Items in insertion order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "collection_test.rs"]
mod tests;
