// Favorites store - vocabulary and kanji collections with change notification
//
// Session-scoped only: nothing is written to disk. Hosts share one store
// behind a Mutex and subscribe emitters to re-render favorite toggles and lists.
//
// Changes are queued rather than emitted in place, so emitters never run while
// the store is borrowed. `update_favorites` delivers them after unlocking.

use parking_lot::Mutex;
use std::sync::Arc;

use super::collection::FavoriteCollection;
use super::types::{FavoriteCategory, FavoriteId, FavoriteItem};
use crate::events::{
    current_timestamp, FavoritesAction, FavoritesEventEmitter, FavoritesUpdatedPayload,
};

/// Type alias for favorites store state shared between handlers
pub type FavoritesStoreState = Mutex<FavoritesStore>;

/// favorites_updated payloads taken from a store, ready to deliver
#[must_use = "notifications are only delivered by emit()"]
pub struct FavoritesNotifications {
    payloads: Vec<FavoritesUpdatedPayload>,
    emitters: Vec<Arc<dyn FavoritesEventEmitter>>,
}

impl FavoritesNotifications {
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Deliver every payload, in change order, to every emitter
    pub fn emit(self) {
        for payload in self.payloads {
            for emitter in &self.emitters {
                emitter.emit_favorites_updated(payload.clone());
            }
        }
    }
}

/// Store for favorites, one deduplicated collection per category
#[derive(Default)]
pub struct FavoritesStore {
    vocabulary: FavoriteCollection<FavoriteItem>,
    kanji: FavoriteCollection<FavoriteItem>,
    /// Emitters notified after every change
    emitters: Vec<Arc<dyn FavoritesEventEmitter>>,
    /// Changes not yet handed to emitters
    pending: Vec<FavoritesUpdatedPayload>,
}

impl FavoritesStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an emitter for favorites_updated events
    ///
    /// Emitters only see changes once they are taken with
    /// `take_notifications` (or through `update_favorites`) and emitted.
    pub fn subscribe(&mut self, emitter: Arc<dyn FavoritesEventEmitter>) {
        self.emitters.push(emitter);
    }

    fn collection(&self, category: FavoriteCategory) -> &FavoriteCollection<FavoriteItem> {
        match category {
            FavoriteCategory::Vocabulary => &self.vocabulary,
            FavoriteCategory::Kanji => &self.kanji,
        }
    }

    fn collection_mut(
        &mut self,
        category: FavoriteCategory,
    ) -> &mut FavoriteCollection<FavoriteItem> {
        match category {
            FavoriteCategory::Vocabulary => &mut self.vocabulary,
            FavoriteCategory::Kanji => &mut self.kanji,
        }
    }

    /// Add an item to a category
    ///
    /// Adding an id that is already present leaves the collection untouched
    /// and emits nothing. Returns true if the item was added.
    pub fn add_favorite(&mut self, category: FavoriteCategory, item: FavoriteItem) -> bool {
        let item_id = item.id.clone();
        if !self.collection_mut(category).add(item) {
            crate::trace!("{} favorite {} already present", category, item_id);
            return false;
        }

        crate::debug!("Added {} favorite {}", category, item_id);
        self.notify(category, FavoritesAction::Add, item_id);
        true
    }

    /// Remove an item from a category by id
    ///
    /// Returns true if an item was removed; a missing id is a no-op.
    pub fn remove_favorite(&mut self, category: FavoriteCategory, id: &FavoriteId) -> bool {
        if self.collection_mut(category).remove(id).is_none() {
            crate::trace!("{} favorite {} not present", category, id);
            return false;
        }

        crate::debug!("Removed {} favorite {}", category, id);
        self.notify(category, FavoritesAction::Remove, id.clone());
        true
    }

    /// Flip membership of an item, returning whether it is now a favorite
    pub fn toggle_favorite(&mut self, category: FavoriteCategory, item: FavoriteItem) -> bool {
        if self.is_favorite(category, &item.id) {
            let id = item.id;
            self.remove_favorite(category, &id);
            false
        } else {
            self.add_favorite(category, item)
        }
    }

    /// Whether the id is currently a favorite in the category
    pub fn is_favorite(&self, category: FavoriteCategory, id: &FavoriteId) -> bool {
        self.collection(category).contains(id)
    }

    /// Favorites of a category in the order they were added
    pub fn favorites(&self, category: FavoriteCategory) -> &[FavoriteItem] {
        self.collection(category).items()
    }

    pub fn count(&self, category: FavoriteCategory) -> usize {
        self.collection(category).len()
    }

    /// Take the changes queued since the last call
    pub fn take_notifications(&mut self) -> FavoritesNotifications {
        FavoritesNotifications {
            payloads: std::mem::take(&mut self.pending),
            emitters: self.emitters.clone(),
        }
    }

    fn notify(
        &mut self,
        category: FavoriteCategory,
        action: FavoritesAction,
        item_id: FavoriteId,
    ) {
        if self.emitters.is_empty() {
            return;
        }

        self.pending.push(FavoritesUpdatedPayload {
            category,
            action,
            item_id,
            timestamp: current_timestamp(),
        });
    }
}

/// Run `f` against the shared store, then emit its changes with the lock released
///
/// Emitters may therefore lock the store again, e.g. to re-read a list.
pub fn update_favorites<R>(
    state: &FavoritesStoreState,
    f: impl FnOnce(&mut FavoritesStore) -> R,
) -> R {
    let (result, notifications) = {
        let mut store = state.lock();
        let result = f(&mut store);
        (result, store.take_notifications())
    };

    notifications.emit();
    result
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
