// Favorites - per-category deduplicated collections of user-marked items

mod collection;
mod store;
mod types;

pub use collection::{FavoriteCollection, Identified};
pub use store::{update_favorites, FavoritesNotifications, FavoritesStore, FavoritesStoreState};
pub use types::{FavoriteCategory, FavoriteId, FavoriteItem, ParseCategoryError};
