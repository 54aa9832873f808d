//! Recipe persistence boundary.
//!
//! Append-only, keyed by owning user. Identity and creation time are
//! assigned by the caller before append, so concurrent appends cannot
//! collide on identity or partially observe another request's record.

use std::sync::RwLock;

use crate::types::Recipe;

/// Trait for recipe stores. Both operations always succeed; durability is a
/// concern for the implementation, not the core.
pub trait RecipeStore: Send + Sync {
    /// Persist a fully-assembled recipe. The store assigns no identity.
    fn append(&self, recipe: Recipe);

    /// All recipes owned by `owner_id`, in insertion order.
    fn list_by_owner(&self, owner_id: &str) -> Vec<Recipe>;
}

/// In-process store backed by a Vec.
#[derive(Default)]
pub struct MemoryStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecipeStore for MemoryStore {
    fn append(&self, recipe: Recipe) {
        self.recipes
            .write()
            .expect("recipe store lock poisoned")
            .push(recipe);
    }

    fn list_by_owner(&self, owner_id: &str) -> Vec<Recipe> {
        self.recipes
            .read()
            .expect("recipe store lock poisoned")
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect()
    }
}
