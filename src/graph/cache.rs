//! Memoized transitive closures, owned by a single dependency graph

use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Which edges a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow `internal_dependencies`.
    Dependencies,
    /// Follow `reverse_dependencies`.
    ReverseDependencies,
}

pub type Closure = Arc<BTreeSet<String>>;

/// Per-graph closure cache.
///
/// Lookups take a read lock, so a shared `&DependencyGraph` can be queried from
/// several worker threads; the first thread to finish a closure publishes it.
#[derive(Debug, Default)]
pub struct TraversalCache {
    dependencies: RwLock<HashMap<String, Closure>>,
    reverse_dependencies: RwLock<HashMap<String, Closure>>,
}

impl TraversalCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, direction: Direction) -> &RwLock<HashMap<String, Closure>> {
        match direction {
            Direction::Dependencies => &self.dependencies,
            Direction::ReverseDependencies => &self.reverse_dependencies,
        }
    }

    pub fn get(&self, direction: Direction, name: &str) -> Option<Closure> {
        self.table(direction).read().get(name).cloned()
    }

    /// Publish a closure, returning whichever copy ended up in the cache.
    pub fn insert(&self, direction: Direction, name: &str, closure: BTreeSet<String>) -> Closure {
        self.table(direction)
            .write()
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(closure))
            .clone()
    }

    pub fn clear(&self) {
        self.dependencies.write().clear();
        self.reverse_dependencies.write().clear();
    }

    pub fn len(&self, direction: Direction) -> usize {
        self.table(direction).read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len(Direction::Dependencies) == 0 && self.len(Direction::ReverseDependencies) == 0
    }
}

/// Cloning a graph starts the clone with a cold cache.
impl Clone for TraversalCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}
