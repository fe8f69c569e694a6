//! Bounded cache of native color values.
//!
//! Native systems allocate a resource per color (an X11 pixel, a GDI brush,
//! a packed framebuffer word). Backends keep them here so the number of live
//! allocations never exceeds the configured capacity.

use ahash::RandomState;
use indexmap::IndexMap;
use sparta_core::Rgba;

/// Least-recently-used map from [`Rgba`] to a native value.
pub struct ColorCache<V> {
    entries: IndexMap<Rgba, V, RandomState>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<V: Clone> ColorCache<V> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: IndexMap::with_capacity_and_hasher(capacity, RandomState::new()),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the native value for `color`, allocating it with `alloc` on a
    /// miss. When the cache is full the least recently used entry is handed
    /// to `release` first.
    pub fn get_or_alloc(
        &mut self,
        color: Rgba,
        alloc: impl FnOnce(Rgba) -> V,
        mut release: impl FnMut(Rgba, V),
    ) -> V {
        if let Some(value) = self.entries.shift_remove(&color) {
            self.hits += 1;
            self.entries.insert(color, value.clone());
            return value;
        }

        self.misses += 1;
        while self.entries.len() >= self.capacity {
            match self.entries.shift_remove_index(0) {
                Some((old, value)) => {
                    tracing::trace!("evicting native color {}", old);
                    release(old, value);
                }
                None => break,
            }
        }

        let value = alloc(color);
        self.entries.insert(color, value.clone());
        value
    }

    pub fn contains(&self, color: Rgba) -> bool {
        self.entries.contains_key(&color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Releases every entry.
    pub fn clear(&mut self, mut release: impl FnMut(Rgba, V)) {
        for (color, value) in self.entries.drain(..) {
            release(color, value);
        }
    }
}
