// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Caller-owned cache of loaded resources, keyed by name.

use std::collections::HashMap;

/// Maps names (typically file paths) to already-loaded handles.
///
/// The library is an ordinary value owned by whoever loads assets and passed
/// to the code that needs it; nothing is shared behind the caller's back.
///
/// ```
/// use ghosts::resource::TextureLibrary;
///
/// let mut library = TextureLibrary::new();
/// let mut loads = 0;
/// for _ in 0..3 {
///     let handle = library
///         .get_or_try_insert_with("ghost.png", || {
///             loads += 1;
///             Ok::<_, std::io::Error>(7u32)
///         })
///         .unwrap();
///     assert_eq!(*handle, 7);
/// }
/// assert_eq!(loads, 1);
/// ```
#[derive(Debug, Clone)]
pub struct TextureLibrary<H> {
    entries: HashMap<String, H>,
}

impl<H> Default for TextureLibrary<H> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<H> TextureLibrary<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&H> {
        self.entries.get(name)
    }

    /// Returns the handle for `name`, loading it with `load` on first use.
    ///
    /// A failed load leaves the library unchanged.
    pub fn get_or_try_insert_with<E>(&mut self, name: &str, load: impl FnOnce() -> Result<H, E>) -> Result<&H, E> {
        if !self.entries.contains_key(name) {
            let handle = load()?;
            logwise::trace_sync!("library loaded {name}", name = name);
            self.entries.insert(name.to_string(), handle);
        }
        Ok(&self.entries[name])
    }

    /// Stores `handle` under `name`, returning the handle it replaced.
    pub fn insert(&mut self, name: impl Into<String>, handle: H) -> Option<H> {
        self.entries.insert(name.into(), handle)
    }

    pub fn remove(&mut self, name: &str) -> Option<H> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the library, yielding every entry so the caller can release it.
    pub fn drain(&mut self) -> impl Iterator<Item = (String, H)> + '_ {
        self.entries.drain()
    }
}
