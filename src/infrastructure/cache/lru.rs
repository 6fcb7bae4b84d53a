//! Fixed-capacity Least-Recently-Used container.
//!
//! Entries live in a `Vec` arena linked into a doubly linked recency list by
//! index; a `HashMap` maps each key to its slot. Read, write, remove and evict
//! are all O(1). Removed slots are recycled through a free list.
//!
//! The container is not synchronized. Shared use goes through
//! [`crate::infrastructure::cache::MemoryCache`], which wraps it in a mutex.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::error;

/// Null link in the arena.
const NIL: usize = usize::MAX;

struct Node<K, V> {
    key: K,
    value: Option<V>,
    prev: usize,
    next: usize,
}

/// Bounded key-value store that evicts the least recently used entry.
///
/// Both [`read`](Self::read) and [`write`](Self::write) promote the touched
/// key to most recently used.
///
/// # Examples
///
/// ```
/// use shortr::infrastructure::cache::LruCache;
///
/// let mut cache = LruCache::new(2);
/// cache.write("a", 1);
/// cache.write("b", 2);
/// assert_eq!(cache.read(&"a"), Some(&1));
///
/// cache.write("c", 3); // "b" is least recently used
/// assert_eq!(cache.read(&"b"), None);
/// assert_eq!(cache.len(), 2);
/// ```
pub struct LruCache<K, V> {
    capacity: usize,
    map: HashMap<K, usize>,
    arena: Vec<Node<K, V>>,
    /// Most recently used.
    head: usize,
    /// Least recently used.
    tail: usize,
    free: usize,
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.map.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is accepted; such a cache stays empty. Storage
    /// grows with the resident entries, not with `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            map: HashMap::new(),
            arena: Vec::new(),
            head: NIL,
            tail: NIL,
            free: NIL,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns true if `key` is resident. Does not change recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Looks up `key`, promoting it to most recently used on a hit.
    pub fn read<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.move_to_head(idx);
        self.arena[idx].value.as_ref()
    }

    /// Inserts or replaces the entry for `key` and promotes it.
    ///
    /// Replacing an existing key never evicts. Inserting a new key into a full
    /// cache first evicts the least recently used entry, which is returned.
    pub fn write(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.map.get(&key) {
            self.arena[idx].value = Some(value);
            self.move_to_head(idx);
            return None;
        }

        if self.capacity == 0 {
            return None;
        }

        let evicted = if self.map.len() >= self.capacity {
            match self.evict_tail() {
                Some(pair) => Some(pair),
                None => {
                    error!(
                        len = self.map.len(),
                        capacity = self.capacity,
                        "LRU cache full but has no tail entry, dropping write"
                    );
                    return None;
                }
            }
        } else {
            None
        };

        let idx = self.alloc(key.clone(), value);
        self.push_head(idx);
        self.map.insert(key, idx);

        evicted
    }

    /// Removes the entry for `key`, returning its value if it was resident.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.map.remove(key)?;
        self.unlink(idx);
        let value = self.arena[idx].value.take();
        self.release(idx);
        value
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            arena: &self.arena,
            current: self.head,
        }
    }

    fn alloc(&mut self, key: K, value: V) -> usize {
        let node = Node {
            key,
            value: Some(value),
            prev: NIL,
            next: NIL,
        };

        if self.free == NIL {
            self.arena.push(node);
            self.arena.len() - 1
        } else {
            let idx = self.free;
            self.free = self.arena[idx].next;
            self.arena[idx] = node;
            idx
        }
    }

    fn release(&mut self, idx: usize) {
        self.arena[idx].next = self.free;
        self.free = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.arena[idx].prev, self.arena[idx].next);

        if prev == NIL {
            self.head = next;
        } else {
            self.arena[prev].next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else {
            self.arena[next].prev = prev;
        }

        self.arena[idx].prev = NIL;
        self.arena[idx].next = NIL;
    }

    fn push_head(&mut self, idx: usize) {
        self.arena[idx].prev = NIL;
        self.arena[idx].next = self.head;

        if self.head != NIL {
            self.arena[self.head].prev = idx;
        }
        self.head = idx;

        if self.tail == NIL {
            self.tail = idx;
        }
    }

    fn move_to_head(&mut self, idx: usize) {
        if self.head != idx {
            self.unlink(idx);
            self.push_head(idx);
        }
    }

    fn evict_tail(&mut self) -> Option<(K, V)> {
        if self.tail == NIL {
            return None;
        }

        let idx = self.tail;
        self.unlink(idx);
        let key = self.arena[idx].key.clone();
        let value = self.arena[idx].value.take();
        self.map.remove(&key);
        self.release(idx);

        value.map(|v| (key, v))
    }
}

/// Iterator over resident keys, most recently used first.
#[cfg(test)]
struct Keys<'a, K, V> {
    arena: &'a [Node<K, V>],
    current: usize,
}

#[cfg(test)]
impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == NIL {
            return None;
        }
        let node = &self.arena[self.current];
        self.current = node.next;
        Some(&node.key)
    }
}
