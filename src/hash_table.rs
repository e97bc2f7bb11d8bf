use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Number of buckets a fresh table starts with
const DEFAULT_BUCKETS: usize = 64;

/// Separate-chaining hash table.
///
/// Each bucket is a chain of `(key, value)` entries. The bucket array
/// doubles and every entry is rehashed as soon as the load factor
/// (entries / buckets) exceeds 0.5.
#[derive(Clone, Debug)]
pub struct HashTable<K, V> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
}

impl<K: Hash + Eq, V> HashTable<K, V> {
    /// Create an empty table with the default bucket count
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Create an empty table with a specific bucket count (at least 1)
    pub fn with_buckets(buckets: usize) -> Self {
        let count = buckets.max(1);
        let mut table = Vec::with_capacity(count);
        table.resize_with(count, Vec::new);
        HashTable {
            buckets: table,
            len: 0,
        }
    }

    fn bucket_index(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }

    /// Insert or update. Always succeeds and returns true.
    pub fn put(&mut self, key: K, value: V) -> bool {
        let index = self.bucket_index(&key);
        if let Some(entry) = self.buckets[index].iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
            return true;
        }

        self.insert_new(key, value);
        true
    }

    /// Push an entry known to be absent, growing first if the new entry
    /// would push the load factor past 0.5. Returns (bucket, slot).
    fn insert_new(&mut self, key: K, value: V) -> (usize, usize) {
        if (self.len + 1) * 2 > self.buckets.len() {
            self.resize();
        }
        let index = self.bucket_index(&key);
        let chain = &mut self.buckets[index];
        chain.push((key, value));
        self.len += 1;
        (index, chain.len() - 1)
    }

    /// Stored value for `key`, or `None` when absent
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Stored value for `key`, or `default` when absent
    pub fn get_or_default(&self, key: &K, default: V) -> V
    where
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Mutable access to the value for `key`, storing `V::default()` first
    /// if the key is absent
    pub fn get_or_insert_with_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let index = self.bucket_index(&key);
        if let Some(pos) = self.buckets[index].iter().position(|(k, _)| *k == key) {
            return &mut self.buckets[index][pos].1;
        }
        let (bucket, slot) = self.insert_new(key, V::default());
        &mut self.buckets[bucket][slot].1
    }

    /// Remove `key`, returning its value if it was present
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.bucket_index(key);
        let chain = &mut self.buckets[index];
        let pos = chain.iter().position(|(k, _)| k == key)?;
        self.len -= 1;
        Some(chain.swap_remove(pos).1)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Iterate over all entries in bucket order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|(k, v)| (k, v)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    fn resize(&mut self) {
        let new_count = self.buckets.len() * 2;
        let mut fresh = Vec::with_capacity(new_count);
        fresh.resize_with(new_count, Vec::new);
        let old = std::mem::replace(&mut self.buckets, fresh);

        for (key, value) in old.into_iter().flatten() {
            let index = self.bucket_index(&key);
            self.buckets[index].push((key, value));
        }
    }
}

impl<K: Hash + Eq, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
