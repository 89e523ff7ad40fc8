use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

#[derive(Debug)]
struct Slot<V> {
    value: V,
    tick: u64,
}

/// 容量固定的 LRU 快取
///
/// 值存放於雜湊表，淘汰順序由存取序號的有序索引維護；
/// `get` 命中與 `put` 都會刷新存取序，未命中不影響順序
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    tick: u64,
    entries: HashMap<K, Slot<V>>,
    recency: BTreeMap<u64, K>,
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// 建立快取
    ///
    /// # Panics
    ///
    /// `capacity` 為 0 時 panic
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "LRU 快取容量必須大於 0");
        Self {
            capacity,
            tick: 0,
            entries: HashMap::with_capacity(capacity),
            recency: BTreeMap::new(),
        }
    }

    /// 讀取並刷新存取序
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let owned = self.entries.get_key_value(key).map(|(k, _)| k.clone())?;
        self.touch(&owned);
        self.entries.get(key).map(|slot| &slot.value)
    }

    /// 寫入一筆項目
    ///
    /// 鍵已存在時取代其值並刷新存取序；容量已滿時先淘汰
    /// 最久未存取的一筆。回傳被取代或被淘汰的 `(鍵, 值)`
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        let tick = self.next_tick();

        if let Some(slot) = self.entries.get_mut(&key) {
            let stale = slot.tick;
            let old = std::mem::replace(&mut slot.value, value);
            slot.tick = tick;
            self.recency.remove(&stale);
            self.recency.insert(tick, key.clone());
            return Some((key, old));
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        self.entries.insert(key.clone(), Slot { value, tick });
        self.recency.insert(tick, key);
        evicted
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.entries.remove(key)?;
        self.recency.remove(&slot.tick);
        Some(slot.value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn touch(&mut self, key: &K) {
        let tick = self.next_tick();
        if let Some(slot) = self.entries.get_mut(key) {
            self.recency.remove(&slot.tick);
            slot.tick = tick;
            self.recency.insert(tick, key.clone());
        }
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let (_, key) = self.recency.pop_first()?;
        let slot = self.entries.remove(&key)?;
        Some((key, slot.value))
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eviction_removes_least_recently_used() {
        let mut cache = LruCache::new(3);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        let evicted = cache.put("d", 4);
        assert_eq!(evicted, Some(("a", 1)));
        assert_eq!(cache.len(), 3);
        assert!(!cache.contains("a"));
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);

        assert_eq!(cache.get("a"), Some(&1));

        // b 成為最久未存取者
        let evicted = cache.put("c", 3);
        assert_eq!(evicted, Some(("b", 2)));
        assert!(cache.contains("a"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_miss_does_not_alter_order() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);

        assert_eq!(cache.get("missing"), None);

        let evicted = cache.put("c", 3);
        assert_eq!(evicted, Some(("a", 1)));
    }

    #[test]
    fn test_replace_updates_value_and_recency() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);

        let displaced = cache.put("a", 10);
        assert_eq!(displaced, Some(("a", 1)));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), Some(&10));

        // 取代也算存取，b 先被淘汰
        cache.put("a", 20);
        let evicted = cache.put("c", 3);
        assert_eq!(evicted, Some(("b", 2)));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);

        assert_eq!(cache.remove("a"), Some(1));
        assert_eq!(cache.remove("a"), None);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());

        // 清空後不影響後續淘汰順序
        cache.put("x", 1);
        cache.put("y", 2);
        assert_eq!(cache.put("z", 3), Some(("x", 1)));
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        let mut cache = LruCache::new(4);
        for i in 0..100 {
            cache.put(i, i);
            assert!(cache.len() <= 4);
        }
    }

    #[test]
    #[should_panic(expected = "容量必須大於 0")]
    fn test_zero_capacity_panics() {
        let _ = LruCache::<String, ()>::new(0);
    }
}
