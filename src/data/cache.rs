use {
    crate::utils::AppInstant,
    std::{collections::HashMap, hash::Hash, time::Duration},
};

/// Memo table keyed by call arguments.
///
/// An entry is served until `ttl` has elapsed since it was stored. A `None`
/// ttl keeps entries for the life of the process.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Option<Duration>,
    entries: HashMap<K, (AppInstant, V)>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Clone of a live entry. Expired entries are evicted on the way.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let expired = match self.entries.get(key) {
            None => return None,
            Some((stored_at, _)) => self.is_expired(*stored_at),
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|(_, v)| v.clone())
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, (AppInstant::now(), value));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, stored_at: AppInstant) -> bool {
        match self.ttl {
            None => false,
            Some(ttl) => stored_at.elapsed() >= ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_cache_keeps_entries() {
        let mut cache = TtlCache::new(None);
        cache.insert("btc", 1);
        assert_eq!(cache.get(&"btc"), Some(1));
        assert_eq!(cache.get(&"eth"), None);
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let mut cache = TtlCache::new(Some(Duration::ZERO));
        cache.insert(300usize, "listing");
        assert_eq!(cache.get(&300), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut cache = TtlCache::new(Some(Duration::from_secs(3600)));
        cache.insert(1, 'a');
        cache.insert(2, 'b');
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.get(&1).is_none());
    }
}
