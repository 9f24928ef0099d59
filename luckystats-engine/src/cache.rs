use luckystats_db::models::{GapEntry, NumberFrequency, NumberPair};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Tables calculées pour une clé de sélection donnée.
/// Une requête avec une autre clé vide tous les emplacements avant de stocker.
#[derive(Debug, Default)]
pub struct SelectionCache {
    key: Option<String>,
    frequency: Option<Vec<NumberFrequency>>,
    least_common: Option<Vec<NumberFrequency>>,
    bonus_frequency: Option<Vec<NumberFrequency>>,
    pairs: Option<Vec<NumberPair>>,
    gaps: Option<Vec<GapEntry>>,
    stats: CacheStats,
}

fn fetch<'a, T>(
    slot: &'a mut Option<Vec<T>>,
    stats: &mut CacheStats,
    table: &str,
    compute: impl FnOnce() -> Vec<T>,
) -> &'a [T] {
    if slot.is_some() {
        stats.hits += 1;
        log::debug!("cache: {} (hit)", table);
    } else {
        stats.misses += 1;
        log::debug!("cache: {} (miss)", table);
    }
    slot.get_or_insert_with(compute)
}

impl SelectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.frequency = None;
        self.least_common = None;
        self.bonus_frequency = None;
        self.pairs = None;
        self.gaps = None;
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn sync_key(&mut self, key: &str) {
        if self.key.as_deref() != Some(key) {
            self.invalidate();
            self.key = Some(key.to_string());
        }
    }

    pub fn frequency(&mut self, key: &str, compute: impl FnOnce() -> Vec<NumberFrequency>) -> &[NumberFrequency] {
        self.sync_key(key);
        fetch(&mut self.frequency, &mut self.stats, "frequency", compute)
    }

    pub fn least_common(&mut self, key: &str, compute: impl FnOnce() -> Vec<NumberFrequency>) -> &[NumberFrequency] {
        self.sync_key(key);
        fetch(&mut self.least_common, &mut self.stats, "least_common", compute)
    }

    pub fn bonus_frequency(&mut self, key: &str, compute: impl FnOnce() -> Vec<NumberFrequency>) -> &[NumberFrequency] {
        self.sync_key(key);
        fetch(&mut self.bonus_frequency, &mut self.stats, "bonus_frequency", compute)
    }

    pub fn pairs(&mut self, key: &str, compute: impl FnOnce() -> Vec<NumberPair>) -> &[NumberPair] {
        self.sync_key(key);
        fetch(&mut self.pairs, &mut self.stats, "pairs", compute)
    }

    pub fn gaps(&mut self, key: &str, compute: impl FnOnce() -> Vec<GapEntry>) -> &[GapEntry] {
        self.sync_key(key);
        fetch(&mut self.gaps, &mut self.stats, "gaps", compute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(number: u8, count: u32) -> NumberFrequency {
        NumberFrequency { number, count }
    }

    #[test]
    fn test_cache_hit_same_key() {
        let mut cache = SelectionCache::new();
        let first = cache.frequency("a|b", || vec![freq(1, 2)]).to_vec();
        let second = cache.frequency("a|b", || panic!("ne doit pas recalculer")).to_vec();
        assert_eq!(first, second);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_cache_key_change_clears_all_tables() {
        let mut cache = SelectionCache::new();
        cache.frequency("a|b", || vec![freq(1, 2)]);
        cache.pairs("a|b", Vec::new);

        let recomputed = cache.frequency("a", || vec![freq(7, 1)]).to_vec();
        assert_eq!(recomputed, vec![freq(7, 1)]);
        assert_eq!(cache.key(), Some("a"));

        let mut computed = false;
        cache.pairs("a", || {
            computed = true;
            Vec::new()
        });
        assert!(computed, "les paires de l'ancienne clé ne doivent pas survivre");
    }

    #[test]
    fn test_cache_invalidate() {
        let mut cache = SelectionCache::new();
        cache.gaps("k", Vec::new);
        cache.invalidate();
        assert_eq!(cache.key(), None);
        let mut computed = false;
        cache.gaps("k", || {
            computed = true;
            Vec::new()
        });
        assert!(computed);
    }
}
