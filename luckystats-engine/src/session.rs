use rand::Rng;

use luckystats_db::models::{Draw, DrawId, GapEntry, HotStreakEntry, LuckyPick, NumberFrequency, NumberPair};

use crate::cache::{CacheStats, SelectionCache};
use crate::config::EngineConfig;
use crate::distribution::{selection_statistics, SelectionStatistics};
use crate::frequency::{count_bonus_numbers, count_main_numbers, least_common};
use crate::gap::{gap_entries, most_overdue};
use crate::hot_streak::hot_streaks;
use crate::lucky::{generate, LuckyInputs, Unavailable};
use crate::pairs::count_pairs;
use crate::selection::Selection;

/// Collection de tirages + sélection active + tables mémorisées.
///
/// Toute modification de la sélection ou de la collection vide le cache ;
/// les requêtes suivantes recalculent sur la nouvelle sélection.
#[derive(Debug)]
pub struct AnalysisSession {
    draws: Vec<Draw>,
    selection: Selection,
    cache: SelectionCache,
    config: EngineConfig,
}

impl AnalysisSession {
    /// Tous les tirages sont sélectionnés au départ.
    pub fn new(draws: Vec<Draw>, config: EngineConfig) -> Self {
        let selection = Selection::all(&draws);
        Self {
            draws,
            selection,
            cache: SelectionCache::new(),
            config,
        }
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Remplace la collection d'un bloc et sélectionne tout.
    pub fn replace_draws(&mut self, draws: Vec<Draw>) {
        self.selection = Selection::all(&draws);
        self.draws = draws;
        self.cache.invalidate();
        log::info!("Collection remplacée : {} tirages", self.draws.len());
    }

    pub fn toggle(&mut self, id: &DrawId) -> bool {
        let selected = self.selection.toggle(id);
        self.cache.invalidate();
        selected
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.draws);
        self.cache.invalidate();
    }

    pub fn deselect_all(&mut self) {
        self.selection.deselect_all();
        self.cache.invalidate();
    }

    pub fn selected_draws(&self) -> Vec<Draw> {
        self.selection.selected_draws(&self.draws)
    }

    pub fn frequency(&mut self) -> &[NumberFrequency] {
        let key = self.selection.cache_key();
        let (draws, selection) = (&self.draws, &self.selection);
        self.cache
            .frequency(&key, || count_main_numbers(&selection.selected_draws(draws)))
    }

    pub fn least_common(&mut self) -> &[NumberFrequency] {
        let key = self.selection.cache_key();
        let (draws, selection) = (&self.draws, &self.selection);
        self.cache
            .least_common(&key, || least_common(&selection.selected_draws(draws)))
    }

    pub fn bonus_frequency(&mut self) -> &[NumberFrequency] {
        let key = self.selection.cache_key();
        let (draws, selection) = (&self.draws, &self.selection);
        self.cache
            .bonus_frequency(&key, || count_bonus_numbers(&selection.selected_draws(draws)))
    }

    pub fn pairs(&mut self) -> &[NumberPair] {
        let key = self.selection.cache_key();
        let (draws, selection) = (&self.draws, &self.selection);
        self.cache
            .pairs(&key, || count_pairs(&selection.selected_draws(draws)))
    }

    pub fn gap_entries(&mut self) -> &[GapEntry] {
        let key = self.selection.cache_key();
        let (draws, selection) = (&self.draws, &self.selection);
        self.cache
            .gaps(&key, || gap_entries(&selection.selected_draws(draws)))
    }

    pub fn most_overdue(&mut self) -> Vec<GapEntry> {
        let n = self.config.most_overdue_count;
        most_overdue(self.gap_entries(), n)
    }

    pub fn hot_streaks(&self) -> Vec<HotStreakEntry> {
        hot_streaks(&self.selected_draws(), self.config.hot_streak_window)
    }

    pub fn statistics(&self) -> Option<SelectionStatistics> {
        selection_statistics(&self.selected_draws())
    }

    /// Combinaison porte-bonheur sur la sélection, à partir des tables mémorisées.
    pub fn lucky_pick(&mut self, rng: &mut impl Rng) -> Result<LuckyPick, Unavailable> {
        let selected = self.selected_draws();
        if selected.is_empty() {
            return Err(Unavailable::NoDraws);
        }
        let frequencies = self.frequency().to_vec();
        let pairs = self.pairs().to_vec();
        let gaps = self.gap_entries().to_vec();

        let inputs = LuckyInputs {
            draws: &selected,
            frequencies: &frequencies,
            pairs: &pairs,
            gaps: &gaps,
        };
        generate(&inputs, &self.config.lucky, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luckystats_db::models::make_test_draws;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(n: usize) -> AnalysisSession {
        AnalysisSession::new(make_test_draws(n), EngineConfig::default())
    }

    #[test]
    fn test_new_selects_all() {
        let s = session(10);
        assert_eq!(s.selection().len(), 10);
        assert_eq!(s.selected_draws().len(), 10);
    }

    #[test]
    fn test_repeated_queries_hit_cache() {
        let mut s = session(30);
        let first = s.frequency().to_vec();
        let second = s.frequency().to_vec();
        assert_eq!(first, second);
        assert_eq!(s.cache_stats(), CacheStats { hits: 1, misses: 1 });

        s.pairs();
        s.pairs();
        assert_eq!(s.cache_stats().hits, 2);
    }

    #[test]
    fn test_toggle_recomputes() {
        let mut s = session(30);
        let full_total: u32 = s.frequency().iter().map(|f| f.count).sum();
        let id = s.draws()[0].id.clone();

        assert!(!s.toggle(&id));
        let reduced_total: u32 = s.frequency().iter().map(|f| f.count).sum();
        assert_eq!(reduced_total, full_total - 5);

        assert!(s.toggle(&id));
        let restored: u32 = s.frequency().iter().map(|f| f.count).sum();
        assert_eq!(restored, full_total);
    }

    #[test]
    fn test_deselect_all_empties_tables() {
        let mut s = session(30);
        s.deselect_all();
        assert!(s.frequency().is_empty());
        assert!(s.pairs().is_empty());
        assert!(s.gap_entries().is_empty());
        assert!(s.hot_streaks().is_empty());
        assert!(s.statistics().is_none());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(s.lucky_pick(&mut rng), Err(Unavailable::NoDraws));

        s.select_all();
        assert_eq!(s.gap_entries().len(), 70);
    }

    #[test]
    fn test_replace_draws_invalidates() {
        let mut s = session(30);
        assert_eq!(s.statistics().unwrap().total_draws, 30);
        s.frequency();

        // Mêmes identifiants (même ancre de dates), contenu différent : le cache doit être vidé
        let mut replacement = make_test_draws(30);
        for d in replacement.iter_mut() {
            d.main_numbers = [66, 67, 68, 69, 70];
        }
        s.replace_draws(replacement);
        let freqs = s.frequency().to_vec();
        assert_eq!(freqs.len(), 5);
        assert!(freqs.iter().all(|f| f.number >= 66 && f.count == 30));
    }

    #[test]
    fn test_lucky_pick_on_selection() {
        let mut s = session(80);
        let mut rng = StdRng::seed_from_u64(42);
        let pick = s.lucky_pick(&mut rng).unwrap();
        assert!(pick.main_numbers.windows(2).all(|w| w[0] < w[1]));
        assert!(s.cache_stats().misses >= 3);
    }

    #[test]
    fn test_most_overdue_uses_config() {
        let mut s = session(40);
        assert!(s.most_overdue().len() <= 3);
    }
}
