use std::collections::BTreeSet;

use luckystats_db::models::{Draw, DrawId};

/// Sous-ensemble des tirages inclus dans l'analyse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<DrawId>,
}

impl Selection {
    pub fn all(draws: &[Draw]) -> Self {
        Self {
            ids: draws.iter().map(|d| d.id.clone()).collect(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Retourne `true` si le tirage est sélectionné après l'opération.
    pub fn toggle(&mut self, id: &DrawId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn select_all(&mut self, draws: &[Draw]) {
        self.ids = draws.iter().map(|d| d.id.clone()).collect();
    }

    pub fn deselect_all(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &DrawId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Tirages sélectionnés, dans l'ordre de la collection (plus récent d'abord).
    pub fn selected_draws(&self, draws: &[Draw]) -> Vec<Draw> {
        draws
            .iter()
            .filter(|d| self.ids.contains(&d.id))
            .cloned()
            .collect()
    }

    /// Clé de cache : identifiants triés, concaténés.
    pub fn cache_key(&self) -> String {
        self.ids
            .iter()
            .map(DrawId::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luckystats_db::models::make_test_draws;

    #[test]
    fn test_all_and_none() {
        let draws = make_test_draws(5);
        let selection = Selection::all(&draws);
        assert_eq!(selection.len(), 5);
        assert_eq!(selection.selected_draws(&draws), draws);
        assert!(Selection::none().is_empty());
        assert!(Selection::none().selected_draws(&draws).is_empty());
    }

    #[test]
    fn test_toggle() {
        let draws = make_test_draws(5);
        let mut selection = Selection::all(&draws);
        assert!(!selection.toggle(&draws[2].id));
        assert!(!selection.contains(&draws[2].id));
        assert_eq!(selection.len(), 4);

        let selected = selection.selected_draws(&draws);
        assert_eq!(selected.len(), 4);
        assert!(selected.windows(2).all(|w| w[0].date > w[1].date), "l'ordre de la collection est conservé");

        assert!(selection.toggle(&draws[2].id));
        assert_eq!(selection.len(), 5);
    }

    #[test]
    fn test_select_deselect_all() {
        let draws = make_test_draws(5);
        let mut selection = Selection::all(&draws);
        selection.deselect_all();
        assert!(selection.is_empty());
        selection.select_all(&draws);
        assert_eq!(selection.len(), 5);
    }

    #[test]
    fn test_cache_key_deterministic() {
        let draws = make_test_draws(4);
        let a = Selection::all(&draws);
        let mut reversed = draws.clone();
        reversed.reverse();
        let b = Selection::all(&reversed);
        assert_eq!(a.cache_key(), b.cache_key(), "la clé ne dépend pas de l'ordre d'insertion");

        let mut c = a.clone();
        c.toggle(&draws[0].id);
        assert_ne!(a.cache_key(), c.cache_key());
        assert_eq!(Selection::none().cache_key(), "");
    }
}
