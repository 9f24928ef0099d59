pub mod balance;
pub mod bonus;
pub mod stages;

use rand::Rng;
use thiserror::Error;

use luckystats_db::models::{Draw, GapEntry, LuckyPick, NumberFrequency, NumberPair, Pool, MAIN_COUNT};

use crate::config::LuckyConfig;
use crate::frequency::count_main_numbers;
use crate::gap::gap_entries;
use crate::pairs::count_pairs;
use crate::recency::recency_scores;

pub use stages::decade;

/// Génération impossible : l'appelant affiche un message, ce n'est pas une panne.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Unavailable {
    #[error("aucun tirage sélectionné")]
    NoDraws,
    #[error("aucune fréquence disponible pour la sélection")]
    NoFrequencies,
}

/// Tables déjà calculées sur la sélection, consommées par le générateur.
#[derive(Debug, Clone, Copy)]
pub struct LuckyInputs<'a> {
    /// Plus récent d'abord.
    pub draws: &'a [Draw],
    /// Triées par fréquence décroissante.
    pub frequencies: &'a [NumberFrequency],
    /// Triées par nombre de co-occurrences décroissant.
    pub pairs: &'a [NumberPair],
    pub gaps: &'a [GapEntry],
}

/// Calcule les tables puis génère une combinaison.
pub fn generate_lucky_pick(draws: &[Draw], config: &LuckyConfig, rng: &mut impl Rng) -> Result<LuckyPick, Unavailable> {
    let frequencies = count_main_numbers(draws);
    let pairs = count_pairs(draws);
    let gaps = gap_entries(draws);
    let inputs = LuckyInputs {
        draws,
        frequencies: &frequencies,
        pairs: &pairs,
        gaps: &gaps,
    };
    generate(&inputs, config, rng)
}

/// Numéros en retard (ratio > 1, au moins 2 apparitions), du plus en retard au moins en retard.
fn due_sorted(gaps: &[GapEntry]) -> Vec<u8> {
    let mut due: Vec<&GapEntry> = gaps.iter().filter(|e| e.is_overdue()).collect();
    due.sort_by(|a, b| b.due_ratio.partial_cmp(&a.due_ratio).unwrap_or(std::cmp::Ordering::Equal));
    due.into_iter().map(|e| e.number).collect()
}

/// Pool "fréquence moyenne" : rangs 9 à 36 du classement de fréquence.
fn mid_frequency_pool(frequencies: &[NumberFrequency], config: &LuckyConfig) -> Vec<u8> {
    frequencies
        .iter()
        .skip(config.mid_pool_skip)
        .take(config.mid_pool_len)
        .map(|f| f.number)
        .collect()
}

/// Génère 5 numéros distincts (croissants) et un bonus.
///
/// Deux récents, deux en retard, un issu des paires fréquentes, puis complément
/// et rééquilibrage par dizaines. Tout le hasard passe par `rng`.
pub fn generate(inputs: &LuckyInputs, config: &LuckyConfig, rng: &mut impl Rng) -> Result<LuckyPick, Unavailable> {
    if inputs.draws.is_empty() {
        return Err(Unavailable::NoDraws);
    }
    if inputs.frequencies.is_empty() {
        return Err(Unavailable::NoFrequencies);
    }

    let recency_sorted: Vec<u8> = recency_scores(inputs.draws, Pool::Main, config.half_life)
        .into_iter()
        .map(|(n, _)| n)
        .collect();
    let due = due_sorted(inputs.gaps);
    let mid_pool = mid_frequency_pool(inputs.frequencies, config);

    let mut picks: Vec<u8> = Vec::with_capacity(MAIN_COUNT + 1);

    if let Some(n) = stages::pick_recent(&recency_sorted, &picks, config, rng) {
        picks.push(n);
    }
    if let Some(n) = stages::pick_weighted_recent(&recency_sorted, &picks, config, rng) {
        picks.push(n);
    }

    let most_due = stages::pick_most_due(&due, &picks);
    if let Some(n) = most_due {
        picks.push(n);
    }
    if let Some(n) = stages::pick_due_other_decade(&due, &picks, most_due) {
        picks.push(n);
    }

    if let Some(anchor) = stages::pick_pair_anchor(inputs.pairs, &picks, config, rng) {
        if let stages::PairAnchor::Fallback(n) = anchor {
            log::debug!("lucky: paires déjà couvertes, {} ajouté sans contrôle", n);
        }
        picks.push(anchor.number());
    }
    log::debug!("lucky: slots {:?} (récence {}, retard {})", picks, recency_sorted.len(), due.len());

    balance::fill(&mut picks, &mid_pool, config, rng);
    balance::nudge_decades(&mut picks, &mid_pool, config, rng);
    picks.sort_unstable();

    let mut main_numbers = [0u8; MAIN_COUNT];
    for (slot, &n) in main_numbers.iter_mut().zip(picks.iter()) {
        *slot = n;
    }
    let bonus_number = bonus::pick_bonus(inputs.draws, config, rng);

    let pick = LuckyPick {
        main_numbers,
        bonus_number,
    };
    log::info!("Combinaison générée : {}", pick);
    Ok(pick)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example_draws;
    use luckystats_db::models::{make_test_draws, BONUS_MAX, MAIN_MAX};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_valid(pick: &LuckyPick) {
        assert!(pick.main_numbers.windows(2).all(|w| w[0] < w[1]), "non trié ou doublon : {:?}", pick.main_numbers);
        assert!(pick.main_numbers.iter().all(|&n| (1..=MAIN_MAX).contains(&n)));
        assert!((1..=BONUS_MAX).contains(&pick.bonus_number));
    }

    #[test]
    fn test_generate_valid_pick() {
        let draws = make_test_draws(120);
        let config = LuckyConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let pick = generate_lucky_pick(&draws, &config, &mut rng).unwrap();
            assert_valid(&pick);
        }
    }

    #[test]
    fn test_generate_small_selection() {
        let config = LuckyConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let pick = generate_lucky_pick(&example_draws(), &config, &mut rng).unwrap();
            assert_valid(&pick);
            assert!(pick.bonus_number == 10 || pick.bonus_number == 11);
        }
    }

    #[test]
    fn test_generate_single_draw() {
        let draws = make_test_draws(1);
        let config = LuckyConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let pick = generate_lucky_pick(&draws, &config, &mut rng).unwrap();
        assert_valid(&pick);
    }

    #[test]
    fn test_generate_unavailable() {
        let config = LuckyConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_lucky_pick(&[], &config, &mut rng), Err(Unavailable::NoDraws));

        let draws = make_test_draws(3);
        let inputs = LuckyInputs {
            draws: &draws,
            frequencies: &[],
            pairs: &[],
            gaps: &[],
        };
        assert_eq!(generate(&inputs, &config, &mut rng), Err(Unavailable::NoFrequencies));
    }

    #[test]
    fn test_generate_deterministic_with_seed() {
        let draws = make_test_draws(60);
        let config = LuckyConfig::default();
        let a = generate_lucky_pick(&draws, &config, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = generate_lucky_pick(&draws, &config, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_spreads_decades() {
        let draws = make_test_draws(120);
        let config = LuckyConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let pick = generate_lucky_pick(&draws, &config, &mut rng).unwrap();
            // Après rééquilibrage, au moins 2 dizaines sont représentées
            assert!(balance::distinct_decades(&pick.main_numbers) >= 2);
        }
    }

    #[test]
    fn test_due_sorted_excludes_single_appearance() {
        let draws = example_draws();
        let due = due_sorted(&gap_entries(&draws));
        // 1-5 sortis deux fois récemment (ratio 0) ; 6-10 une seule fois
        assert!(due.is_empty());
    }

    #[test]
    fn test_mid_frequency_pool() {
        let freqs: Vec<NumberFrequency> = (1..=40)
            .map(|n| NumberFrequency { number: n, count: 100 - n as u32 })
            .collect();
        let pool = mid_frequency_pool(&freqs, &LuckyConfig::default());
        assert_eq!(pool.len(), 28);
        assert_eq!(pool[0], 9);
        assert_eq!(pool[27], 36);
    }
}
