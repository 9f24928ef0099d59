use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::{Rng, RngExt};

use luckystats_db::models::{Draw, Pool, BONUS_MAX};

use crate::config::LuckyConfig;
use crate::recency::recency_scores;

/// Numéro bonus : tirage pondéré par le score de récence parmi les `bonus_candidates` meilleurs.
/// Les scores ne portent que sur les tirages dont le bonus est connu.
/// Sans historique bonus, tirage uniforme sur 1..=25.
pub fn pick_bonus(draws: &[Draw], config: &LuckyConfig, rng: &mut impl Rng) -> u8 {
    let with_bonus: Vec<Draw> = draws.iter().filter(|d| d.bonus_number.is_some()).cloned().collect();
    let candidates: Vec<(u8, f64)> = recency_scores(&with_bonus, Pool::Bonus, config.half_life)
        .into_iter()
        .take(config.bonus_candidates)
        .collect();

    if candidates.is_empty() {
        log::debug!("lucky: aucun historique bonus, tirage uniforme");
        return rng.random_range(1..=BONUS_MAX);
    }

    let weights: Vec<f64> = candidates.iter().map(|&(_, w)| w).collect();
    match WeightedIndex::new(&weights) {
        Ok(dist) => candidates[dist.sample(rng)].0,
        Err(e) => {
            log::warn!("lucky: poids bonus invalides ({}), premier candidat retenu", e);
            candidates[0].0
        }
    }
}
