use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, RngExt};

use luckystats_db::models::{MAIN_COUNT, MAIN_MAX};

use super::stages::decade;
use crate::config::LuckyConfig;

/// Retire les doublons en gardant la première occurrence.
pub fn dedup_keep_order(picks: &mut Vec<u8>) {
    let mut seen = Vec::with_capacity(picks.len());
    picks.retain(|n| {
        if seen.contains(n) {
            false
        } else {
            seen.push(*n);
            true
        }
    });
}

/// Complète au hasard sur 1..=70 jusqu'à `MAIN_COUNT` numéros distincts.
pub fn top_up_uniform(picks: &mut Vec<u8>, rng: &mut impl Rng) {
    while picks.len() < MAIN_COUNT {
        let n = rng.random_range(1..=MAIN_MAX);
        if !picks.contains(&n) {
            picks.push(n);
        }
    }
}

/// Dédoublonne, puis complète depuis le pool de fréquence moyenne (essais bornés),
/// puis uniformément si le pool ne suffit pas.
pub fn fill(picks: &mut Vec<u8>, mid_pool: &[u8], config: &LuckyConfig, rng: &mut impl Rng) {
    dedup_keep_order(picks);

    let mut attempts = 0;
    while picks.len() < MAIN_COUNT && attempts < config.fill_attempts {
        attempts += 1;
        match mid_pool.choose(rng) {
            Some(&n) if !picks.contains(&n) => picks.push(n),
            Some(_) => {}
            None => break,
        }
    }

    if picks.len() < MAIN_COUNT {
        log::debug!("lucky: complément uniforme ({} numéros manquants)", MAIN_COUNT - picks.len());
        top_up_uniform(picks, rng);
    }
}

pub fn distinct_decades(picks: &[u8]) -> usize {
    let mut decades: Vec<u8> = picks.iter().map(|&n| decade(n)).collect();
    decades.sort_unstable();
    decades.dedup();
    decades.len()
}

/// Si les numéros tiennent dans trop peu de dizaines, remplace un slot au hasard
/// par un numéro du pool moyen pris dans une dizaine absente. Retourne `true` si un échange a eu lieu.
pub fn nudge_decades(picks: &mut Vec<u8>, mid_pool: &[u8], config: &LuckyConfig, rng: &mut impl Rng) -> bool {
    if picks.is_empty() || distinct_decades(picks) > config.decade_threshold {
        return false;
    }

    let mut missing: Vec<u8> = (1..=decade(MAIN_MAX))
        .filter(|&d| !picks.iter().any(|&n| decade(n) == d))
        .collect();
    missing.shuffle(rng);

    let mut swapped = false;
    for d in missing {
        let candidates: Vec<u8> = mid_pool.iter().copied().filter(|&n| decade(n) == d).collect();
        if let Some(&replacement) = candidates.choose(rng) {
            let slot = rng.random_range(0..picks.len());
            log::debug!("lucky: dizaine {} ajoutée ({} → {})", d, picks[slot], replacement);
            picks[slot] = replacement;
            swapped = true;
            break;
        }
    }

    dedup_keep_order(picks);
    top_up_uniform(picks, rng);
    swapped
}
