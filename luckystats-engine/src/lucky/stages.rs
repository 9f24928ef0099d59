use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, RngExt};

use luckystats_db::models::NumberPair;

use crate::config::LuckyConfig;

/// Dizaine d'un numéro : 1-10 → 1, ..., 61-70 → 7.
pub fn decade(n: u8) -> u8 {
    (n.saturating_sub(1)) / 10 + 1
}

/// Tirage pondéré : `core_chance` de rester dans les `core` premiers, sinon n'importe lequel du pool.
pub fn weighted_pick(pool: &[u8], core: usize, core_chance: f64, rng: &mut impl Rng) -> Option<u8> {
    let core = core.min(pool.len());
    if core > 0 && rng.random_bool(core_chance.clamp(0.0, 1.0)) {
        pool[..core].choose(rng).copied()
    } else {
        pool.choose(rng).copied()
    }
}

fn rank_slice(sorted: &[u8], first: usize, last: usize) -> &[u8] {
    let end = (last + 1).min(sorted.len());
    if first >= end {
        &[]
    } else {
        &sorted[first..end]
    }
}

/// Slot 1 : un numéro au hasard parmi les rangs 1..=8 du classement de récence.
/// Le numéro le plus chaud (rang 0) est volontairement écarté.
pub fn pick_recent(recency_sorted: &[u8], chosen: &[u8], config: &LuckyConfig, rng: &mut impl Rng) -> Option<u8> {
    let candidates: Vec<u8> = rank_slice(recency_sorted, config.slot1_first_rank, config.slot1_last_rank)
        .iter()
        .copied()
        .filter(|n| !chosen.contains(n))
        .collect();
    candidates.choose(rng).copied()
}

/// Slot 2 : tirage pondéré parmi les rangs 1..=12, avec plusieurs essais pour éviter un doublon.
pub fn pick_weighted_recent(
    recency_sorted: &[u8],
    chosen: &[u8],
    config: &LuckyConfig,
    rng: &mut impl Rng,
) -> Option<u8> {
    let pool = rank_slice(recency_sorted, 1, config.slot2_pool);
    for _ in 0..config.slot2_retries {
        match weighted_pick(pool, config.slot2_core, config.slot2_core_chance, rng) {
            Some(n) if !chosen.contains(&n) => return Some(n),
            Some(_) => continue,
            None => return None,
        }
    }
    None
}

/// Slot 3 : le numéro le plus en retard pas encore choisi.
pub fn pick_most_due(due_sorted: &[u8], chosen: &[u8]) -> Option<u8> {
    due_sorted.iter().copied().find(|n| !chosen.contains(n))
}

/// Slot 4 : le suivant en retard, de préférence dans une autre dizaine que `anchor`.
pub fn pick_due_other_decade(due_sorted: &[u8], chosen: &[u8], anchor: Option<u8>) -> Option<u8> {
    let mut remaining = due_sorted.iter().copied().filter(|n| !chosen.contains(n));
    match anchor {
        Some(a) => {
            let other = due_sorted
                .iter()
                .copied()
                .find(|&n| !chosen.contains(&n) && decade(n) != decade(a));
            other.or_else(|| remaining.next())
        }
        None => remaining.next(),
    }
}

/// Résultat du slot 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairAnchor {
    /// Membre d'une paire pas encore choisi.
    Fresh(u8),
    /// Toutes les paires sont déjà couvertes : membre d'une paire au hasard, éventuellement en double.
    Fallback(u8),
}

impl PairAnchor {
    pub fn number(&self) -> u8 {
        match *self {
            PairAnchor::Fresh(n) | PairAnchor::Fallback(n) => n,
        }
    }
}

/// Slot 5 : mélange les `pair_pool` paires les plus fréquentes et prend le premier membre nouveau.
pub fn pick_pair_anchor(pairs: &[NumberPair], chosen: &[u8], config: &LuckyConfig, rng: &mut impl Rng) -> Option<PairAnchor> {
    let mut top: Vec<NumberPair> = pairs.iter().take(config.pair_pool).copied().collect();
    top.shuffle(rng);

    for pair in &top {
        if !chosen.contains(&pair.number_a) {
            return Some(PairAnchor::Fresh(pair.number_a));
        }
        if !chosen.contains(&pair.number_b) {
            return Some(PairAnchor::Fresh(pair.number_b));
        }
    }

    let pair = top.choose(rng)?;
    let member = if rng.random_bool(0.5) { pair.number_a } else { pair.number_b };
    Some(PairAnchor::Fallback(member))
}
