use luckystats_db::models::{Draw, Pool};

/// Poids de récence d'un tirage : 2^((D - i) / demi-vie), i = 0 pour le plus récent.
pub fn recency_weight(index: usize, total: usize, half_life: f64) -> f64 {
    2f64.powf((total as f64 - index as f64) / half_life)
}

/// Score de récence cumulé par numéro, trié par score décroissant
/// (à égalité, numéro croissant). Une entrée par numéro observé.
pub fn recency_scores(draws: &[Draw], pool: Pool, half_life: f64) -> Vec<(u8, f64)> {
    let total = draws.len();
    let mut scores = vec![0.0f64; pool.size()];
    let mut seen = vec![false; pool.size()];

    for (i, draw) in draws.iter().enumerate() {
        let weight = recency_weight(i, total, half_life);
        for &n in pool.numbers_from(draw) {
            let idx = (n as usize).wrapping_sub(1);
            if idx < scores.len() {
                scores[idx] += weight;
                seen[idx] = true;
            }
        }
    }

    let mut ranked: Vec<(u8, f64)> = scores
        .iter()
        .enumerate()
        .filter(|&(i, _)| seen[i])
        .map(|(i, &s)| ((i + 1) as u8, s))
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}
