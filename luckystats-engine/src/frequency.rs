use luckystats_db::models::{Draw, NumberFrequency, Pool};

/// Compte les occurrences de chaque numéro du pool.
/// Une entrée par numéro observé, triée par fréquence décroissante
/// (à égalité, numéro croissant).
pub fn count_numbers(draws: &[Draw], pool: Pool) -> Vec<NumberFrequency> {
    let mut counts = vec![0u32; pool.size()];

    for draw in draws {
        for &n in pool.numbers_from(draw) {
            let idx = (n as usize).wrapping_sub(1);
            if idx < counts.len() {
                counts[idx] += 1;
            }
        }
    }

    let mut freqs: Vec<NumberFrequency> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c > 0)
        .map(|(i, &c)| NumberFrequency {
            number: (i + 1) as u8,
            count: c,
        })
        .collect();

    freqs.sort_by(|a, b| b.count.cmp(&a.count));
    freqs
}

pub fn count_main_numbers(draws: &[Draw]) -> Vec<NumberFrequency> {
    count_numbers(draws, Pool::Main)
}

/// Les tirages sans bonus ne contribuent pas.
pub fn count_bonus_numbers(draws: &[Draw]) -> Vec<NumberFrequency> {
    count_numbers(draws, Pool::Bonus)
}

/// Mêmes comptes que `count_main_numbers`, triés par fréquence croissante.
pub fn least_common(draws: &[Draw]) -> Vec<NumberFrequency> {
    let mut freqs = count_main_numbers(draws);
    freqs.sort_by(|a, b| a.count.cmp(&b.count));
    freqs
}

pub fn average_frequency(freqs: &[NumberFrequency]) -> f64 {
    if freqs.is_empty() {
        return 0.0;
    }
    let total: u32 = freqs.iter().map(|f| f.count).sum();
    total as f64 / freqs.len() as f64
}

/// Regroupe les numéros par fréquence : (fréquence, numéros croissants), fréquence décroissante.
pub fn group_by_count(freqs: &[NumberFrequency]) -> Vec<(u32, Vec<u8>)> {
    let mut groups: Vec<(u32, Vec<u8>)> = Vec::new();
    for f in freqs {
        match groups.iter_mut().find(|(count, _)| *count == f.count) {
            Some((_, numbers)) => numbers.push(f.number),
            None => groups.push((f.count, vec![f.number])),
        }
    }
    for (_, numbers) in &mut groups {
        numbers.sort_unstable();
    }
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}
