use std::collections::HashMap;

use luckystats_db::models::{Draw, NumberPair};

/// Co-occurrences de paires non ordonnées de numéros principaux.
/// Chaque paire est identifiée par (min, max) ; tri par fréquence décroissante,
/// puis par paire croissante pour un résultat stable.
pub fn count_pairs(draws: &[Draw]) -> Vec<NumberPair> {
    let mut counts: HashMap<(u8, u8), u32> = HashMap::new();

    for draw in draws {
        let mut numbers = draw.main_numbers;
        numbers.sort_unstable();

        // Moins de 2 numéros = aucune paire (les bornes de boucle le garantissent)
        for i in 0..numbers.len() {
            for j in (i + 1)..numbers.len() {
                *counts.entry((numbers[i], numbers[j])).or_insert(0) += 1;
            }
        }
    }

    let mut pairs: Vec<NumberPair> = counts
        .into_iter()
        .map(|((a, b), count)| NumberPair {
            number_a: a,
            number_b: b,
            count,
        })
        .collect();

    pairs.sort_by(|x, y| {
        y.count
            .cmp(&x.count)
            .then(x.number_a.cmp(&y.number_a))
            .then(x.number_b.cmp(&y.number_b))
    });
    pairs
}

pub fn pairs_containing(number: u8, pairs: &[NumberPair]) -> Vec<NumberPair> {
    pairs.iter().filter(|p| p.contains(number)).copied().collect()
}

/// (fréquence, paires) par fréquence décroissante.
pub fn group_pairs_by_count(pairs: &[NumberPair]) -> Vec<(u32, Vec<(u8, u8)>)> {
    let mut groups: Vec<(u32, Vec<(u8, u8)>)> = Vec::new();
    for p in pairs {
        match groups.iter_mut().find(|(count, _)| *count == p.count) {
            Some((_, members)) => members.push((p.number_a, p.number_b)),
            None => groups.push((p.count, vec![(p.number_a, p.number_b)])),
        }
    }
    for (_, members) in &mut groups {
        members.sort_unstable();
    }
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}
