use serde::{Deserialize, Serialize};

use luckystats_db::models::{Draw, MAIN_COUNT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionStatistics {
    pub total_draws: usize,
    pub avg_sum: f64,
    pub min_sum: u32,
    pub max_sum: u32,
    pub avg_even: f64,
    pub avg_odd: f64,
    pub avg_low: f64,
    pub avg_high: f64,
}

/// Moyennes sur la sélection ; `None` si elle est vide.
pub fn selection_statistics(draws: &[Draw]) -> Option<SelectionStatistics> {
    if draws.is_empty() {
        return None;
    }
    let n = draws.len() as f64;
    let sums: Vec<u32> = draws.iter().map(|d| d.sum()).collect();
    let avg_even = draws.iter().map(|d| d.even_count()).sum::<usize>() as f64 / n;
    let avg_low = draws.iter().map(|d| d.low_count()).sum::<usize>() as f64 / n;

    Some(SelectionStatistics {
        total_draws: draws.len(),
        avg_sum: sums.iter().map(|&s| s as f64).sum::<f64>() / n,
        min_sum: sums.iter().copied().min().unwrap_or(0),
        max_sum: sums.iter().copied().max().unwrap_or(0),
        avg_even,
        avg_odd: MAIN_COUNT as f64 - avg_even,
        avg_low,
        avg_high: MAIN_COUNT as f64 - avg_low,
    })
}

/// Nombre de tirages par nombre de numéros pairs (index 0..=5).
pub fn even_odd_distribution(draws: &[Draw]) -> [u32; MAIN_COUNT + 1] {
    let mut dist = [0u32; MAIN_COUNT + 1];
    for d in draws {
        dist[d.even_count()] += 1;
    }
    dist
}

/// Nombre de tirages par nombre de numéros bas (1-35), index 0..=5.
pub fn low_high_distribution(draws: &[Draw]) -> [u32; MAIN_COUNT + 1] {
    let mut dist = [0u32; MAIN_COUNT + 1];
    for d in draws {
        dist[d.low_count()] += 1;
    }
    dist
}

/// Histogramme des sommes par tranches de `width` : (début de tranche, nombre de tirages), croissant.
pub fn sum_ranges(draws: &[Draw], width: u32) -> Vec<(u32, u32)> {
    let width = width.max(1);
    let mut buckets: Vec<(u32, u32)> = Vec::new();
    for d in draws {
        let start = d.sum() / width * width;
        match buckets.iter_mut().find(|(s, _)| *s == start) {
            Some((_, count)) => *count += 1,
            None => buckets.push((start, 1)),
        }
    }
    buckets.sort_by_key(|&(start, _)| start);
    buckets
}
