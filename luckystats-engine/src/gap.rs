use luckystats_db::models::{Draw, GapEntry, MAIN_MAX};

/// Ratio sentinelle des numéros jamais sortis ("en retard maximal").
pub const NEVER_SEEN_RATIO: f64 = 99.0;

/// Retard de chaque numéro 1-70 par rapport à sa propre cadence.
///
/// `draws[0]` doit être le tirage le plus récent. Pour chaque numéro :
/// - `current_gap` = index du tirage le plus récent qui le contient (`draws.len()` s'il est absent) ;
/// - `appearances > 1` : `avg_gap = D / appearances`, `due_ratio = current_gap / avg_gap` ;
/// - sinon `avg_gap = D` et `due_ratio` vaut 99.0 (jamais vu) ou `current_gap / D` (vu une fois).
///
/// Trié par `due_ratio` décroissant. Sélection vide = table vide.
pub fn gap_entries(draws: &[Draw]) -> Vec<GapEntry> {
    if draws.is_empty() {
        return Vec::new();
    }

    let total = draws.len();
    let mut entries = Vec::with_capacity(MAIN_MAX as usize);

    for number in 1..=MAIN_MAX {
        let mut appearances = 0u32;
        let mut first_index: Option<usize> = None;

        for (t, draw) in draws.iter().enumerate() {
            if draw.main_numbers.contains(&number) {
                appearances += 1;
                if first_index.is_none() {
                    first_index = Some(t);
                }
            }
        }

        let current_gap = first_index.unwrap_or(total);
        let last_seen = first_index.map(|t| draws[t].date);

        let (avg_gap, due_ratio) = if appearances <= 1 {
            let ratio = if appearances == 0 {
                NEVER_SEEN_RATIO
            } else {
                current_gap as f64 / total as f64
            };
            (total as f64, ratio)
        } else {
            let avg_gap = total as f64 / appearances as f64;
            (avg_gap, current_gap as f64 / avg_gap)
        };

        entries.push(GapEntry {
            number,
            appearances,
            avg_gap,
            current_gap: current_gap as u32,
            due_ratio,
            last_seen,
        });
    }

    entries.sort_by(|a, b| {
        b.due_ratio
            .partial_cmp(&a.due_ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapFilter {
    #[default]
    All,
    Overdue,
    VeryOverdue,
}

impl GapFilter {
    pub fn apply(&self, entries: &[GapEntry]) -> Vec<GapEntry> {
        entries
            .iter()
            .filter(|e| match self {
                GapFilter::All => true,
                GapFilter::Overdue => e.is_overdue(),
                GapFilter::VeryOverdue => e.is_very_overdue(),
            })
            .cloned()
            .collect()
    }
}

impl std::fmt::Display for GapFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GapFilter::All => write!(f, "All"),
            GapFilter::Overdue => write!(f, "Overdue"),
            GapFilter::VeryOverdue => write!(f, "Very Overdue"),
        }
    }
}

/// Les `n` premiers numéros en retard, hors numéros vus 0 ou 1 fois.
/// `entries` doit déjà être trié (sortie de `gap_entries`).
pub fn most_overdue(entries: &[GapEntry], n: usize) -> Vec<GapEntry> {
    entries
        .iter()
        .filter(|e| e.appearances > 1)
        .take(n)
        .cloned()
        .collect()
}
