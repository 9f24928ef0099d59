use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use luckystats_db::models::{Draw, Pool};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    SevenDays,
    ThirtyDays,
    NinetyDays,
    OneYear,
    #[default]
    AllTime,
}

impl TimeRange {
    /// Date limite (incluse) ; `None` pour tout l'historique.
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeRange::SevenDays => today.checked_sub_days(Days::new(7)),
            TimeRange::ThirtyDays => today.checked_sub_days(Days::new(30)),
            TimeRange::NinetyDays => today.checked_sub_days(Days::new(90)),
            TimeRange::OneYear => today.checked_sub_months(Months::new(12)),
            TimeRange::AllTime => None,
        }
    }

    /// Garde les tirages datés du jour limite ou après, dans l'ordre d'origine.
    pub fn filter_draws(&self, draws: &[Draw], today: NaiveDate) -> Vec<Draw> {
        match self.cutoff(today) {
            Some(cutoff) => draws.iter().filter(|d| d.date >= cutoff).cloned().collect(),
            None => draws.to_vec(),
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRange::SevenDays => write!(f, "7 Days"),
            TimeRange::ThirtyDays => write!(f, "30 Days"),
            TimeRange::NinetyDays => write!(f, "90 Days"),
            TimeRange::OneYear => write!(f, "1 Year"),
            TimeRange::AllTime => write!(f, "All Time"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatLevel {
    None,
    Cool,
    Mild,
    Warm,
    Hot,
    Blazing,
}

impl HeatLevel {
    pub fn from_counts(frequency: u32, max_frequency: u32) -> Self {
        if frequency == 0 {
            return HeatLevel::None;
        }
        let intensity = frequency as f64 / max_frequency.max(1) as f64;
        if intensity >= 0.8 {
            HeatLevel::Blazing
        } else if intensity >= 0.6 {
            HeatLevel::Hot
        } else if intensity >= 0.4 {
            HeatLevel::Warm
        } else if intensity >= 0.2 {
            HeatLevel::Mild
        } else {
            HeatLevel::Cool
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatCell {
    pub number: u8,
    pub frequency: u32,
    pub level: HeatLevel,
}

/// Une case par numéro du pool, y compris les numéros jamais sortis.
pub fn heat_cells(draws: &[Draw], pool: Pool) -> Vec<HeatCell> {
    let mut counts = vec![0u32; pool.size()];
    for draw in draws {
        for &n in pool.numbers_from(draw) {
            let idx = (n as usize).wrapping_sub(1);
            if idx < counts.len() {
                counts[idx] += 1;
            }
        }
    }
    let max = counts.iter().copied().max().unwrap_or(0);

    counts
        .iter()
        .enumerate()
        .map(|(i, &frequency)| HeatCell {
            number: (i + 1) as u8,
            frequency,
            level: HeatLevel::from_counts(frequency, max),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberDetail {
    pub number: u8,
    pub frequency: u32,
    /// Jours depuis la dernière sortie ; `None` si jamais sorti.
    pub days_since_last: Option<i64>,
    /// Écart moyen entier (tirages / apparitions), 0 si moins de 2 apparitions.
    pub avg_gap: u32,
    /// Jusqu'à 8 dates, de la plus récente à la plus ancienne.
    pub recent_appearances: Vec<String>,
}

pub fn number_detail(draws: &[Draw], pool: Pool, number: u8, today: NaiveDate) -> NumberDetail {
    let appearances: Vec<&Draw> = draws
        .iter()
        .filter(|d| pool.numbers_from(d).contains(&number))
        .collect();

    let frequency = appearances.len() as u32;
    let days_since_last = appearances
        .first()
        .map(|d| (today - d.date).num_days());
    let avg_gap = if frequency > 1 {
        draws.len() as u32 / frequency
    } else {
        0
    };

    NumberDetail {
        number,
        frequency,
        days_since_last,
        avg_gap,
        recent_appearances: appearances.iter().take(8).map(|d| d.date_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example_draws;
    use luckystats_db::models::make_test_draws;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_time_range_filter() {
        let draws = example_draws();
        let today = day(2025, 10, 30);
        assert_eq!(TimeRange::SevenDays.filter_draws(&draws, today).len(), 2);
        assert_eq!(TimeRange::ThirtyDays.filter_draws(&draws, today).len(), 3);
        assert_eq!(TimeRange::AllTime.filter_draws(&draws, today).len(), 3);
        assert!(TimeRange::SevenDays.filter_draws(&draws, day(2026, 1, 1)).is_empty());
    }

    #[test]
    fn test_time_range_cutoff_inclusive() {
        let draws = example_draws();
        // 28/10 - 7 jours = 21/10 : le tirage du 21 est conservé
        let kept = TimeRange::SevenDays.filter_draws(&draws, day(2025, 10, 28));
        assert_eq!(kept.len(), 3);
        assert_eq!(TimeRange::OneYear.cutoff(day(2025, 10, 28)), Some(day(2024, 10, 28)));
    }

    #[test]
    fn test_heat_levels() {
        assert_eq!(HeatLevel::from_counts(0, 10), HeatLevel::None);
        assert_eq!(HeatLevel::from_counts(10, 10), HeatLevel::Blazing);
        assert_eq!(HeatLevel::from_counts(6, 10), HeatLevel::Hot);
        assert_eq!(HeatLevel::from_counts(4, 10), HeatLevel::Warm);
        assert_eq!(HeatLevel::from_counts(2, 10), HeatLevel::Mild);
        assert_eq!(HeatLevel::from_counts(1, 10), HeatLevel::Cool);
    }

    #[test]
    fn test_heat_cells_cover_pool() {
        let cells = heat_cells(&example_draws(), Pool::Main);
        assert_eq!(cells.len(), 70);
        assert_eq!(cells[0].frequency, 2);
        assert_eq!(cells[0].level, HeatLevel::Blazing);
        assert_eq!(cells[5].level, HeatLevel::Warm);
        assert_eq!(cells[69].level, HeatLevel::None);

        let bonus = heat_cells(&example_draws(), Pool::Bonus);
        assert_eq!(bonus.len(), 25);
        assert_eq!(bonus[9].frequency, 2);
    }

    #[test]
    fn test_number_detail() {
        let draws = example_draws();
        let detail = number_detail(&draws, Pool::Main, 1, day(2025, 10, 30));
        assert_eq!(detail.frequency, 2);
        assert_eq!(detail.days_since_last, Some(2));
        assert_eq!(detail.avg_gap, 1);
        assert_eq!(detail.recent_appearances, vec!["10/28/2025", "10/24/2025"]);

        let never = number_detail(&draws, Pool::Main, 50, day(2025, 10, 30));
        assert_eq!(never.frequency, 0);
        assert_eq!(never.days_since_last, None);
        assert_eq!(never.avg_gap, 0);
    }

    #[test]
    fn test_number_detail_caps_recent() {
        let draws = make_test_draws(200);
        let detail = number_detail(&draws, Pool::Main, 1, day(2025, 10, 28));
        assert!(detail.frequency > 8);
        assert_eq!(detail.recent_appearances.len(), 8);
        assert_eq!(detail.days_since_last, Some(0));
    }
}
