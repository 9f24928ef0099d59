use luckystats_db::models::{Draw, HotStreakEntry, MAIN_MAX};

/// Fenêtre par défaut : les 20 tirages les plus récents.
pub const DEFAULT_WINDOW: usize = 20;

/// Apparitions de chaque numéro principal dans les `window` tirages les plus récents.
/// Chaque entrée garde les dates d'apparition dans l'ordre de la collection.
pub fn hot_streaks(draws: &[Draw], window: usize) -> Vec<HotStreakEntry> {
    let effective = window.min(draws.len());
    let mut appearances: Vec<Vec<String>> = vec![Vec::new(); MAIN_MAX as usize];

    for draw in draws.iter().take(effective) {
        let date = draw.date_string();
        for &n in &draw.main_numbers {
            let idx = (n as usize).wrapping_sub(1);
            if idx < appearances.len() {
                appearances[idx].push(date.clone());
            }
        }
    }

    let mut entries: Vec<HotStreakEntry> = appearances
        .into_iter()
        .enumerate()
        .filter(|(_, dates)| !dates.is_empty())
        .map(|(i, dates)| HotStreakEntry {
            number: (i + 1) as u8,
            streak_count: dates.len() as u32,
            appearance_dates: dates,
        })
        .collect();

    entries.sort_by(|a, b| b.streak_count.cmp(&a.streak_count));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example_draws;
    use luckystats_db::models::make_test_draws;

    #[test]
    fn test_hot_streak_example() {
        let entries = hot_streaks(&example_draws(), DEFAULT_WINDOW);
        assert_eq!(entries.len(), 10);
        let one = entries.iter().find(|e| e.number == 1).unwrap();
        assert_eq!(one.streak_count, 2);
        assert_eq!(one.appearance_dates, vec!["10/28/2025".to_string(), "10/24/2025".to_string()]);
        assert_eq!(entries[0].streak_count, 2);
    }

    #[test]
    fn test_hot_streak_window_limit() {
        let draws = make_test_draws(1000);
        let entries = hot_streaks(&draws, DEFAULT_WINDOW);
        let total: u32 = entries.iter().map(|e| e.streak_count).sum();
        assert_eq!(total, 5 * 20, "seuls les 20 tirages les plus récents comptent");

        let oldest_in_window = draws[19].date_string();
        let too_old = draws[20].date_string();
        for e in &entries {
            assert!(!e.appearance_dates.contains(&too_old));
            assert!(e.appearance_dates.len() as u32 == e.streak_count);
        }
        assert!(entries.iter().any(|e| e.appearance_dates.contains(&oldest_in_window)));
    }

    #[test]
    fn test_hot_streak_small_selection() {
        let draws = make_test_draws(3);
        let total: u32 = hot_streaks(&draws, DEFAULT_WINDOW).iter().map(|e| e.streak_count).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn test_hot_streak_sorted_and_empty() {
        let entries = hot_streaks(&make_test_draws(40), DEFAULT_WINDOW);
        assert!(entries.windows(2).all(|w| w[0].streak_count >= w[1].streak_count));
        assert!(hot_streaks(&[], DEFAULT_WINDOW).is_empty());
    }
}
