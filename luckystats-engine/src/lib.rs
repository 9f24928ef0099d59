pub mod cache;
pub mod config;
pub mod distribution;
pub mod frequency;
pub mod gap;
pub mod heatmap;
pub mod hot_streak;
pub mod lucky;
pub mod pairs;
pub mod recency;
pub mod selection;
pub mod session;

pub use lucky::{generate_lucky_pick, Unavailable};
pub use session::AnalysisSession;

/// Trois tirages (plus récent d'abord) : deux fois 1-5 + bonus 10, puis 6-10 + bonus 11.
#[cfg(test)]
pub(crate) fn example_draws() -> Vec<luckystats_db::models::Draw> {
    use luckystats_db::chrono::NaiveDate;
    use luckystats_db::models::Draw;

    let day = |d: u32| NaiveDate::from_ymd_opt(2025, 10, d).unwrap();
    vec![
        Draw::new(day(28), [1, 2, 3, 4, 5], Some(10), ""),
        Draw::new(day(24), [1, 2, 3, 4, 5], Some(10), ""),
        Draw::new(day(21), [6, 7, 8, 9, 10], Some(11), ""),
    ]
}
