use rand::SeedableRng;
use rand::rngs::StdRng;

use luckystats_db::loader::{import_str, DEFAULT_DATA};
use luckystats_db::models::{BONUS_MAX, MAIN_MAX};
use luckystats_engine::config::EngineConfig;
use luckystats_engine::gap::{GapFilter, NEVER_SEEN_RATIO};
use luckystats_engine::session::AnalysisSession;
use luckystats_engine::{generate_lucky_pick, Unavailable};

fn sample_session() -> AnalysisSession {
    let result = import_str(DEFAULT_DATA).unwrap();
    assert_eq!(result.errors, 0, "données d'exemple invalides");
    AnalysisSession::new(result.draws, EngineConfig::default())
}

#[test]
fn test_sample_data_pipeline() {
    let mut session = sample_session();
    let total = session.draws().len();
    assert_eq!(total, 30);
    assert!(session.draws().windows(2).all(|w| w[0].date > w[1].date));

    let freq_total: u32 = session.frequency().iter().map(|f| f.count).sum();
    assert_eq!(freq_total as usize, total * 5);

    let bonus_total: u32 = session.bonus_frequency().iter().map(|f| f.count).sum();
    assert!(bonus_total as usize <= total);

    let pairs = session.pairs().to_vec();
    assert!(pairs.windows(2).all(|w| w[0].count >= w[1].count));
    let pair_total: u32 = pairs.iter().map(|p| p.count).sum();
    assert_eq!(pair_total as usize, total * 10);

    let gaps = session.gap_entries().to_vec();
    assert_eq!(gaps.len(), MAIN_MAX as usize);
    for e in &gaps {
        if e.appearances == 0 {
            assert_eq!(e.due_ratio, NEVER_SEEN_RATIO);
            assert_eq!(e.current_gap as usize, total);
        }
    }
    let overdue = GapFilter::Overdue.apply(&gaps);
    assert!(overdue.iter().all(|e| e.due_ratio > 1.0 && e.appearances > 1));

    let streaks = session.hot_streaks();
    let streak_total: u32 = streaks.iter().map(|e| e.streak_count).sum();
    assert_eq!(streak_total, 20 * 5);

    let stats = session.statistics().unwrap();
    assert_eq!(stats.total_draws, total);
    assert!(stats.min_sum as f64 <= stats.avg_sum && stats.avg_sum <= stats.max_sum as f64);
}

#[test]
fn test_sample_data_lucky_pick() {
    let mut session = sample_session();
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..25 {
        let pick = session.lucky_pick(&mut rng).unwrap();
        assert!(pick.main_numbers.windows(2).all(|w| w[0] < w[1]));
        assert!(pick.main_numbers.iter().all(|&n| (1..=MAIN_MAX).contains(&n)));
        assert!((1..=BONUS_MAX).contains(&pick.bonus_number));
    }
}

#[test]
fn test_session_matches_direct_generation() {
    let mut session = sample_session();
    let draws = session.selected_draws();
    let config = session.config().lucky.clone();
    let from_session = session.lucky_pick(&mut StdRng::seed_from_u64(8)).unwrap();
    let direct = generate_lucky_pick(&draws, &config, &mut StdRng::seed_from_u64(8)).unwrap();
    assert_eq!(from_session, direct);
}

#[test]
fn test_partial_selection() {
    let mut session = sample_session();
    let ids: Vec<_> = session.draws().iter().skip(10).map(|d| d.id.clone()).collect();
    for id in &ids {
        session.toggle(id);
    }
    assert_eq!(session.selected_draws().len(), 10);
    let freq_total: u32 = session.frequency().iter().map(|f| f.count).sum();
    assert_eq!(freq_total, 50);

    session.deselect_all();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(session.lucky_pick(&mut rng), Err(Unavailable::NoDraws));
}
