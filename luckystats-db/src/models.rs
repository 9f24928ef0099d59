use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Plus grand numéro principal (1-70).
pub const MAIN_MAX: u8 = 70;
/// Plus grand numéro bonus (1-25).
pub const BONUS_MAX: u8 = 25;
/// Nombre de numéros principaux par tirage.
pub const MAIN_COUNT: usize = 5;
/// Un numéro est "haut" au-delà de ce seuil (36-70).
pub const HIGH_THRESHOLD: u8 = 35;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DrawId(String);

impl DrawId {
    /// Identifiant canonique d'un tirage : sa date ISO.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DrawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draw {
    pub id: DrawId,
    pub date: NaiveDate,
    pub main_numbers: [u8; 5],
    pub bonus_number: Option<u8>,
    /// Texte d'origine, pour l'affichage uniquement.
    pub original: String,
}

impl Draw {
    pub fn new(date: NaiveDate, main_numbers: [u8; 5], bonus_number: Option<u8>, original: impl Into<String>) -> Self {
        Self {
            id: DrawId::from_date(date),
            date,
            main_numbers,
            bonus_number,
            original: original.into(),
        }
    }

    pub fn sum(&self) -> u32 {
        self.main_numbers.iter().map(|&n| n as u32).sum()
    }

    pub fn total_sum(&self) -> u32 {
        self.sum() + self.bonus_number.map(u32::from).unwrap_or(0)
    }

    pub fn even_count(&self) -> usize {
        self.main_numbers.iter().filter(|&&n| n % 2 == 0).count()
    }

    pub fn odd_count(&self) -> usize {
        self.main_numbers.len() - self.even_count()
    }

    pub fn high_count(&self) -> usize {
        self.main_numbers.iter().filter(|&&n| n > HIGH_THRESHOLD).count()
    }

    pub fn low_count(&self) -> usize {
        self.main_numbers.len() - self.high_count()
    }

    /// Ex: "3:2" (pairs:impairs).
    pub fn even_odd_ratio(&self) -> String {
        format!("{}:{}", self.even_count(), self.odd_count())
    }

    /// Ex: "2:3" (bas:hauts).
    pub fn low_high_ratio(&self) -> String {
        format!("{}:{}", self.low_count(), self.high_count())
    }

    /// Date au format M/D/YYYY, sans zéros de remplissage.
    pub fn date_string(&self) -> String {
        self.date.format("%-m/%-d/%Y").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pool {
    Main,
    Bonus,
}

impl Pool {
    pub fn size(&self) -> usize {
        match self {
            Pool::Main => MAIN_MAX as usize,
            Pool::Bonus => BONUS_MAX as usize,
        }
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Pool::Main => MAIN_COUNT,
            Pool::Bonus => 1,
        }
    }

    /// Numéros du tirage pour ce pool ; vide si le bonus est inconnu.
    pub fn numbers_from<'a>(&self, draw: &'a Draw) -> &'a [u8] {
        match self {
            Pool::Main => &draw.main_numbers,
            Pool::Bonus => draw.bonus_number.as_slice(),
        }
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pool::Main => write!(f, "Numéros (1-{})", MAIN_MAX),
            Pool::Bonus => write!(f, "Bonus (1-{})", BONUS_MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFrequency {
    pub number: u8,
    pub count: u32,
}

/// Paire non ordonnée, toujours stockée avec `number_a < number_b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberPair {
    pub number_a: u8,
    pub number_b: u8,
    pub count: u32,
}

impl NumberPair {
    pub fn contains(&self, number: u8) -> bool {
        self.number_a == number || self.number_b == number
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.number_a, self.number_b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DueBand {
    UnderDue,
    Approaching,
    MildlyOverdue,
    NotablyOverdue,
    VeryOverdue,
}

impl DueBand {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.8 {
            DueBand::UnderDue
        } else if ratio < 1.0 {
            DueBand::Approaching
        } else if ratio < 1.5 {
            DueBand::MildlyOverdue
        } else if ratio < 2.0 {
            DueBand::NotablyOverdue
        } else {
            DueBand::VeryOverdue
        }
    }
}

impl std::fmt::Display for DueBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DueBand::UnderDue => write!(f, "< 0.8"),
            DueBand::Approaching => write!(f, "0.8-1×"),
            DueBand::MildlyOverdue => write!(f, "1-1.5×"),
            DueBand::NotablyOverdue => write!(f, "1.5-2×"),
            DueBand::VeryOverdue => write!(f, "> 2×"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapEntry {
    pub number: u8,
    pub appearances: u32,
    pub avg_gap: f64,
    pub current_gap: u32,
    pub due_ratio: f64,
    pub last_seen: Option<NaiveDate>,
}

impl GapEntry {
    pub fn band(&self) -> DueBand {
        DueBand::from_ratio(self.due_ratio)
    }

    pub fn is_overdue(&self) -> bool {
        self.due_ratio > 1.0 && self.appearances > 1
    }

    pub fn is_very_overdue(&self) -> bool {
        self.due_ratio > 2.0 && self.appearances > 1
    }

    pub fn last_seen_label(&self) -> String {
        match self.last_seen {
            Some(date) => date.format("%-m/%-d/%Y").to_string(),
            None => "Never".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotStreakEntry {
    pub number: u8,
    pub streak_count: u32,
    /// Dates d'apparition, dans l'ordre de la collection (plus récent d'abord).
    pub appearance_dates: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckyPick {
    /// Triés par ordre croissant.
    pub main_numbers: [u8; 5],
    pub bonus_number: u8,
}

impl std::fmt::Display for LuckyPick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let main = self
            .main_numbers
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");
        write!(f, "{} + {:2}", main, self.bonus_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDrawError {
    #[error("{found} numéros principaux au lieu de 5")]
    WrongCount { found: usize },
    #[error("numéro {0} hors limites (1-70)")]
    MainOutOfRange(u8),
    #[error("numéro en double : {0}")]
    DuplicateMain(u8),
    #[error("bonus {0} hors limites (1-25)")]
    BonusOutOfRange(i64),
}

/// Valide un tirage brut et retourne les 5 numéros principaux.
pub fn validate_draw(main_numbers: &[u8], bonus_number: Option<u8>) -> Result<[u8; 5], InvalidDrawError> {
    let numbers: [u8; 5] = main_numbers
        .try_into()
        .map_err(|_| InvalidDrawError::WrongCount { found: main_numbers.len() })?;

    for &n in &numbers {
        if n < 1 || n > MAIN_MAX {
            return Err(InvalidDrawError::MainOutOfRange(n));
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                return Err(InvalidDrawError::DuplicateMain(numbers[i]));
            }
        }
    }
    if let Some(b) = bonus_number {
        if b < 1 || b > BONUS_MAX {
            return Err(InvalidDrawError::BonusOutOfRange(i64::from(b)));
        }
    }
    Ok(numbers)
}

/// Tirages synthétiques déterministes, du plus récent au plus ancien
/// (un tirage tous les 3 jours à partir du 28/10/2025).
pub fn make_test_draws(n: usize) -> Vec<Draw> {
    let anchor = NaiveDate::from_ymd_opt(2025, 10, 28).unwrap_or_default();
    (0..n)
        .map(|i| {
            let base = (i % 14) as u8;
            let date = anchor - Days::new(3 * i as u64);
            let main_numbers = [
                base * 5 + 1,
                base * 5 + 2,
                base * 5 + 3,
                base * 5 + 4,
                base * 5 + 5,
            ];
            let bonus = (i % 25) as u8 + 1;
            Draw::new(date, main_numbers, Some(bonus), format!("test {}", i))
        })
        .collect()
}
