use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use crate::models::{Draw, InvalidDrawError, BONUS_MAX, validate_draw};

/// Jeu d'exemple intégré : 30 tirages, du 18/07/2025 au 28/10/2025.
pub const DEFAULT_DATA: &str = "\
10/28/2025, 2 19 33 53 61 + 14
10/24/2025, 11 18 31 51 56 + 24
10/21/2025, 2 18 27 34 59 + 18
10/17/2025, 9 21 27 48 56 + 10
10/14/2025, 12 22 49 57 58 + 19
10/10/2025, 3 18 23 32 56 + 8
10/7/2025, 17 26 33 45 56 + 19
10/3/2025, 18 19 38 54 57 + 19
9/30/2025, 4 8 27 37 63 + 14
9/26/2025, 4 21 27 33 49 + 21
9/23/2025, 13 24 41 42 70 + 18
9/19/2025, 2 22 27 42 58 + 8
9/16/2025, 10 14 34 40 43 + 5
9/12/2025, 17 18 21 42 64 + 7
9/9/2025, 6 43 52 64 65 + 22
9/5/2025, 6 14 36 58 62 + 24
9/2/2025, 7 17 35 40 64 + 23
8/29/2025, 13 31 32 44 45 + 21
8/26/2025, 7 12 30 40 69 + 17
8/22/2025, 18 30 44 48 50 + 12
8/19/2025, 10 19 24 49 68 + 10
8/15/2025, 4 17 27 34 69 + 16
8/12/2025, 1 8 31 56 67 + 23
8/8/2025, 2 6 8 14 49 + 12
8/5/2025, 12 27 42 59 65 + 2
8/1/2025, 18 27 29 33 70 + 22
7/29/2025, 17 30 34 63 67 + 11
7/25/2025, 14 21 25 49 52 + 7
7/22/2025, 22 41 42 59 69 + 17
7/18/2025, 11 43 54 55 63 + 3
";

pub struct ImportResult {
    /// Tirages valides, du plus récent au plus ancien.
    pub draws: Vec<Draw>,
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

/// Accepte M/D/YYYY (format d'origine) ou YYYY-MM-DD.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .with_context(|| format!("Format de date invalide: '{}'", raw))
}

/// "2 19 33 53 61 + 14" → ([2, 19, 33, 53, 61], Some(14)). Le bonus est optionnel.
pub fn parse_numbers(raw: &str) -> Result<(Vec<u8>, Option<u8>)> {
    let mut parts = raw.splitn(2, '+');
    let main_part = parts.next().unwrap_or_default();

    let main_numbers = main_part
        .split_whitespace()
        .map(|s| {
            s.parse::<u8>()
                .with_context(|| format!("Impossible de parser le numéro '{}'", s))
        })
        .collect::<Result<Vec<_>>>()?;

    let bonus_number = parts.next().map(parse_bonus).transpose()?.flatten();

    Ok((main_numbers, bonus_number))
}

/// Bonus après le '+'. Sans nombre lisible, le bonus est inconnu ;
/// tout nombre hors 1-25 (y compris au-delà de 255) rejette la ligne.
fn parse_bonus(raw: &str) -> Result<Option<u8>, InvalidDrawError> {
    let raw = raw.trim();
    let value = match raw.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let digits = raw.strip_prefix('-').unwrap_or(raw);
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Ok(None);
            }
            // Trop grand même pour un i64
            i64::MAX
        }
    };
    match u8::try_from(value) {
        Ok(b) if (1..=BONUS_MAX).contains(&b) => Ok(Some(b)),
        _ => Err(InvalidDrawError::BonusOutOfRange(value)),
    }
}

fn build_draw(raw_date: &str, raw_numbers: &str) -> Result<Draw> {
    let date = parse_date(raw_date)?;
    let numbers = raw_numbers.trim();
    let (main, bonus) = parse_numbers(numbers)?;
    let main_numbers = validate_draw(&main, bonus)?;
    Ok(Draw::new(date, main_numbers, bonus, numbers))
}

fn parse_record(record: &csv::StringRecord) -> Result<Draw> {
    if record.len() != 2 {
        bail!("2 champs attendus (date, numéros), {} trouvés", record.len());
    }
    let get = |idx: usize| -> Result<&str> {
        record
            .get(idx)
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };
    build_draw(get(0)?, get(1)?)
}

/// Tri stable par date décroissante : l'index 0 est le tirage le plus récent.
pub fn sort_newest_first(draws: &mut [Draw]) {
    draws.sort_by(|a, b| b.date.cmp(&a.date));
}

pub fn import_reader<R: Read>(reader: R) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut result = ImportResult {
        draws: Vec::new(),
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };
    let mut seen = HashSet::new();

    for record_result in reader.records() {
        let record = match record_result {
            Ok(record) => record,
            Err(e) => {
                result.total_records += 1;
                log::warn!("Erreur lecture ligne {}: {}", result.total_records, e);
                result.errors += 1;
                continue;
            }
        };
        // Ligne composée uniquement d'espaces
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        result.total_records += 1;

        match parse_record(&record) {
            Ok(draw) => {
                if seen.insert(draw.id.clone()) {
                    result.draws.push(draw);
                    result.inserted += 1;
                } else {
                    log::debug!("Tirage {} en double, ignoré", draw.id);
                    result.skipped += 1;
                }
            }
            Err(e) => {
                log::warn!("Erreur parsing ligne {}: {:#}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    sort_newest_first(&mut result.draws);
    log::info!(
        "{} tirages chargés ({} doublons, {} erreurs)",
        result.inserted,
        result.skipped,
        result.errors
    );
    Ok(result)
}

pub fn import_str(text: &str) -> Result<ImportResult> {
    import_reader(text.as_bytes())
}

pub fn import_file(path: &Path) -> Result<ImportResult> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    import_reader(file)
}

/// Charge le fichier donné, ou le jeu d'exemple intégré à défaut.
pub fn load_draws(path: Option<&Path>) -> Result<ImportResult> {
    match path {
        Some(p) => import_file(p),
        None => import_str(DEFAULT_DATA),
    }
}
