use comfy_table::{Table, ContentArrangement, presets::UTF8_FULL, Cell, Color};

use luckystats_db::loader::ImportResult;
use luckystats_db::models::{Draw, DueBand, GapEntry, HotStreakEntry, LuckyPick, NumberFrequency, NumberPair, Pool};
use luckystats_engine::distribution::SelectionStatistics;
use luckystats_engine::frequency::average_frequency;
use luckystats_engine::heatmap::{HeatCell, HeatLevel, NumberDetail, TimeRange};
use luckystats_engine::selection::Selection;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Chargement terminé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Retenus           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

pub fn display_draws(draws: &[Draw], selection: &Selection) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = new_table(vec!["", "Date", "Numéros", "Bonus", "Somme", "Pairs:Impairs", "Bas:Hauts"]);

    for draw in draws {
        let bonus = match draw.bonus_number {
            Some(b) => format!("{:2}", b),
            None => "—".to_string(),
        };
        let marker = if selection.contains(&draw.id) { "✔" } else { " " };

        table.add_row(vec![
            marker.to_string(),
            draw.date_string(),
            join_numbers(&draw.main_numbers),
            bonus,
            draw.sum().to_string(),
            draw.even_odd_ratio(),
            draw.low_high_ratio(),
        ]);
    }

    println!("{table}");
    println!("{} tirage(s) sélectionné(s) sur {}", selection.len(), draws.len());
}

pub fn display_statistics(
    stats: &SelectionStatistics,
    even_odd: &[u32],
    low_high: &[u32],
    sum_ranges: &[(u32, u32)],
    range_width: u32,
) {
    println!("\n📊 Statistiques sur {} tirage(s) sélectionné(s)\n", stats.total_draws);

    let mut table = new_table(vec!["Mesure", "Valeur"]);
    table.add_row(vec!["Somme moyenne".to_string(), format!("{:.1}", stats.avg_sum)]);
    table.add_row(vec!["Somme min / max".to_string(), format!("{} / {}", stats.min_sum, stats.max_sum)]);
    table.add_row(vec!["Pairs / Impairs (moy.)".to_string(), format!("{:.2} / {:.2}", stats.avg_even, stats.avg_odd)]);
    table.add_row(vec!["Bas / Hauts (moy.)".to_string(), format!("{:.2} / {:.2}", stats.avg_low, stats.avg_high)]);
    println!("{table}");

    println!("\n── Répartition ──");
    let mut table = new_table(vec!["k", "k pairs", "k bas (1-35)"]);
    for (k, (even, low)) in even_odd.iter().zip(low_high.iter()).enumerate() {
        table.add_row(vec![k.to_string(), even.to_string(), low.to_string()]);
    }
    println!("{table}");

    println!("\n── Sommes (tranches de {}) ──", range_width);
    let mut table = new_table(vec!["Tranche", "Tirages"]);
    for &(start, count) in sum_ranges {
        table.add_row(vec![format!("{}-{}", start, start + range_width - 1), count.to_string()]);
    }
    println!("{table}");
}

pub fn display_frequencies(freqs: &[NumberFrequency], title: &str, top: Option<usize>) {
    if freqs.is_empty() {
        println!("Aucune fréquence : sélection vide.");
        return;
    }

    println!("\n── {} (moyenne {:.2}) ──", title, average_frequency(freqs));
    let mut table = new_table(vec!["Rang", "Numéro", "Fréquence"]);
    let shown = top.unwrap_or(freqs.len());
    for (rank, f) in freqs.iter().take(shown).enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            format!("{:2}", f.number),
            f.count.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_pairs(pairs: &[NumberPair], title: &str, top: usize) {
    if pairs.is_empty() {
        println!("Aucune paire.");
        return;
    }

    println!("\n── {} ──", title);
    let mut table = new_table(vec!["Rang", "Paire", "Co-occurrences"]);
    for (rank, p) in pairs.iter().take(top).enumerate() {
        table.add_row(vec![(rank + 1).to_string(), p.label(), p.count.to_string()]);
    }
    println!("{table}");
}

fn band_color(band: DueBand) -> Color {
    match band {
        DueBand::UnderDue => Color::Green,
        DueBand::Approaching => Color::Yellow,
        DueBand::MildlyOverdue => Color::DarkYellow,
        DueBand::NotablyOverdue => Color::Red,
        DueBand::VeryOverdue => Color::Magenta,
    }
}

pub fn display_gaps(entries: &[GapEntry], filter_name: &str) {
    if entries.is_empty() {
        println!("Aucun numéro ({}).", filter_name);
        return;
    }

    println!("\n⏳ Retards ({})\n", filter_name);
    let mut table = new_table(vec!["Numéro", "Apparitions", "Écart moyen", "Écart actuel", "Ratio", "Zone", "Dernière sortie"]);
    for e in entries {
        let band = e.band();
        table.add_row(vec![
            Cell::new(format!("{:2}", e.number)),
            Cell::new(e.appearances.to_string()),
            Cell::new(format!("{:.1}", e.avg_gap)),
            Cell::new(e.current_gap.to_string()),
            Cell::new(format!("{:.2}", e.due_ratio)).fg(band_color(band)),
            Cell::new(band.to_string()).fg(band_color(band)),
            Cell::new(e.last_seen_label()),
        ]);
    }
    println!("{table}");
}

pub fn display_most_overdue(entries: &[GapEntry]) {
    if entries.is_empty() {
        return;
    }
    let labels: Vec<String> = entries
        .iter()
        .map(|e| format!("{} ({:.2}×)", e.number, e.due_ratio))
        .collect();
    println!("Les plus en retard : {}", labels.join(", "));
}

pub fn display_hot_streaks(entries: &[HotStreakEntry], window: usize) {
    if entries.is_empty() {
        println!("Aucune série : sélection vide.");
        return;
    }

    println!("\n🔥 Séries chaudes ({} derniers tirages)\n", window);
    let mut table = new_table(vec!["Numéro", "Apparitions", "Dates"]);
    for e in entries {
        table.add_row(vec![
            format!("{:2}", e.number),
            e.streak_count.to_string(),
            e.appearance_dates.join(", "),
        ]);
    }
    println!("{table}");
}

fn heat_color(level: HeatLevel) -> Color {
    match level {
        HeatLevel::None => Color::DarkGrey,
        HeatLevel::Cool => Color::Blue,
        HeatLevel::Mild => Color::Cyan,
        HeatLevel::Warm => Color::Yellow,
        HeatLevel::Hot => Color::DarkYellow,
        HeatLevel::Blazing => Color::Red,
    }
}

pub fn display_heatmap(cells: &[HeatCell], pool: Pool, range: TimeRange, draw_count: usize) {
    println!("\n🌡  Carte de chaleur : {}, {} ({} tirages)\n", pool, range, draw_count);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for row in cells.chunks(10) {
        table.add_row(
            row.iter()
                .map(|c| Cell::new(format!("{:2} ({})", c.number, c.frequency)).fg(heat_color(c.level)))
                .collect::<Vec<_>>(),
        );
    }
    println!("{table}");
}

pub fn display_number_detail(detail: &NumberDetail) {
    println!("\n── Numéro {} ──", detail.number);
    println!("  Fréquence        : {}", detail.frequency);
    match detail.days_since_last {
        Some(days) => println!("  Dernière sortie  : il y a {} jour(s)", days),
        None => println!("  Dernière sortie  : jamais"),
    }
    if detail.avg_gap > 0 {
        println!("  Écart moyen      : {} tirage(s)", detail.avg_gap);
    }
    if !detail.recent_appearances.is_empty() {
        println!("  Sorties récentes : {}", detail.recent_appearances.join(", "));
    }
}

pub fn display_lucky_picks(picks: &[LuckyPick]) {
    println!("\n🍀 Combinaisons porte-bonheur\n");

    let mut table = new_table(vec!["#", "Numéros", "Bonus"]);
    for (i, pick) in picks.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            join_numbers(&pick.main_numbers),
            format!("{:2}", pick.bonus_number),
        ]);
    }
    println!("{table}");
}
