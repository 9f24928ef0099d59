mod display;

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;

use luckystats_db::loader::{load_draws, parse_date};
use luckystats_db::models::{DrawId, Pool};
use luckystats_engine::config::{load_config, save_config, EngineConfig};
use luckystats_engine::distribution::{even_odd_distribution, low_high_distribution, sum_ranges};
use luckystats_engine::gap::GapFilter;
use luckystats_engine::heatmap::{heat_cells, number_detail, TimeRange};
use luckystats_engine::pairs::pairs_containing;
use luckystats_engine::session::AnalysisSession;
use crate::display::{
    display_draws, display_frequencies, display_gaps, display_heatmap, display_hot_streaks,
    display_import_summary, display_lucky_picks, display_most_overdue, display_number_detail,
    display_pairs, display_statistics,
};

const SUM_RANGE_WIDTH: u32 = 25;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum GapFilterArg {
    #[default]
    All,
    Overdue,
    VeryOverdue,
}

impl From<GapFilterArg> for GapFilter {
    fn from(arg: GapFilterArg) -> Self {
        match arg {
            GapFilterArg::All => GapFilter::All,
            GapFilterArg::Overdue => GapFilter::Overdue,
            GapFilterArg::VeryOverdue => GapFilter::VeryOverdue,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum RangeArg {
    #[value(name = "7d")]
    SevenDays,
    #[value(name = "30d")]
    ThirtyDays,
    #[value(name = "90d")]
    NinetyDays,
    #[value(name = "1y")]
    OneYear,
    #[default]
    All,
}

impl From<RangeArg> for TimeRange {
    fn from(arg: RangeArg) -> Self {
        match arg {
            RangeArg::SevenDays => TimeRange::SevenDays,
            RangeArg::ThirtyDays => TimeRange::ThirtyDays,
            RangeArg::NinetyDays => TimeRange::NinetyDays,
            RangeArg::OneYear => TimeRange::OneYear,
            RangeArg::All => TimeRange::AllTime,
        }
    }
}

#[derive(Parser)]
#[command(name = "luckystats", about = "Statistiques de tirages de loterie (5 numéros 1-70 + bonus 1-25)")]
struct Cli {
    /// Fichier de tirages ("M/D/YYYY, n n n n n + b" par ligne) ; jeu d'exemple intégré par défaut
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Configuration JSON des moteurs
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ne sélectionner que les N tirages les plus récents
    #[arg(long, global = true)]
    last: Option<usize>,

    /// Retirer un tirage de la sélection (date, répétable)
    #[arg(long, global = true)]
    exclude: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lister les tirages chargés
    List,

    /// Statistiques de la sélection (sommes, parité, bas/hauts)
    Stats,

    /// Fréquence des numéros
    Frequency {
        /// Du moins fréquent au plus fréquent
        #[arg(short, long, conflicts_with = "bonus")]
        least: bool,

        /// Numéros bonus au lieu des numéros principaux
        #[arg(short, long)]
        bonus: bool,

        /// Nombre de lignes à afficher
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Paires les plus fréquentes
    Pairs {
        #[arg(short, long, default_value = "20")]
        top: usize,

        /// Seulement les paires contenant ce numéro
        #[arg(short, long)]
        number: Option<u8>,
    },

    /// Retards (écart actuel / écart moyen)
    Gaps {
        #[arg(long, default_value = "all")]
        filter: GapFilterArg,
    },

    /// Séries chaudes sur les tirages récents
    Streaks,

    /// Carte de chaleur des fréquences
    Heatmap {
        #[arg(short, long, default_value = "all")]
        range: RangeArg,

        #[arg(short, long)]
        bonus: bool,

        /// Date de référence (YYYY-MM-DD), aujourd'hui par défaut
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Détail d'un numéro
        #[arg(short, long)]
        number: Option<u8>,
    },

    /// Générer des combinaisons porte-bonheur
    Lucky {
        /// Nombre de combinaisons
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Écrire la configuration (par défaut ou chargée) en JSON
    Config {
        #[arg(short, long, default_value = "luckystats.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };

    if let Command::Config { output } = &cli.command {
        return cmd_config(&config, output);
    }

    let mut result = load_draws(cli.file.as_deref())?;
    let draws = std::mem::take(&mut result.draws);
    let mut session = AnalysisSession::new(draws, config);
    apply_selection(&mut session, cli.last, &cli.exclude)?;

    match cli.command {
        Command::List => {
            display_import_summary(&result);
            display_draws(session.draws(), session.selection());
            Ok(())
        }
        Command::Stats => cmd_stats(&mut session),
        Command::Frequency { least, bonus, top } => cmd_frequency(&mut session, least, bonus, top),
        Command::Pairs { top, number } => cmd_pairs(&mut session, top, number),
        Command::Gaps { filter } => cmd_gaps(&mut session, filter),
        Command::Streaks => {
            display_hot_streaks(&session.hot_streaks(), session.config().hot_streak_window);
            Ok(())
        }
        Command::Heatmap {
            range,
            bonus,
            today,
            number,
        } => cmd_heatmap(&session, range, bonus, today, number),
        Command::Lucky { count, seed } => cmd_lucky(&mut session, count, seed),
        Command::Config { .. } => Ok(()),
    }
}

fn apply_selection(session: &mut AnalysisSession, last: Option<usize>, exclude: &[String]) -> Result<()> {
    if let Some(n) = last {
        let ids: Vec<DrawId> = session.draws().iter().take(n).map(|d| d.id.clone()).collect();
        session.deselect_all();
        for id in &ids {
            session.toggle(id);
        }
    }

    for raw in exclude {
        let id = DrawId::from_date(parse_date(raw)?);
        if session.selection().contains(&id) {
            session.toggle(&id);
        } else {
            log::warn!("Tirage {} absent de la sélection, ignoré", raw);
        }
    }
    Ok(())
}

fn cmd_config(config: &EngineConfig, output: &Path) -> Result<()> {
    save_config(config, output)?;
    println!("Configuration écrite dans {}", output.display());
    Ok(())
}

fn cmd_stats(session: &mut AnalysisSession) -> Result<()> {
    let Some(stats) = session.statistics() else {
        println!("Aucun tirage sélectionné.");
        return Ok(());
    };
    let selected = session.selected_draws();
    display_statistics(
        &stats,
        &even_odd_distribution(&selected),
        &low_high_distribution(&selected),
        &sum_ranges(&selected, SUM_RANGE_WIDTH),
        SUM_RANGE_WIDTH,
    );
    display_most_overdue(&session.most_overdue());
    Ok(())
}

fn cmd_frequency(session: &mut AnalysisSession, least: bool, bonus: bool, top: Option<usize>) -> Result<()> {
    if bonus {
        let title = format!("Fréquences {}", Pool::Bonus);
        display_frequencies(session.bonus_frequency(), &title, top);
    } else if least {
        let title = format!("Moins fréquents {}", Pool::Main);
        display_frequencies(session.least_common(), &title, top);
    } else {
        let title = format!("Fréquences {}", Pool::Main);
        display_frequencies(session.frequency(), &title, top);
    }
    Ok(())
}

fn cmd_pairs(session: &mut AnalysisSession, top: usize, number: Option<u8>) -> Result<()> {
    match number {
        Some(n) => {
            if n == 0 || n as usize > Pool::Main.size() {
                bail!("Numéro {} hors de 1-{}", n, Pool::Main.size());
            }
            let pairs = pairs_containing(n, session.pairs());
            display_pairs(&pairs, &format!("Paires contenant {}", n), top);
        }
        None => display_pairs(session.pairs(), "Paires les plus fréquentes", top),
    }
    Ok(())
}

fn cmd_gaps(session: &mut AnalysisSession, filter: GapFilterArg) -> Result<()> {
    let filter = GapFilter::from(filter);
    let entries = filter.apply(session.gap_entries());
    display_gaps(&entries, &filter.to_string());
    display_most_overdue(&session.most_overdue());
    Ok(())
}

fn cmd_heatmap(
    session: &AnalysisSession,
    range: RangeArg,
    bonus: bool,
    today: Option<NaiveDate>,
    number: Option<u8>,
) -> Result<()> {
    let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let range = TimeRange::from(range);
    let pool = if bonus { Pool::Bonus } else { Pool::Main };

    let draws = range.filter_draws(&session.selected_draws(), today);
    display_heatmap(&heat_cells(&draws, pool), pool, range, draws.len());

    if let Some(n) = number {
        if n == 0 || n as usize > pool.size() {
            bail!("Numéro {} hors de 1-{}", n, pool.size());
        }
        display_number_detail(&number_detail(&draws, pool, n, today));
    }
    Ok(())
}

fn cmd_lucky(session: &mut AnalysisSession, count: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut picks = Vec::with_capacity(count);
    for _ in 0..count {
        match session.lucky_pick(&mut rng) {
            Ok(pick) => picks.push(pick),
            Err(e) => {
                println!("Génération impossible : {}.", e);
                return Ok(());
            }
        }
    }
    display_lucky_picks(&picks);
    Ok(())
}
