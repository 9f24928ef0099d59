use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Paramètres du générateur de numéros porte-bonheur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuckyConfig {
    /// Demi-vie (en tirages) du score de récence.
    pub half_life: f64,
    /// Rangs (0-indexés, bornes incluses) candidats pour le slot 1.
    pub slot1_first_rank: usize,
    pub slot1_last_rank: usize,
    /// Slot 2 : rangs 1..=slot2_pool, avec `slot2_core_chance` de rester dans les `slot2_core` premiers.
    pub slot2_pool: usize,
    pub slot2_core: usize,
    pub slot2_core_chance: f64,
    pub slot2_retries: usize,
    /// Nombre de paires les plus fréquentes mélangées pour le slot 5.
    pub pair_pool: usize,
    /// Pool "fréquence moyenne" : on saute les `mid_pool_skip` plus fréquents, on garde les `mid_pool_len` suivants.
    pub mid_pool_skip: usize,
    pub mid_pool_len: usize,
    pub fill_attempts: usize,
    /// Rééquilibrage si les 5 numéros occupent au plus ce nombre de dizaines.
    pub decade_threshold: usize,
    pub bonus_candidates: usize,
}

impl Default for LuckyConfig {
    fn default() -> Self {
        Self {
            half_life: 60.0,
            slot1_first_rank: 1,
            slot1_last_rank: 8,
            slot2_pool: 12,
            slot2_core: 6,
            slot2_core_chance: 0.7,
            slot2_retries: 30,
            pair_pool: 15,
            mid_pool_skip: 8,
            mid_pool_len: 28,
            fill_attempts: 50,
            decade_threshold: 2,
            bonus_candidates: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fenêtre des séries chaudes (tirages les plus récents).
    pub hot_streak_window: usize,
    /// Nombre d'entrées affichées dans "Most Overdue".
    pub most_overdue_count: usize,
    pub lucky: LuckyConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hot_streak_window: 20,
            most_overdue_count: 3,
            lucky: LuckyConfig::default(),
        }
    }
}

pub fn save_config(config: &EngineConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)
        .with_context(|| format!("Impossible d'écrire {:?}", path))?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let config: EngineConfig = serde_json::from_str(&json)
        .with_context(|| format!("Configuration invalide dans {:?}", path))?;
    Ok(config)
}
