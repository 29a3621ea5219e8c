//! Balance tables and tunable parameters.
//!
//! [`GameConfig`] is data-driven: `quest-content` deserializes it from
//! `config.toml`, and any field left out of the file keeps its default.

use crate::state::{MonsterTier, PuzzleTypeId};

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of steps (monster encounters) in every station.
    pub total_steps_per_station: u32,

    /// Puzzle type used when a step has no configuration entry.
    pub default_puzzle_type: PuzzleTypeId,

    /// HP restored to the player when a monster of each tier falls.
    pub rewards: RewardTable,

    /// Level-up thresholds and per-level growth.
    pub growth: GrowthRules,

    /// Word-search generator tunables.
    pub grid: GridRules,

    /// Stats of the monster spawned when content is missing.
    pub fallback_monster: FallbackMonster,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Lower bound on the damage of a single hit, regardless of defense.
    pub const MIN_DAMAGE: u32 = 1;

    /// Template id carried by the fallback monster.
    pub const FALLBACK_MONSTER_ID: &'static str = "fallback";

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TOTAL_STEPS_PER_STATION: u32 = 10;
    pub const DEFAULT_PUZZLE_TYPE: &'static str = "word_search";

    pub fn new() -> Self {
        Self {
            total_steps_per_station: Self::DEFAULT_TOTAL_STEPS_PER_STATION,
            default_puzzle_type: PuzzleTypeId::new(Self::DEFAULT_PUZZLE_TYPE),
            rewards: RewardTable::default(),
            growth: GrowthRules::default(),
            grid: GridRules::default(),
            fallback_monster: FallbackMonster::default(),
        }
    }

    pub fn with_total_steps(total_steps_per_station: u32) -> Self {
        Self {
            total_steps_per_station: total_steps_per_station.max(1),
            ..Self::new()
        }
    }

    /// Steps per station, never below one.
    pub fn steps_per_station(&self) -> u32 {
        self.total_steps_per_station.max(1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed HP restoration per monster tier.
///
/// The amounts are flat lookups and do not scale with player level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardTable {
    pub normal_restore: u32,
    pub elite_restore: u32,
    pub boss_restore: u32,
    pub final_boss_restore: u32,
}

impl RewardTable {
    pub const fn restore_for(&self, tier: MonsterTier) -> u32 {
        match tier {
            MonsterTier::Normal => self.normal_restore,
            MonsterTier::Elite => self.elite_restore,
            MonsterTier::Boss => self.boss_restore,
            MonsterTier::FinalBoss => self.final_boss_restore,
        }
    }
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            normal_restore: 0,
            elite_restore: 20,
            boss_restore: 50,
            final_boss_restore: 50,
        }
    }
}

/// Experience curve and per-level stat growth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowthRules {
    /// Experience needed to leave level `n` is `exp_per_level * n`.
    pub exp_per_level: u64,
    pub attack_per_level: u32,
    pub defense_per_level: u32,
    pub hp_per_level: u32,
}

impl GrowthRules {
    /// Experience required to advance from `level` to `level + 1`.
    pub fn exp_to_next(&self, level: u32) -> u64 {
        self.exp_per_level.max(1) * u64::from(level.max(1))
    }
}

impl Default for GrowthRules {
    fn default() -> Self {
        Self {
            exp_per_level: 100,
            attack_per_level: 1,
            defense_per_level: 1,
            hp_per_level: 10,
        }
    }
}

/// Word-search placement parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridRules {
    /// Random placements tried per word before it is marked unplaced.
    pub placement_attempts: u32,
    /// After this many failures a non-intersecting placement is accepted.
    pub relax_intersection_after: u32,
    /// Initial grid area as a multiple of the total letter count.
    pub size_factor: f64,
}

impl Default for GridRules {
    fn default() -> Self {
        Self {
            placement_attempts: 300,
            relax_intersection_after: 250,
            size_factor: 1.5,
        }
    }
}

/// Stats of the documented default monster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FallbackMonster {
    pub name: String,
    pub base_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub exp_reward: u64,
    pub currency_reward: u64,
}

impl Default for FallbackMonster {
    fn default() -> Self {
        Self {
            name: "Wandering Shade".to_string(),
            base_hp: 30,
            attack: 5,
            defense: 0,
            exp_reward: 10,
            currency_reward: 5,
        }
    }
}
