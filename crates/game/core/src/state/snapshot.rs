//! Persisted session snapshots.
//!
//! A snapshot stores the player's persistent growth and position plus enough
//! of the current monster to resume the fight. Everything else is rebuilt
//! from content on restore.

use super::SessionState;
use super::types::{
    Combatant, HeroId, Monster, MonsterTemplateId, PlayerId, PlayerProfile, ProgressionPosition,
};

/// The part of a monster worth saving.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterSnapshot {
    pub template_id: MonsterTemplateId,
    pub hp: u32,
    pub has_dropped_reward: bool,
}

impl MonsterSnapshot {
    pub fn of(monster: &Monster) -> Self {
        Self {
            template_id: monster.template_id.clone(),
            hp: monster.hp(),
            has_dropped_reward: monster.has_dropped_reward,
        }
    }

    /// Copies saved hp and reward flag onto a freshly spawned monster.
    ///
    /// Returns false, leaving the monster untouched, when content changed and
    /// the spawn no longer uses the saved template. A restored monster is
    /// always alive.
    pub fn apply_to(&self, monster: &mut Monster) -> bool {
        if monster.template_id != self.template_id {
            return false;
        }
        monster.vitals_mut().set_hp(self.hp.max(1));
        monster.has_dropped_reward = self.has_dropped_reward;
        true
    }
}

/// Snapshot stored by the persistence gateway, one per player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedSession {
    pub player_id: PlayerId,
    pub display_name: String,
    pub hero: HeroId,
    pub profile: PlayerProfile,
    pub hp: u32,
    pub position: ProgressionPosition,
    pub monster: Option<MonsterSnapshot>,
}

impl SavedSession {
    pub fn capture(state: &SessionState) -> Self {
        let player = &state.player;
        Self {
            player_id: player.id,
            display_name: player.display_name.clone(),
            hero: player.selected_hero.clone(),
            profile: player.profile(),
            hp: player.hp(),
            position: player.position.clone(),
            monster: state.monster.as_ref().map(MonsterSnapshot::of),
        }
    }
}
