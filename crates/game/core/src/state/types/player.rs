//! The learner's combatant and its persistent growth.

use std::collections::BTreeSet;

use super::combatant::{CombatRole, Combatant, Vitals};
use super::common::{HeroId, PlayerId};
use super::progression::ProgressionPosition;
use crate::config::GrowthRules;
use crate::env::HeroTemplate;

/// Growth that survives between sessions.
///
/// A [`Player`] is rebuilt from a hero template plus this profile at the start
/// of every session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerProfile {
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub exp: u64,
    pub currency: u64,
    pub attack_bonus: u32,
    pub defense_bonus: u32,
    pub unlocked_heroes: BTreeSet<HeroId>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            level: 1,
            exp: 0,
            currency: 0,
            attack_bonus: 0,
            defense_bonus: 0,
            unlocked_heroes: BTreeSet::new(),
        }
    }
}

/// The player's side of every battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub level: u32,
    pub selected_hero: HeroId,
    pub position: ProgressionPosition,
    pub vitals: Vitals,
    pub exp: u64,
    pub currency: u64,
    pub defense_bonus: u32,
    pub unlocked_heroes: BTreeSet<HeroId>,
}

impl Player {
    /// Builds a player at full health from a hero template and saved growth.
    pub fn from_hero(
        id: PlayerId,
        display_name: impl Into<String>,
        hero: &HeroTemplate,
        profile: &PlayerProfile,
        growth: &GrowthRules,
        position: ProgressionPosition,
    ) -> Self {
        let level = profile.level.max(1);
        let max_hp = hero
            .base_hp
            .saturating_add((level - 1).saturating_mul(growth.hp_per_level));
        let vitals = Vitals::new(
            max_hp,
            hero.base_attack,
            hero.base_defense.saturating_add(profile.defense_bonus),
        )
        .with_attack_bonus(profile.attack_bonus);

        let mut unlocked_heroes = profile.unlocked_heroes.clone();
        unlocked_heroes.insert(hero.id.clone());

        Self {
            id,
            display_name: display_name.into(),
            level,
            selected_hero: hero.id.clone(),
            position,
            vitals,
            exp: profile.exp,
            currency: profile.currency,
            defense_bonus: profile.defense_bonus,
            unlocked_heroes,
        }
    }

    /// Extracts the persistent part of this player.
    pub fn profile(&self) -> PlayerProfile {
        PlayerProfile {
            level: self.level,
            exp: self.exp,
            currency: self.currency,
            attack_bonus: self.vitals.attack_bonus,
            defense_bonus: self.defense_bonus,
            unlocked_heroes: self.unlocked_heroes.clone(),
        }
    }

    /// Adds experience and applies every level-up it pays for.
    ///
    /// Returns the levels reached, in order.
    pub fn gain_exp(&mut self, amount: u64, growth: &GrowthRules) -> Vec<u32> {
        self.exp = self.exp.saturating_add(amount);

        let mut reached = Vec::new();
        loop {
            let needed = growth.exp_to_next(self.level);
            if self.exp < needed {
                break;
            }
            self.exp -= needed;
            self.level += 1;
            self.vitals.attack_bonus = self
                .vitals
                .attack_bonus
                .saturating_add(growth.attack_per_level);
            self.defense_bonus = self.defense_bonus.saturating_add(growth.defense_per_level);
            self.vitals.defense = self.vitals.defense.saturating_add(growth.defense_per_level);
            self.vitals.grow_max_hp(growth.hp_per_level);
            reached.push(self.level);
        }
        reached
    }

    pub fn gain_currency(&mut self, amount: u64) {
        self.currency = self.currency.saturating_add(amount);
    }

    /// Records a hero as unlocked. Returns false if it already was.
    pub fn unlock_hero(&mut self, hero: HeroId) -> bool {
        self.unlocked_heroes.insert(hero)
    }
}

impl Combatant for Player {
    fn role(&self) -> CombatRole {
        CombatRole::Hero
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knight() -> HeroTemplate {
        HeroTemplate {
            id: HeroId::new("knight"),
            name: "Knight".to_string(),
            base_hp: 100,
            base_attack: 10,
            base_defense: 2,
        }
    }

    #[test]
    fn from_hero_applies_profile_bonuses() {
        let profile = PlayerProfile {
            level: 3,
            attack_bonus: 2,
            defense_bonus: 1,
            ..PlayerProfile::default()
        };
        let player = Player::from_hero(
            PlayerId(7),
            "Ari",
            &knight(),
            &profile,
            &GrowthRules::default(),
            ProgressionPosition::default(),
        );

        assert_eq!(player.vitals.max_hp(), 120);
        assert_eq!(player.hp(), 120);
        assert_eq!(player.effective_attack(), 12);
        assert_eq!(player.defense(), 3);
        assert!(player.unlocked_heroes.contains(&HeroId::new("knight")));
    }

    #[test]
    fn gain_exp_levels_up_and_keeps_remainder() {
        let growth = GrowthRules::default();
        let mut player = Player::from_hero(
            PlayerId(1),
            "Ari",
            &knight(),
            &PlayerProfile::default(),
            &growth,
            ProgressionPosition::default(),
        );

        // 100 to leave level 1, 200 to leave level 2.
        let reached = player.gain_exp(320, &growth);

        assert_eq!(reached, vec![2, 3]);
        assert_eq!(player.level, 3);
        assert_eq!(player.exp, 20);
        assert_eq!(player.vitals.attack_bonus, 2);
        assert_eq!(player.defense(), 4);
        assert_eq!(player.vitals.max_hp(), 120);
    }

    #[test]
    fn profile_round_trips_growth() {
        let growth = GrowthRules::default();
        let mut player = Player::from_hero(
            PlayerId(1),
            "Ari",
            &knight(),
            &PlayerProfile::default(),
            &growth,
            ProgressionPosition::default(),
        );
        player.gain_exp(150, &growth);
        player.gain_currency(40);

        let rebuilt = Player::from_hero(
            PlayerId(1),
            "Ari",
            &knight(),
            &player.profile(),
            &growth,
            ProgressionPosition::default(),
        );

        assert_eq!(rebuilt.level, player.level);
        assert_eq!(rebuilt.exp, 50);
        assert_eq!(rebuilt.currency, 40);
        assert_eq!(rebuilt.effective_attack(), player.effective_attack());
        assert_eq!(rebuilt.defense(), player.defense());
        assert_eq!(rebuilt.vitals.max_hp(), player.vitals.max_hp());
    }
}
