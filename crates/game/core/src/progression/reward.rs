//! Defeat rewards: tier-based healing, experience, currency and hero unlocks.

use crate::config::GameConfig;
use crate::state::{Combatant, HeroId, Monster, MonsterTier, Player};

/// Everything a single defeat paid out.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardSummary {
    pub tier: MonsterTier,
    pub exp_reward: u64,
    pub currency_reward: u64,
    /// HP actually gained; capped by the player's missing hp.
    pub hp_restored: u32,
    pub levels_reached: Vec<u32>,
    /// Set only when the hero was not unlocked before.
    pub hero_unlocked: Option<HeroId>,
}

/// Pays out the defeat reward of `monster` to `player`.
///
/// Returns `None` when the reward was already taken, so repeated defeat
/// checks never pay twice.
pub fn claim_reward(
    player: &mut Player,
    monster: &mut Monster,
    config: &GameConfig,
) -> Option<RewardSummary> {
    if !monster.take_reward() {
        return None;
    }

    let hp_restored = player
        .vitals_mut()
        .restore(config.rewards.restore_for(monster.tier));
    player.gain_currency(monster.currency_reward);
    let levels_reached = player.gain_exp(monster.exp_reward, &config.growth);
    let hero_unlocked = monster
        .unlocks_hero
        .clone()
        .filter(|hero| player.unlock_hero(hero.clone()));

    Some(RewardSummary {
        tier: monster.tier,
        exp_reward: monster.exp_reward,
        currency_reward: monster.currency_reward,
        hp_restored,
        levels_reached,
        hero_unlocked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{HeroTemplate, MonsterTemplate};
    use crate::state::{EncounterId, PlayerId, PlayerProfile, ProgressionPosition};

    fn wounded_player(config: &GameConfig, damage: u32) -> Player {
        let hero = HeroTemplate {
            id: HeroId::new("knight"),
            name: "Knight".to_string(),
            base_hp: 100,
            base_attack: 10,
            base_defense: 0,
        };
        let mut player = Player::from_hero(
            PlayerId(1),
            "Ari",
            &hero,
            &PlayerProfile::default(),
            &config.growth,
            ProgressionPosition::default(),
        );
        player.vitals_mut().take_damage(damage);
        player
    }

    #[test]
    fn elite_restores_twenty() {
        let config = GameConfig::default();
        let mut player = wounded_player(&config, 60);
        let template = MonsterTemplate::builder("ogre")
            .tier(MonsterTier::Elite)
            .rewards(30, 12)
            .build();
        let mut monster = Monster::from_template(&template, EncounterId(1));

        let summary = claim_reward(&mut player, &mut monster, &config).unwrap();

        assert_eq!(summary.hp_restored, 20);
        assert_eq!(player.hp(), 60);
        assert_eq!(player.exp, 30);
        assert_eq!(player.currency, 12);
        assert!(summary.levels_reached.is_empty());
    }

    #[test]
    fn restore_is_capped_at_max_hp() {
        let config = GameConfig::default();
        let mut player = wounded_player(&config, 10);
        let template = MonsterTemplate::builder("dragon")
            .tier(MonsterTier::FinalBoss)
            .build();
        let mut monster = Monster::from_template(&template, EncounterId(1));

        let summary = claim_reward(&mut player, &mut monster, &config).unwrap();

        assert_eq!(summary.hp_restored, 10);
        assert_eq!(player.hp(), 100);
    }

    #[test]
    fn reward_is_paid_once() {
        let config = GameConfig::default();
        let mut player = wounded_player(&config, 0);
        let template = MonsterTemplate::builder("slime").rewards(5, 5).build();
        let mut monster = Monster::from_template(&template, EncounterId(1));

        assert!(claim_reward(&mut player, &mut monster, &config).is_some());
        assert!(claim_reward(&mut player, &mut monster, &config).is_none());
        assert_eq!(player.exp, 5);
        assert_eq!(player.currency, 5);
    }

    #[test]
    fn hero_unlock_reported_only_when_new() {
        let config = GameConfig::default();
        let mut player = wounded_player(&config, 0);
        let template = MonsterTemplate::builder("lich")
            .tier(MonsterTier::Boss)
            .unlocks_hero("mage")
            .build();

        let mut first = Monster::from_template(&template, EncounterId(1));
        let summary = claim_reward(&mut player, &mut first, &config).unwrap();
        assert_eq!(summary.hero_unlocked, Some(HeroId::new("mage")));

        let mut second = Monster::from_template(&template, EncounterId(2));
        let summary = claim_reward(&mut player, &mut second, &config).unwrap();
        assert_eq!(summary.hero_unlocked, None);
    }
}
