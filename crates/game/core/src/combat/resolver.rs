//! Round resolution: ordered attacker groups applied to the two combatants.

use super::damage::apply_damage;
use crate::state::{CombatRole, Combatant, Monster, Player};

/// A run of hits by one side against the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackGroup {
    pub attacker: CombatRole,
    pub hits: u32,
}

impl AttackGroup {
    pub const fn new(attacker: CombatRole, hits: u32) -> Self {
        Self { attacker, hits }
    }

    pub const fn hero(hits: u32) -> Self {
        Self::new(CombatRole::Hero, hits)
    }

    pub const fn monster(hits: u32) -> Self {
        Self::new(CombatRole::Monster, hits)
    }
}

/// One applied hit, in application order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitRecord {
    pub attacker: CombatRole,
    /// HP actually removed from the defender.
    pub damage: u32,
    /// Defender HP after the hit.
    pub defender_hp: u32,
}

impl HitRecord {
    pub const fn defender(&self) -> CombatRole {
        self.attacker.opponent()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundOutcome {
    pub player_alive: bool,
    pub monster_alive: bool,
}

impl RoundOutcome {
    /// Either side reaching 0 hp ends the encounter.
    pub fn is_terminal(&self) -> bool {
        !(self.player_alive && self.monster_alive)
    }

    /// Maps the outcome to what the session does next.
    ///
    /// `advance` only matters while both sides are standing.
    pub fn follow_up(&self, advance: bool) -> FollowUp {
        match (self.player_alive, self.monster_alive) {
            (false, _) => FollowUp::PlayerDefeated,
            (true, false) => FollowUp::MonsterDefeated,
            (true, true) if advance => FollowUp::NextPuzzle,
            (true, true) => FollowUp::Continue,
        }
    }
}

/// What the session does once a round's pacing has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum FollowUp {
    /// Keep the current puzzle open.
    Continue,
    /// Ask the puzzle layer for another puzzle against the same monster.
    NextPuzzle,
    /// Pay out rewards, advance progression and spawn the next monster.
    MonsterDefeated,
    /// End the session and clear the saved snapshot.
    PlayerDefeated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundResolution {
    pub outcome: RoundOutcome,
    pub hits: Vec<HitRecord>,
}

impl RoundResolution {
    pub fn total_damage(&self, attacker: CombatRole) -> u32 {
        self.hits
            .iter()
            .filter(|hit| hit.attacker == attacker)
            .map(|hit| hit.damage)
            .sum()
    }
}

/// Applies `groups` strictly in the order given.
///
/// A group stops the moment its target reaches 0 hp, and the remaining groups
/// are skipped once either side is down. No ordering is implied: callers pass
/// hero-first or monster-first sequences explicitly.
pub fn resolve_round(
    player: &mut Player,
    monster: &mut Monster,
    groups: &[AttackGroup],
) -> RoundResolution {
    let mut hits = Vec::new();

    'groups: for group in groups {
        for _ in 0..group.hits {
            if !player.is_alive() || !monster.is_alive() {
                break 'groups;
            }
            let record = match group.attacker {
                CombatRole::Hero => HitRecord {
                    attacker: player.role(),
                    damage: apply_damage(&*player, &mut *monster),
                    defender_hp: monster.hp(),
                },
                CombatRole::Monster => HitRecord {
                    attacker: monster.role(),
                    damage: apply_damage(&*monster, &mut *player),
                    defender_hp: player.hp(),
                },
            };
            hits.push(record);
        }
    }

    RoundResolution {
        outcome: RoundOutcome {
            player_alive: player.is_alive(),
            monster_alive: monster.is_alive(),
        },
        hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GrowthRules;
    use crate::env::{HeroTemplate, MonsterTemplate};
    use crate::state::{EncounterId, HeroId, PlayerId, PlayerProfile, ProgressionPosition};

    fn player(attack: u32, defense: u32, hp: u32) -> Player {
        let hero = HeroTemplate {
            id: HeroId::new("knight"),
            name: "Knight".to_string(),
            base_hp: hp,
            base_attack: attack,
            base_defense: defense,
        };
        Player::from_hero(
            PlayerId(1),
            "Ari",
            &hero,
            &PlayerProfile::default(),
            &GrowthRules::default(),
            ProgressionPosition::default(),
        )
    }

    fn monster(hp: u32, attack: u32, defense: u32) -> Monster {
        let template = MonsterTemplate::builder("slime")
            .hp(hp)
            .attack(attack)
            .defense(defense)
            .build();
        Monster::from_template(&template, EncounterId(1))
    }

    #[test]
    fn single_hit_subtracts_attack_minus_defense() {
        let mut p = player(10, 0, 50);
        let mut m = monster(40, 4, 3);

        let resolution = resolve_round(&mut p, &mut m, &[AttackGroup::hero(1)]);

        assert_eq!(m.hp(), 33);
        assert_eq!(resolution.hits.len(), 1);
        assert_eq!(resolution.outcome.follow_up(false), FollowUp::Continue);
    }

    #[test]
    fn lethal_hit_clamps_to_zero_and_stops_group() {
        let mut p = player(20, 0, 50);
        let mut m = monster(5, 4, 0);

        let resolution = resolve_round(&mut p, &mut m, &[AttackGroup::hero(3)]);

        assert_eq!(m.hp(), 0);
        assert_eq!(resolution.hits.len(), 1);
        assert_eq!(resolution.hits[0].damage, 5);
        assert!(!resolution.outcome.monster_alive);
        assert_eq!(resolution.outcome.follow_up(true), FollowUp::MonsterDefeated);
    }

    #[test]
    fn later_groups_skip_after_death() {
        let mut p = player(50, 0, 30);
        let mut m = monster(10, 100, 0);

        let resolution = resolve_round(
            &mut p,
            &mut m,
            &[AttackGroup::hero(1), AttackGroup::monster(2)],
        );

        assert_eq!(p.hp(), 30);
        assert_eq!(resolution.total_damage(CombatRole::Monster), 0);
        assert!(resolution.outcome.is_terminal());
    }

    #[test]
    fn order_is_caller_defined() {
        let mut p = player(50, 0, 30);
        let mut m = monster(10, 100, 0);

        let resolution = resolve_round(
            &mut p,
            &mut m,
            &[AttackGroup::monster(1), AttackGroup::hero(1)],
        );

        assert_eq!(p.hp(), 0);
        assert_eq!(m.hp(), 10);
        assert_eq!(resolution.outcome.follow_up(true), FollowUp::PlayerDefeated);
    }

    #[test]
    fn hits_record_both_sides() {
        let mut p = player(10, 0, 50);
        let mut m = monster(40, 4, 3);

        let resolution = resolve_round(
            &mut p,
            &mut m,
            &[AttackGroup::hero(1), AttackGroup::monster(1)],
        );

        let sides: Vec<_> = resolution
            .hits
            .iter()
            .map(|hit| (hit.attacker, hit.defender(), hit.defender_hp))
            .collect();
        assert_eq!(
            sides,
            [
                (CombatRole::Hero, CombatRole::Monster, 33),
                (CombatRole::Monster, CombatRole::Hero, 46),
            ]
        );
    }

    #[test]
    fn high_defense_still_takes_minimum_damage() {
        let mut p = player(10, 0, 30);
        let mut m = monster(10, 1, 500);

        resolve_round(&mut p, &mut m, &[AttackGroup::hero(4)]);

        assert_eq!(m.hp(), 6);
    }

    #[test]
    fn hp_stays_in_bounds_over_many_rounds() {
        let mut p = player(3, 1, 40);
        let mut m = monster(60, 4, 1);

        for round in 0..40 {
            let groups = if round % 3 == 0 {
                [AttackGroup::monster(1), AttackGroup::hero(0)]
            } else {
                [AttackGroup::hero(2), AttackGroup::monster(1)]
            };
            resolve_round(&mut p, &mut m, &groups);
            assert!(p.hp() <= p.vitals.max_hp());
            assert!(m.hp() <= m.vitals.max_hp());
        }
        assert!(!p.is_alive() || !m.is_alive());
    }
}
