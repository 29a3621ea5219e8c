//! Shared combat attributes for players and monsters.

/// Which side of the battle a combatant fights for.
///
/// Rounds are described in terms of roles rather than object identity, so the
/// resolver never needs to ask "is this the player".
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CombatRole {
    Hero,
    Monster,
}

impl CombatRole {
    /// The role on the receiving end of this role's attacks.
    pub const fn opponent(self) -> Self {
        match self {
            Self::Hero => Self::Monster,
            Self::Monster => Self::Hero,
        }
    }
}

/// Hit points plus attack and defense attributes.
///
/// Invariant: `0 <= hp <= max_hp` and `max_hp > 0`. All mutation goes through
/// the methods below, which clamp.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    hp: u32,
    max_hp: u32,
    pub base_attack: u32,
    /// Persistent growth on top of `base_attack`.
    pub attack_bonus: u32,
    pub defense: u32,
}

impl Vitals {
    /// Creates vitals at full health. A zero `max_hp` is raised to one.
    pub fn new(max_hp: u32, base_attack: u32, defense: u32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            hp: max_hp,
            max_hp,
            base_attack,
            attack_bonus: 0,
            defense,
        }
    }

    #[must_use]
    pub fn with_attack_bonus(mut self, attack_bonus: u32) -> Self {
        self.attack_bonus = attack_bonus;
        self
    }

    /// Sets current hp, clamped into `[0, max_hp]`.
    #[must_use]
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.set_hp(hp);
        self
    }

    pub const fn hp(&self) -> u32 {
        self.hp
    }

    pub const fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub const fn effective_attack(&self) -> u32 {
        self.base_attack.saturating_add(self.attack_bonus)
    }

    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    /// Removes up to `amount` hp and returns how much was actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    /// Restores up to `amount` hp and returns how much was actually gained.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    /// Raises the maximum and current hp by the same amount.
    pub fn grow_max_hp(&mut self, amount: u32) {
        self.max_hp = self.max_hp.saturating_add(amount);
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    pub fn refill(&mut self) {
        self.hp = self.max_hp;
    }
}

/// Capability set shared by everything that takes part in a round.
pub trait Combatant {
    fn role(&self) -> CombatRole;

    fn vitals(&self) -> &Vitals;

    fn vitals_mut(&mut self) -> &mut Vitals;

    fn hp(&self) -> u32 {
        self.vitals().hp()
    }

    fn is_alive(&self) -> bool {
        self.vitals().is_alive()
    }

    fn effective_attack(&self) -> u32 {
        self.vitals().effective_attack()
    }

    fn defense(&self) -> u32 {
        self.vitals().defense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_never_drops_hp_below_zero() {
        let mut vitals = Vitals::new(5, 0, 0);
        assert_eq!(vitals.take_damage(20), 5);
        assert_eq!(vitals.hp(), 0);
        assert!(!vitals.is_alive());
    }

    #[test]
    fn restore_is_capped_at_max() {
        let mut vitals = Vitals::new(40, 0, 0).with_hp(30);
        assert_eq!(vitals.restore(50), 10);
        assert_eq!(vitals.hp(), 40);
    }

    #[test]
    fn zero_max_hp_is_raised_to_one() {
        let vitals = Vitals::new(0, 3, 1);
        assert_eq!(vitals.max_hp(), 1);
        assert_eq!(vitals.hp(), 1);
    }

    #[test]
    fn effective_attack_includes_bonus() {
        let vitals = Vitals::new(10, 7, 0).with_attack_bonus(3);
        assert_eq!(vitals.effective_attack(), 10);
    }
}
