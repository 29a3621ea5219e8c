//! Damage calculation and application.

use crate::config::GameConfig;
use crate::state::Combatant;

// ============================================================================
// Damage Calculation
// ============================================================================

/// Calculate the damage of a single hit.
///
/// # Formula
///
/// ```text
/// damage = max(MIN_DAMAGE, effective_attack - defense)
/// ```
///
/// Subtraction saturates, so arbitrarily high defense still takes
/// `MIN_DAMAGE`.
pub fn calculate_damage(effective_attack: u32, defense: u32) -> u32 {
    effective_attack
        .saturating_sub(defense)
        .max(GameConfig::MIN_DAMAGE)
}

// ============================================================================
// Damage Application
// ============================================================================

/// Apply one hit from `attacker` to `defender`.
///
/// Returns the damage actually removed from the defender, which is smaller
/// than the computed damage when the hit is lethal.
pub fn apply_damage(attacker: &impl Combatant, defender: &mut impl Combatant) -> u32 {
    let damage = calculate_damage(attacker.effective_attack(), defender.defense());
    defender.vitals_mut().take_damage(damage)
}
