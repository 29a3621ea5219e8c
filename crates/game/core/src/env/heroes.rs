use crate::state::HeroId;

/// Base stats of a selectable hero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroTemplate {
    pub id: HeroId,
    pub name: String,
    pub base_hp: u32,
    pub base_attack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_defense: u32,
}

/// Oracle providing hero templates by id.
pub trait HeroOracle: Send + Sync {
    fn hero(&self, id: &HeroId) -> Option<HeroTemplate>;
}
