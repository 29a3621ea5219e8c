//! The boundary between the battle core and the external puzzle layer.

use crate::state::{EncounterId, ProgressionPosition, PuzzleTypeId, SessionId};

/// Ask the puzzle layer to open a puzzle for the current encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PuzzleRequest {
    pub session: SessionId,
    pub encounter: EncounterId,
    pub position: ProgressionPosition,
    pub puzzle: PuzzleTypeId,
}

/// The only two signals a puzzle can emit, whatever its modality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PuzzleSignal {
    /// `hits >= 1` hero hits; `advance` asks for a fresh puzzle afterwards.
    Correct { hits: u32, advance: bool },
    Wrong,
}
