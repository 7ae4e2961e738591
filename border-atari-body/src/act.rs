//! Action for [`AtariBody`](crate::AtariBody).
use serde::{Deserialize, Serialize};

/// A discrete action of an Atari game.
///
/// Agents wrapped by [`AtariBody`](crate::AtariBody) return actions convertible
/// from `u8`, so the body can emit no-op and fire actions in their place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtariAct {
    /// Index in the action table of the game.
    pub act: u8,
}

impl AtariAct {
    /// Constructs an action.
    pub fn new(act: u8) -> Self {
        Self { act }
    }
}

impl From<u8> for AtariAct {
    fn from(act: u8) -> Self {
        Self { act }
    }
}

impl From<AtariAct> for u8 {
    fn from(act: AtariAct) -> Self {
        act.act
    }
}
