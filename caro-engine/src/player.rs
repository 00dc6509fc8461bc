use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;

/// The two sides, encoded as their winning run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Player {
    Short = 3,
    Long = 6,
}

impl Player {
    pub fn from_int(v: u8) -> Option<Self> {
        match v {
            3 => Some(Player::Short),
            6 => Some(Player::Long),
            _ => None,
        }
    }

    pub fn to_int(self) -> u8 {
        self as u8
    }

    /// Run length this player must connect to win.
    pub fn threshold(self) -> usize {
        self as u8 as usize
    }

    /// Placements granted at the start of this player's turn.
    pub fn base_moves(self) -> u8 {
        match self {
            Player::Short => 1,
            Player::Long => 2,
        }
    }

    /// Turns the bonus-move skill stays on cooldown after use.
    pub fn skill_recovery(self) -> u8 {
        match self {
            Player::Short => 3,
            Player::Long => 6,
        }
    }

    pub fn opp(self) -> Self {
        match self {
            Player::Short => Player::Long,
            Player::Long => Player::Short,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Player::Short => "S",
            Player::Long => "L",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Short => write!(f, "Short-Chain"),
            Player::Long => write!(f, "Long-Chain"),
        }
    }
}
