use serde::{Deserialize, Serialize};

use crate::Coord;
use crate::player::Player;

/// A line direction on the board. `delta` is the step toward growing
/// row/column indices; the detector also walks the opposite way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
    Diagonal,
    AntiDiagonal,
}

impl Axis {
    pub fn delta(self) -> (i16, i16) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

pub const ORTHOGONAL_AXES: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

pub const ALL_AXES: [Axis; 4] = [
    Axis::Horizontal,
    Axis::Vertical,
    Axis::Diagonal,
    Axis::AntiDiagonal,
];

/// Session-fixed rule parameters. Exactly one player has diagonal access;
/// the other is restricted to the orthogonal pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub size: u8,
    pub obstacle_count: u16,
    pub diagonal_player: Player,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            size: 15,
            obstacle_count: 20,
            diagonal_player: Player::Short,
        }
    }
}

impl Rules {
    /// Axis set for a player, in the fixed order the win detector scans.
    pub fn axes(&self, player: Player) -> &'static [Axis] {
        if player == self.diagonal_player {
            &ALL_AXES
        } else {
            &ORTHOGONAL_AXES
        }
    }

    pub fn center(&self) -> Coord {
        (self.size / 2, self.size / 2)
    }
}
